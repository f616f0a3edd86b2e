//! File filter engine.
//!
//! Decides per-path inclusion of template files from pattern-to-condition
//! rules evaluated against the answer set. Rule tables are authored
//! most-general-first: among the rules matching a path, the one with the
//! fewest wildcard characters wins, and equally specific patterns resolve
//! to the later declaration.

use globset::{Glob, GlobMatcher};
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::schema::AnswerSet;

/// Whether a matched path is included in the output.
pub enum Condition {
    /// Unconditional include/exclude.
    Always(bool),
    /// Evaluated against the answer set.
    When(fn(&AnswerSet) -> bool),
}

/// A pattern-to-condition rule.
pub struct FilterRule {
    pub pattern: String,
    pub condition: Condition,
}

impl FilterRule {
    pub fn always(pattern: &str, include: bool) -> Self {
        Self { pattern: pattern.to_string(), condition: Condition::Always(include) }
    }

    pub fn when(pattern: &str, condition: fn(&AnswerSet) -> bool) -> Self {
        Self { pattern: pattern.to_string(), condition: Condition::When(condition) }
    }
}

/// Structural guard rules applied to every generation run: build
/// artifacts, dependency-install output, coverage output, log files and
/// the local secrets file never reach the output tree. Guards stand
/// outside the specificity ordering; only an authored rule naming the
/// exact same pattern can take precedence over one.
pub fn guard_rules() -> Vec<FilterRule> {
    [
        "node_modules/**",
        ".env",
        "coverage/**",
        "build/**",
        ".nyc_output/**",
        "*.log",
    ]
    .iter()
    .map(|pattern| FilterRule::always(pattern, false))
    .collect()
}

fn wildcard_count(pattern: &str) -> usize {
    pattern.chars().filter(|c| matches!(c, '*' | '?' | '[')).count()
}

struct CompiledRule<'a> {
    matcher: GlobMatcher,
    wildcards: usize,
    index: usize,
    rule: &'a FilterRule,
}

fn compile<'a>(rules: &'a [FilterRule]) -> Result<Vec<CompiledRule<'a>>> {
    rules
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            let glob = Glob::new(&rule.pattern)
                .map_err(|e| Error::PatternError(format!("'{}': {}", rule.pattern, e)))?;
            Ok(CompiledRule {
                matcher: glob.compile_matcher(),
                wildcards: wildcard_count(&rule.pattern),
                index,
                rule,
            })
        })
        .collect()
}

/// Filters template-relative paths through the guard rules and the
/// authored `rules`. A path matching no rule is included.
pub fn filter_tree(
    paths: &[PathBuf],
    rules: &[FilterRule],
    answers: &AnswerSet,
) -> Result<Vec<PathBuf>> {
    let guard_table = guard_rules();
    let guards = compile(&guard_table)?;
    let authored = compile(rules)?;

    let mut included = Vec::new();
    for path in paths {
        if is_included(path, &guards, &authored, answers) {
            included.push(path.clone());
        } else {
            debug!("Filtered out '{}'", path.display());
        }
    }
    Ok(included)
}

fn evaluate(condition: &Condition, answers: &AnswerSet) -> bool {
    match condition {
        Condition::Always(include) => *include,
        Condition::When(condition) => condition(answers),
    }
}

fn is_included(
    path: &Path,
    guards: &[CompiledRule<'_>],
    authored: &[CompiledRule<'_>],
    answers: &AnswerSet,
) -> bool {
    // Guards never compete on specificity: a guarded path stays excluded
    // unless an authored rule names the exact same pattern, in which case
    // the last such rule decides.
    if let Some(guard) = guards.iter().find(|g| g.matcher.is_match(path)) {
        return match authored.iter().rev().find(|r| r.rule.pattern == guard.rule.pattern) {
            Some(overriding) => evaluate(&overriding.rule.condition, answers),
            None => false,
        };
    }

    // Most specific pattern wins; ties go to the later declaration.
    let winner = authored
        .iter()
        .filter(|r| r.matcher.is_match(path))
        .min_by_key(|r| (r.wildcards, usize::MAX - r.index));

    match winner {
        Some(compiled) => evaluate(&compiled.rule.condition, answers),
        None => true,
    }
}
