//! Content transform rules.
//!
//! Transforms run after filtering and rename, against the output-relative
//! path. A matching rule receives the file's content parsed as a JSON
//! document and returns replacement content, or drops the file from the
//! output tree entirely. Transform functions are pure over
//! (content, answers): a fixed answer set always yields the same bytes.

use globset::Glob;
use log::debug;
use std::path::Path;

use crate::error::{Error, Result};
use crate::schema::AnswerSet;

/// Result of one transform function.
pub enum Transformed {
    /// Replacement content for the file.
    Content(serde_json::Value),
    /// Remove the file from the output tree even though the filter
    /// included it.
    Drop,
}

pub type TransformFn = fn(serde_json::Value, &AnswerSet) -> Transformed;

/// A pattern-to-function content rule.
pub struct TransformRule {
    pub pattern: String,
    pub transform: TransformFn,
}

impl TransformRule {
    pub fn new(pattern: &str, transform: TransformFn) -> Self {
        Self { pattern: pattern.to_string(), transform }
    }
}

/// Applies every matching rule, in declaration order, to a materialized
/// file. Returns `None` when a rule dropped the file, otherwise the final
/// serialized content. Files matching no rule pass through untouched.
pub fn apply_transforms(
    path: &Path,
    content: &str,
    rules: &[TransformRule],
    answers: &AnswerSet,
) -> Result<Option<String>> {
    let mut matching = Vec::new();
    for rule in rules {
        let glob = Glob::new(&rule.pattern)
            .map_err(|e| Error::PatternError(format!("'{}': {}", rule.pattern, e)))?;
        if glob.compile_matcher().is_match(path) {
            matching.push(rule);
        }
    }

    if matching.is_empty() {
        return Ok(Some(content.to_string()));
    }

    let mut document: serde_json::Value =
        serde_json::from_str(content).map_err(|e| Error::TransformError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    for rule in matching {
        match (rule.transform)(document, answers) {
            Transformed::Content(next) => document = next,
            Transformed::Drop => {
                debug!("Transform dropped '{}'", path.display());
                return Ok(None);
            }
        }
    }

    let mut serialized = serde_json::to_string_pretty(&document).map_err(|e| {
        Error::TransformError { path: path.display().to_string(), message: e.to_string() }
    })?;
    serialized.push('\n');
    Ok(Some(serialized))
}

/// Removes `name` from the manifest's `dependencies` and `devDependencies`
/// tables when present. The remaining keys keep their authored order.
pub fn remove_dependency(manifest: &mut serde_json::Value, name: &str) {
    for table in ["dependencies", "devDependencies"] {
        if let Some(deps) = manifest.get_mut(table).and_then(|v| v.as_object_mut()) {
            if deps.shift_remove(name).is_some() {
                debug!("Removed '{}' from manifest {}", name, table);
            }
        }
    }
}
