//! Answer resolution.
//!
//! Walks the question schema in declaration order and produces the
//! immutable [`AnswerSet`] for the run. Resolution happens entirely before
//! any file I/O: a failing validator aborts the run with no partial output.

use log::debug;
use std::io::Read;

use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::schema::{AnswerSet, DefaultValue, Question, QuestionKind};
use crate::store::AnswerStore;

/// Reads a JSON object of preloaded answers from stdin (`--stdin` mode).
pub fn load_overrides_from_stdin() -> Result<serde_json::Value> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(trimmed).map_err(|e| Error::ValidationError {
        question: "stdin".to_string(),
        message: format!("Failed to parse answers as JSON: {}", e),
    })
}

/// Accepts `yes/y/no/n` strings for confirm questions so non-interactive
/// callers may supply human-friendly values.
fn coerce_confirm(value: serde_json::Value) -> serde_json::Value {
    if let Some(s) = value.as_str() {
        match s.to_lowercase().as_str() {
            "yes" | "y" | "true" => return serde_json::Value::Bool(true),
            "no" | "n" | "false" => return serde_json::Value::Bool(false),
            _ => {}
        }
    }
    value
}

fn compute_default(
    question: &Question,
    answers: &AnswerSet,
    store: &dyn AnswerStore,
) -> serde_json::Value {
    if question.persisted {
        if let Some(persisted) = store.get(&question.name) {
            debug!("Using persisted default for '{}'", question.name);
            return persisted;
        }
    }
    match &question.default {
        DefaultValue::Constant(value) => value.clone(),
        DefaultValue::Computed(f) => f(answers),
    }
}

/// Resolves the schema into an [`AnswerSet`].
///
/// For every visible question, in order: compute the default (persisted
/// value first, then the constant/function default), take the override
/// value when one was supplied, otherwise delegate to `prompter`; then run
/// the validator. The first validation failure aborts resolution.
///
/// Accepted values of persisted questions are written back to `store` at
/// resolution end.
pub fn resolve(
    schema: &[Question],
    overrides: &serde_json::Value,
    prompter: &dyn Prompter,
    store: &mut dyn AnswerStore,
) -> Result<AnswerSet> {
    let mut answers = AnswerSet::new();

    for question in schema {
        if let Some(visible) = question.visible {
            if !visible(&answers) {
                debug!("Skipping hidden question '{}'", question.name);
                continue;
            }
        }

        let default = compute_default(question, &answers, store);

        let raw = match overrides.get(&question.name) {
            Some(supplied) => supplied.clone(),
            None => prompter.prompt(question, &default)?,
        };
        let raw = match question.kind {
            QuestionKind::Confirm => coerce_confirm(raw),
            _ => raw,
        };

        if let Some(validate) = question.validate {
            validate(&raw).map_err(|message| Error::ValidationError {
                question: question.name.clone(),
                message,
            })?;
        }

        answers.insert(question.name.clone(), raw);
    }

    for question in schema {
        if question.persisted {
            if let Some(value) = answers.get(&question.name) {
                store.set(&question.name, value.clone());
            }
        }
    }
    store.save()?;

    Ok(answers)
}
