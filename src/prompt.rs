//! User input and interaction handling.
//!
//! The resolver talks to the terminal through the [`Prompter`] trait; the
//! production implementation renders questions with dialoguer. Tests supply
//! scripted implementations instead of driving a real terminal.

use dialoguer::{Confirm, Input, Select};

use crate::error::{Error, Result};
use crate::schema::{Question, QuestionKind};

/// Renders a question and returns the raw user input.
///
/// Validation is the resolver's responsibility, not the prompter's.
pub trait Prompter {
    fn prompt(&self, question: &Question, default: &serde_json::Value)
        -> Result<serde_json::Value>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }

    fn prompt_text(
        &self,
        question: &Question,
        default: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let default_value = default.as_str().unwrap_or("").to_string();
        let input: String = Input::new()
            .with_prompt(&question.message)
            .default(default_value)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))?;
        Ok(serde_json::Value::String(input))
    }

    fn prompt_confirm(
        &self,
        question: &Question,
        default: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let default_value = default.as_bool().unwrap_or(false);
        let result = Confirm::new()
            .with_prompt(&question.message)
            .default(default_value)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))?;
        Ok(serde_json::Value::Bool(result))
    }

    fn prompt_selection(
        &self,
        question: &Question,
        default: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let default_index = default
            .as_str()
            .and_then(|d| question.choices.iter().position(|choice| choice == d))
            .unwrap_or(0);
        let selection = Select::new()
            .with_prompt(&question.message)
            .default(default_index)
            .items(&question.choices)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))?;
        Ok(serde_json::Value::String(question.choices[selection].clone()))
    }
}

impl Prompter for DialoguerPrompter {
    fn prompt(
        &self,
        question: &Question,
        default: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        match question.kind {
            QuestionKind::Text => self.prompt_text(question, default),
            QuestionKind::Confirm => self.prompt_confirm(question, default),
            QuestionKind::SingleChoice => self.prompt_selection(question, default),
        }
    }
}

/// Prompter that accepts every computed default unchanged. Used when every
/// remaining answer should fall through to its default (non-interactive
/// runs with a partial override set).
#[derive(Debug, Default)]
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn prompt(
        &self,
        _question: &Question,
        default: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        Ok(default.clone())
    }
}
