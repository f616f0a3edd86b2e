//! Question schema and answer set types.
//!
//! A generator definition declares an ordered list of [`Question`]s. The
//! resolver walks them in declaration order, so a later question's default
//! or visibility function may only read answers that were recorded earlier.

use indexmap::IndexMap;
use serde::Serialize;

/// Computes a default value from the answers resolved so far.
pub type DefaultFn = fn(&AnswerSet) -> serde_json::Value;

/// Validates a raw answer. Anything other than `Ok(())` is a
/// human-readable error message shown to the user verbatim.
pub type ValidateFn = fn(&serde_json::Value) -> std::result::Result<(), String>;

/// Decides whether a question is asked at all for this run.
pub type VisibleFn = fn(&AnswerSet) -> bool;

/// How a question is rendered by the prompter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free-form text input.
    Text,
    /// Yes/no confirmation.
    Confirm,
    /// Pick one value from `choices`.
    SingleChoice,
}

/// Default value of a question: a constant, or derived from earlier answers.
pub enum DefaultValue {
    Constant(serde_json::Value),
    Computed(DefaultFn),
}

/// A single prompt definition.
///
/// Question names must be unique across a schema; the resolver records each
/// accepted value under its name.
pub struct Question {
    pub name: String,
    pub message: String,
    pub kind: QuestionKind,
    pub choices: Vec<String>,
    pub default: DefaultValue,
    pub validate: Option<ValidateFn>,
    pub visible: Option<VisibleFn>,
    /// Persisted questions read their default from the per-user answer
    /// store and write the accepted value back at resolution end.
    pub persisted: bool,
}

impl Question {
    pub fn text(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind: QuestionKind::Text,
            choices: Vec::new(),
            default: DefaultValue::Constant(serde_json::Value::String(String::new())),
            validate: None,
            visible: None,
            persisted: false,
        }
    }

    pub fn confirm(name: &str, message: &str, default: bool) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind: QuestionKind::Confirm,
            choices: Vec::new(),
            default: DefaultValue::Constant(serde_json::Value::Bool(default)),
            validate: None,
            visible: None,
            persisted: false,
        }
    }

    pub fn single_choice(name: &str, message: &str, choices: &[&str], default: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind: QuestionKind::SingleChoice,
            choices: choices.iter().map(|c| c.to_string()).collect(),
            default: DefaultValue::Constant(serde_json::Value::String(default.to_string())),
            validate: None,
            visible: None,
            persisted: false,
        }
    }

    pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = DefaultValue::Constant(value.into());
        self
    }

    pub fn default_fn(mut self, f: DefaultFn) -> Self {
        self.default = DefaultValue::Computed(f);
        self
    }

    pub fn validate(mut self, f: ValidateFn) -> Self {
        self.validate = Some(f);
        self
    }

    pub fn visible_if(mut self, f: VisibleFn) -> Self {
        self.visible = Some(f);
        self
    }

    pub fn persisted(mut self) -> Self {
        self.persisted = true;
        self
    }
}

/// The resolved answers of one generation run.
///
/// Built incrementally by the resolver in question order; once handed to
/// the filter/transform/hook phases it is never mutated again. Insertion
/// order is preserved so the rendering context is stable across runs.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: IndexMap<String, serde_json::Value>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: String, value: serde_json::Value) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.values.get(name)
    }

    /// String answer under `name`, or the empty string when absent or not
    /// a string.
    pub fn str(&self, name: &str) -> &str {
        self.values.get(name).and_then(|v| v.as_str()).unwrap_or("")
    }

    /// Boolean answer under `name`. A skipped or missing question reads as
    /// `false`, so declined-feature rules treat unasked toggles as declined.
    pub fn bool(&self, name: &str) -> bool {
        self.values.get(name).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.values.iter()
    }

    /// The answers as a JSON object, used as the template rendering context.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        )
    }
}
