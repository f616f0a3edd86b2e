//! Kiln turns a template project tree plus a set of validated answers into
//! a materialized new project directory: it decides which template files
//! survive, what path they land at, how their contents are adjusted, and
//! what side effects run once generation completes.

/// Command-line interface module for the Kiln application
pub mod cli;

/// Error types and handling for the Kiln application
pub mod error;

/// Question schema and answer set types
pub mod schema;

/// Reusable answer validators and naming helpers
pub mod validate;

/// Answer resolution: schema order, defaults, validation
pub mod resolver;

/// User input and interaction handling
pub mod prompt;

/// Persisted per-user answer store
pub mod store;

/// Conditional per-path inclusion of template files
pub mod filter;

/// Exact path-to-path rewrites for packaging-safe filename aliases
pub mod rename;

/// Conditional content rewrites of materialized files
pub mod transform;

/// Post-generation hook sequence and its collaborators
pub mod hooks;

/// The built-in generator definition (prompts, rules, hooks)
pub mod generator;

/// Core generation orchestration
/// Combines all components to materialize the output tree
pub mod processor;

/// Template rendering functionality
pub mod renderer;
