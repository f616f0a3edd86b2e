//! Error handling for the Kiln application.
//! Defines the error type and result alias used throughout the application.

use std::io;
use thiserror::Error;

/// Error types for Kiln operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem failures while reading the template tree or writing the
    /// output tree. Never retried.
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A question's validator rejected the supplied value. Raised before
    /// any file is written; the message is surfaced verbatim.
    #[error("Invalid answer for '{question}': {message}")]
    ValidationError { question: String, message: String },

    /// Template rendering failures.
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// The template directory given on the command line does not exist.
    #[error("Template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistError { template_dir: String },

    /// The output directory already exists and --force was not given.
    #[error("Output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    /// An authored glob pattern in a filter or transform rule is invalid.
    #[error("Pattern error: {0}.")]
    PatternError(String),

    /// A transform rule matched a file whose content could not be parsed.
    #[error("Transform error in '{path}': {message}.")]
    TransformError { path: String, message: String },

    /// Failures while interacting with the terminal prompter.
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// A non-fatal hook's failure, reported inside the hook outcome.
    #[error("Hook '{hook}' failed: {message}.")]
    HookError { hook: String, message: String },

    /// A fatal hook failed; the remaining hooks were not executed. The
    /// already-materialized output tree is left intact.
    #[error("Generation aborted: hook '{hook}' failed: {message}.")]
    GenerationAborted { hook: String, message: String },

    /// Repository operations (init, config reads).
    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),
}

/// Convenience type alias for Results with Kiln's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}
