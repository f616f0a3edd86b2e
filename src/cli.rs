//! Command-line interface implementation for Kiln.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for Kiln.
#[derive(Parser, Debug)]
#[command(author, version, about = "Kiln: opinionated project scaffolding tool", long_about = None)]
pub struct Args {
    /// Name of the project to generate; also the output directory name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Path to the template tree
    #[arg(short, long, value_name = "DIR", default_value = "template")]
    pub template: PathBuf,

    /// Force overwrite of an existing output directory
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Read a JSON object of answers from stdin instead of prompting.
    /// Questions missing from the object fall back to their defaults.
    #[arg(short, long)]
    pub stdin: bool,

    /// Skip the post-generation hooks (repository init, dependency
    /// install, tips).
    #[arg(long)]
    pub skip_hooks: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
