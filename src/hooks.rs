//! Post-generation hook sequence.
//!
//! Hooks run strictly in order, only after the output tree is fully
//! materialized. Each step receives an explicit [`GenerationContext`] with
//! the output directory, the answers, and the collaborator handles. A
//! fatal step's failure aborts the remaining steps; a non-fatal failure is
//! recorded in the outcome and logged. Materialized files are never rolled
//! back by a hook failure.

use log::warn;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::schema::AnswerSet;

/// Version-control collaborator: initializes a repository in the output
/// directory.
pub trait VersionControl {
    fn init(&self, dir: &Path) -> Result<()>;
}

/// git2-backed repository initialization.
#[derive(Debug, Default)]
pub struct GitVersionControl;

impl VersionControl for GitVersionControl {
    fn init(&self, dir: &Path) -> Result<()> {
        git2::Repository::init(dir)?;
        Ok(())
    }
}

/// Package-manager collaborator: installs dependencies with the chosen
/// client.
pub trait PackageManager {
    fn install(&self, dir: &Path, client: &str) -> Result<()>;
}

/// Spawns the chosen package-manager client as a child process and waits
/// for it to finish.
#[derive(Debug, Default)]
pub struct CommandPackageManager;

impl PackageManager for CommandPackageManager {
    fn install(&self, dir: &Path, client: &str) -> Result<()> {
        let status = Command::new(client).arg("install").current_dir(dir).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::HookError {
                hook: "install-dependencies".to_string(),
                message: format!("'{} install' exited with {}", client, status),
            })
        }
    }
}

/// Everything a hook may touch, passed explicitly to every step.
pub struct GenerationContext<'a> {
    pub output_dir: PathBuf,
    pub answers: &'a AnswerSet,
    pub vcs: &'a dyn VersionControl,
    pub package_manager: &'a dyn PackageManager,
}

pub type HookFn = fn(&GenerationContext) -> Result<()>;

/// One ordered post-generation step.
pub struct HookStep {
    pub name: &'static str,
    pub run: HookFn,
    /// Fatal steps abort the remaining sequence on failure.
    pub fatal: bool,
}

/// Collected results of a hook sequence run.
#[derive(Debug, Default)]
pub struct HookOutcome {
    pub completed: Vec<&'static str>,
    /// Non-fatal failures as (step name, message).
    pub failed: Vec<(&'static str, String)>,
}

/// Executes `steps` in order. No step begins before the previous one's
/// outcome is known.
pub fn run_hooks(steps: &[HookStep], ctx: &GenerationContext) -> Result<HookOutcome> {
    let mut outcome = HookOutcome::default();

    for step in steps {
        match (step.run)(ctx) {
            Ok(()) => outcome.completed.push(step.name),
            Err(e) if step.fatal => {
                return Err(Error::GenerationAborted {
                    hook: step.name.to_string(),
                    message: e.to_string(),
                });
            }
            Err(e) => {
                warn!("Hook '{}' failed: {}", step.name, e);
                outcome.failed.push((step.name, e.to_string()));
            }
        }
    }

    Ok(outcome)
}
