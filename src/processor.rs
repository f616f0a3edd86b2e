//! Core generation orchestration.
//!
//! Combines the filter engine, rename table, renderer and transform rules
//! to materialize the output tree from a template tree and an answer set.
//! The pipeline is pure per-file: for a fixed answer set repeated runs
//! produce byte-identical output and an identical sorted listing.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::filter::filter_tree;
use crate::generator::Generator;
use crate::rename::apply_renames;
use crate::renderer::TemplateRenderer;
use crate::schema::AnswerSet;
use crate::transform::apply_transforms;

/// Ensures the output directory is safe to write to.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if the directory exists and
///   `force` is false
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Materializes one generation run.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    output_root: &'a Path,
    answers: &'a AnswerSet,
    generator: &'a Generator,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        output_root: &'a Path,
        answers: &'a AnswerSet,
        generator: &'a Generator,
    ) -> Self {
        Self { engine, template_root, output_root, answers, generator }
    }

    /// Collects the template's file paths relative to the template root,
    /// in a stable order.
    fn template_paths(&self) -> Result<Vec<PathBuf>> {
        if !self.template_root.exists() {
            return Err(Error::TemplateDoesNotExistError {
                template_dir: self.template_root.display().to_string(),
            });
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(self.template_root).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(self.template_root)
                .expect("walked entries live under the template root")
                .to_path_buf();
            paths.push(relative);
        }
        Ok(paths)
    }

    /// Runs filter → rename → render → transform and writes the output
    /// tree. Returns the sorted listing of output-relative paths.
    pub fn materialize(&self) -> Result<Vec<PathBuf>> {
        let paths = self.template_paths()?;
        let surviving = filter_tree(&paths, self.generator.filters(), self.answers)?;
        let mapped = apply_renames(surviving, self.generator.renames());
        let context = self.answers.to_value();

        let mut listing = Vec::new();
        for (source_rel, target_rel) in mapped {
            let source = self.template_root.join(&source_rel);
            let target = self.output_root.join(&target_rel);
            let bytes = fs::read(&source)?;

            match String::from_utf8(bytes) {
                Ok(text) => {
                    let rendered = self.engine.render(&text, &context)?;
                    match apply_transforms(
                        &target_rel,
                        &rendered,
                        self.generator.transforms(),
                        self.answers,
                    )? {
                        Some(content) => {
                            write_file(&target, content.as_bytes())?;
                            debug!("Wrote '{}'", target.display());
                            listing.push(target_rel);
                        }
                        None => debug!("Dropped '{}'", target_rel.display()),
                    }
                }
                Err(raw) => {
                    // Binary files are copied verbatim, exempt from
                    // rendering and transforms.
                    write_file(&target, raw.as_bytes())?;
                    debug!("Copied '{}'", target.display());
                    listing.push(target_rel);
                }
            }
        }

        listing.sort();
        Ok(listing)
    }
}
