pub mod check;
pub mod config;
pub mod discover;
pub mod engine;
pub mod error;
pub mod export;
pub mod template;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::engine::{build_context, Engine};
use crate::error::Result;
use crate::template::TemplateFileSet;

pub use crate::error::StencilError;
pub use crate::export::ExportedTemplate;

/// A file supplied by the caller with content already resident. Always
/// expandable, and always wins over a disk-discovered file of the same
/// relative path.
#[derive(Debug, Clone)]
pub struct FileOverride {
    pub relative_path: PathBuf,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct InflateOptions {
    pub overrides: Vec<FileOverride>,
}

#[derive(Debug, Default)]
pub struct ExportOptions {
    /// Allow writing into an existing output directory.
    pub overwrite: bool,
    /// With `overwrite`, remove the existing output directory first.
    pub clean: bool,
    pub overrides: Vec<FileOverride>,
}

/// Discover a template's files and return the populated set without writing
/// anything. `data` must be a JSON object; it becomes the expansion context
/// shared by every file in the set.
pub fn inflate(
    template_root: &Path,
    data: &tera::Value,
    options: InflateOptions,
) -> Result<TemplateFileSet> {
    let engine = Arc::new(Engine::new());
    let context = Arc::new(build_context(data)?);

    let mut set = TemplateFileSet::new(template_root.to_path_buf(), engine, context);
    set.read_files(options.overrides)?;
    Ok(set)
}

/// Expand a template into `output_dir`: enforce the overwrite/clean policy,
/// inflate, then write every file.
pub fn export(
    template_root: &Path,
    data: &tera::Value,
    output_dir: &Path,
    options: ExportOptions,
) -> Result<ExportedTemplate> {
    crate::export::export_template(template_root, data, output_dir, options)
}
