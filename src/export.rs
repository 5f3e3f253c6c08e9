use std::path::{Path, PathBuf};

use crate::error::{Result, StencilError};
use crate::template::TemplateFileSet;
use crate::{inflate, ExportOptions, InflateOptions};

/// The result of a completed export.
pub struct ExportedTemplate {
    pub output_dir: PathBuf,
    pub files_rendered: Vec<PathBuf>,
    pub files_copied: Vec<PathBuf>,
}

/// Run the full export: output-directory policy, discovery, then every file.
pub(crate) fn export_template(
    template_root: &Path,
    data: &tera::Value,
    output_dir: &Path,
    options: ExportOptions,
) -> Result<ExportedTemplate> {
    prepare_output_dir(output_dir, options.overwrite, options.clean)?;

    let mut set = inflate(
        template_root,
        data,
        InflateOptions {
            overrides: options.overrides,
        },
    )?;
    set.export(output_dir)?;

    Ok(summarize(&set, output_dir))
}

/// Enforce the overwrite/clean policy before anything is written.
///
/// An existing output directory without `overwrite` fails untouched. With
/// `overwrite` and `clean` the whole tree is removed first; with `overwrite`
/// alone the export merges into the existing tree.
fn prepare_output_dir(output_dir: &Path, overwrite: bool, clean: bool) -> Result<()> {
    if output_dir.exists() {
        if !overwrite {
            return Err(StencilError::OutputExists {
                path: output_dir.to_path_buf(),
            });
        }
        if clean {
            std::fs::remove_dir_all(output_dir).map_err(|e| StencilError::Io {
                context: format!("cleaning output directory {}", output_dir.display()),
                source: e,
            })?;
        }
    }

    std::fs::create_dir_all(output_dir).map_err(|e| StencilError::Io {
        context: format!("creating output directory {}", output_dir.display()),
        source: e,
    })
}

fn summarize(set: &TemplateFileSet, output_dir: &Path) -> ExportedTemplate {
    let mut files_rendered = Vec::new();
    let mut files_copied = Vec::new();
    for file in set.iter() {
        if file.is_expandable() {
            files_rendered.push(file.relative_path().to_path_buf());
        } else {
            files_copied.push(file.relative_path().to_path_buf());
        }
    }
    ExportedTemplate {
        output_dir: output_dir.to_path_buf(),
        files_rendered,
        files_copied,
    }
}
