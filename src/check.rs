use std::path::Path;

use crate::config::{load_config, TEST_DATA_FILE};
use crate::discover::discover;
use crate::engine::Engine;
use crate::error::{Result, StencilError};
use crate::template::ASSETS_DIR;

/// Result of validating a template directory.
pub struct CheckResult {
    pub expand_count: usize,
    pub pass_through_count: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl CheckResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a template directory without exporting it: structure, config,
/// glob patterns, and the syntax of every expandable file.
pub fn check_template(template_root: &Path) -> Result<CheckResult> {
    if !template_root.is_dir() {
        return Err(StencilError::TemplateRootNotFound {
            path: template_root.to_path_buf(),
        });
    }
    let assets_root = template_root.join(ASSETS_DIR);
    if !assets_root.is_dir() {
        return Err(StencilError::AssetsDirectoryMissing {
            path: template_root.to_path_buf(),
        });
    }

    let config = load_config(template_root)?;
    let discovery = discover(&assets_root, &config)?;

    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    if discovery.expand.is_empty() && discovery.pass_through.is_empty() {
        warnings.push("No files matched under the assets directory".to_string());
    }
    if !template_root.join(TEST_DATA_FILE).exists() {
        warnings.push(format!(
            "No {TEST_DATA_FILE} found; exports from the CLI will use an empty data object"
        ));
    }

    let engine = Engine::new();
    for relative_path in &discovery.expand {
        let full_path = assets_root.join(relative_path);
        let content = match std::fs::read(&full_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                errors.push(format!("Cannot read {}: {e}", relative_path.display()));
                continue;
            }
        };
        let Ok(text) = std::str::from_utf8(&content) else {
            errors.push(format!(
                "{} is not valid UTF-8; add it to 'noExpand' to copy it verbatim",
                relative_path.display()
            ));
            continue;
        };
        let name = relative_path.to_string_lossy();
        if let Err(e) = engine.check_syntax(name.as_ref(), text) {
            errors.push(format!("Template syntax error in {name}: {e}"));
        }
    }

    Ok(CheckResult {
        expand_count: discovery.expand.len(),
        pass_through_count: discovery.pass_through.len(),
        warnings,
        errors,
    })
}
