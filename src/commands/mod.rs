pub mod check;
pub mod export;
pub mod list;

use std::path::Path;

use stencil::error::{Result, StencilError};

/// Resolve the expansion data for a CLI invocation: an explicit --data file,
/// or the template's test-data.json fixture (empty object when absent).
fn load_data(template_root: &Path, data_file: Option<String>) -> Result<tera::Value> {
    match data_file {
        Some(path) => {
            let content = std::fs::read_to_string(&path).map_err(|e| StencilError::Io {
                context: format!("reading {path}"),
                source: e,
            })?;
            serde_json::from_str(&content).map_err(|e| StencilError::ConfigParse {
                path: path.into(),
                source: e,
            })
        }
        None => stencil::config::load_test_data(template_root),
    }
}
