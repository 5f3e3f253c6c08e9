use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StencilError};

pub const CONFIG_FILE: &str = "template.json";
pub const TEST_DATA_FILE: &str = "test-data.json";

/// Template configuration, read from `template.json` at the template root.
///
/// Both pattern fields accept a single string or an array of strings and are
/// matched relative to the assets directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    /// Files to run through the substitution engine.
    #[serde(default = "default_expand")]
    pub expand: Patterns,

    /// Files to copy verbatim. Wins over `expand` for any path matching both.
    #[serde(default)]
    pub no_expand: Patterns,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            expand: default_expand(),
            no_expand: Patterns::default(),
        }
    }
}

fn default_expand() -> Patterns {
    Patterns::One("**/*".to_string())
}

/// One glob pattern or several.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Patterns {
    One(String),
    Many(Vec<String>),
}

impl Default for Patterns {
    fn default() -> Self {
        Patterns::Many(Vec::new())
    }
}

impl Patterns {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Patterns::One(pattern) => std::slice::from_ref(pattern),
            Patterns::Many(patterns) => patterns,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// Load the TemplateConfig from a template root.
///
/// A missing `template.json` means "use defaults"; malformed JSON is an error.
pub fn load_config(template_root: &Path) -> Result<TemplateConfig> {
    let config_path = template_root.join(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(TemplateConfig::default());
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| StencilError::Io {
        context: format!("reading {}", config_path.display()),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| StencilError::ConfigParse {
        path: config_path,
        source: e,
    })
}

/// Load the sample data object from `test-data.json` at the template root.
///
/// Missing file means an empty object, so a data-free template still expands.
pub fn load_test_data(template_root: &Path) -> Result<tera::Value> {
    let data_path = template_root.join(TEST_DATA_FILE);

    if !data_path.exists() {
        return Ok(tera::Value::Object(serde_json::Map::new()));
    }

    let content = std::fs::read_to_string(&data_path).map_err(|e| StencilError::Io {
        context: format!("reading {}", data_path.display()),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| StencilError::ConfigParse {
        path: data_path,
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_config_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.expand.as_slice(), ["**/*"]);
        assert!(config.no_expand.is_empty());
    }

    #[test]
    fn test_single_pattern_string() {
        let config: TemplateConfig =
            serde_json::from_str(r#"{ "noExpand": "_no_expand_/**/*" }"#).unwrap();
        assert_eq!(config.no_expand.as_slice(), ["_no_expand_/**/*"]);
        assert_eq!(config.expand.as_slice(), ["**/*"]);
    }

    #[test]
    fn test_pattern_array() {
        let config: TemplateConfig =
            serde_json::from_str(r#"{ "expand": ["src/**/*", "docs/**/*.md"] }"#).unwrap();
        assert_eq!(config.expand.as_slice(), ["src/**/*", "docs/**/*.md"]);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();

        let result = load_config(dir.path());
        assert!(matches!(result, Err(StencilError::ConfigParse { .. })));
    }

    #[test]
    fn test_test_data_defaults_to_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let data = load_test_data(dir.path()).unwrap();
        assert_eq!(data, tera::Value::Object(serde_json::Map::new()));
    }
}
