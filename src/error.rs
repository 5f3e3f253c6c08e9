use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum StencilError {
    #[error("Template root not found: {path}")]
    #[diagnostic(help("Check that the template directory exists"))]
    TemplateRootNotFound { path: PathBuf },

    #[error("Template has no assets directory: {path}")]
    #[diagnostic(help("A template root must contain an 'assets/' subdirectory"))]
    AssetsDirectoryMissing { path: PathBuf },

    #[error("Failed to parse {path}")]
    #[diagnostic(help("Check the JSON syntax in your template.json file"))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Glob pattern error: {pattern}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to read template file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template file is not valid UTF-8: {path}")]
    #[diagnostic(help("Add the file to 'noExpand' to copy it verbatim"))]
    TemplateNotUtf8 { path: PathBuf },

    #[error("Failed to expand template file: {path}")]
    #[diagnostic(help("Check the template syntax in the offending file"))]
    Render {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("Output directory already exists: {path}")]
    #[diagnostic(help("Pass --overwrite to write into the existing directory"))]
    OutputExists { path: PathBuf },

    #[error("Failed to write output file: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template data must be a JSON object")]
    #[diagnostic(help("The expansion context is a map of names to values"))]
    InvalidData {
        #[source]
        source: tera::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StencilError>;
