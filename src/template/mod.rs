pub mod file;
pub mod set;

pub use file::{ContentSource, FileClass, TemplateFile};
pub use set::{TemplateFileSet, ASSETS_DIR};
