use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tera::Context;

use crate::config::load_config;
use crate::discover::discover;
use crate::engine::Engine;
use crate::error::{Result, StencilError};
use crate::template::file::{ContentSource, FileClass, TemplateFile};
use crate::FileOverride;

pub const ASSETS_DIR: &str = "assets";

/// The populated template: one [`TemplateFile`] per distinct relative path.
///
/// Built by a single discovery pass; the structure is fixed afterwards, only
/// per-file content caches fill in lazily. When an in-memory override and an
/// on-disk file share a relative path, the override wins and the disk entry is
/// never constructed.
#[derive(Debug)]
pub struct TemplateFileSet {
    template_root: PathBuf,
    assets_root: PathBuf,
    files: BTreeMap<PathBuf, TemplateFile>,
    engine: Arc<Engine>,
    context: Arc<Context>,
}

impl TemplateFileSet {
    pub(crate) fn new(template_root: PathBuf, engine: Arc<Engine>, context: Arc<Context>) -> Self {
        let assets_root = template_root.join(ASSETS_DIR);
        Self {
            template_root,
            assets_root,
            files: BTreeMap::new(),
            engine,
            context,
        }
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }

    /// Run the discovery pass and build the file map.
    ///
    /// Insertion order is the precedence contract: overrides first, then
    /// expand-set disk files, then pass-through disk files, with disk entries
    /// skipped when their key is already taken.
    pub(crate) fn read_files(&mut self, overrides: Vec<FileOverride>) -> Result<()> {
        if !self.template_root.is_dir() {
            return Err(StencilError::TemplateRootNotFound {
                path: self.template_root.clone(),
            });
        }
        if !self.assets_root.is_dir() {
            return Err(StencilError::AssetsDirectoryMissing {
                path: self.template_root.clone(),
            });
        }

        let config = load_config(&self.template_root)?;
        let discovery = discover(&self.assets_root, &config)?;

        for file_override in overrides {
            self.insert(
                file_override.relative_path,
                FileClass::Expandable(ContentSource::Memory(file_override.content.into_bytes())),
            );
        }
        for relative_path in discovery.expand {
            self.insert_if_absent(relative_path, FileClass::Expandable(ContentSource::Disk));
        }
        for relative_path in discovery.pass_through {
            self.insert_if_absent(relative_path, FileClass::Opaque(ContentSource::Disk));
        }

        Ok(())
    }

    /// Build a [`TemplateFile`] for `relative_path` and insert it, replacing any
    /// existing entry for that key.
    fn insert(&mut self, relative_path: PathBuf, class: FileClass) {
        let file = TemplateFile::new(
            relative_path.clone(),
            self.assets_root.clone(),
            class,
            Arc::clone(&self.engine),
            Arc::clone(&self.context),
        );
        self.files.insert(relative_path, file);
    }

    /// Like [`insert`](Self::insert), but leaves an existing entry untouched when
    /// the key is already present.
    fn insert_if_absent(&mut self, relative_path: PathBuf, class: FileClass) {
        if !self.files.contains_key(&relative_path) {
            self.insert(relative_path, class);
        }
    }

    /// Exact-match lookup; a missing key is not an error.
    pub fn find(&self, relative_path: impl AsRef<Path>) -> Option<&TemplateFile> {
        self.files.get(relative_path.as_ref())
    }

    pub fn find_mut(&mut self, relative_path: impl AsRef<Path>) -> Option<&mut TemplateFile> {
        self.files.get_mut(relative_path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateFile> {
        self.files.values()
    }

    /// Export every file under `output_dir`. Destinations are distinct, so
    /// order does not affect the result; the first failure aborts.
    pub fn export(&mut self, output_dir: &Path) -> Result<()> {
        for file in self.files.values_mut() {
            file.export(output_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::build_context;
    use std::fs;

    fn make_template(files: &[(&str, &str)], config: Option<&str>) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(ASSETS_DIR).join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
        }
        if let Some(json) = config {
            fs::write(dir.path().join("template.json"), json).unwrap();
        }
        dir
    }

    fn make_set(template_root: &Path, msg: &str) -> TemplateFileSet {
        let data = serde_json::json!({ "msg": msg });
        let context = Arc::new(build_context(&data).unwrap());
        TemplateFileSet::new(template_root.to_path_buf(), Arc::new(Engine::new()), context)
    }

    #[test]
    fn test_missing_template_root_fails_before_discovery() {
        let mut set = make_set(Path::new("/nonexistent/template"), "hi");
        let result = set.read_files(Vec::new());
        assert!(matches!(
            result,
            Err(StencilError::TemplateRootNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_assets_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut set = make_set(dir.path(), "hi");
        let result = set.read_files(Vec::new());
        assert!(matches!(
            result,
            Err(StencilError::AssetsDirectoryMissing { .. })
        ));
    }

    #[test]
    fn test_find_returns_none_for_unknown_path() {
        let dir = make_template(&[("a.txt", "x")], None);
        let mut set = make_set(dir.path(), "hi");
        set.read_files(Vec::new()).unwrap();

        assert!(set.find("a.txt").is_some());
        assert!(set.find("missing.txt").is_none());
    }

    #[test]
    fn test_override_wins_over_disk_file() {
        let dir = make_template(&[("a.txt", "disk: {{msg}}")], None);
        let mut set = make_set(dir.path(), "hi");
        set.read_files(vec![FileOverride {
            relative_path: PathBuf::from("a.txt"),
            content: "memory: {{msg}}".to_string(),
        }])
        .unwrap();

        assert_eq!(set.len(), 1);
        let file = set.find_mut("a.txt").unwrap();
        assert_eq!(file.expand().unwrap(), b"memory: hi");
    }

    #[test]
    fn test_override_without_disk_counterpart_is_included() {
        let dir = make_template(&[("a.txt", "x")], None);
        let mut set = make_set(dir.path(), "hi");
        set.read_files(vec![FileOverride {
            relative_path: PathBuf::from("extra.txt"),
            content: "{{msg}}".to_string(),
        }])
        .unwrap();

        assert_eq!(set.len(), 2);
        let file = set.find_mut("extra.txt").unwrap();
        assert!(file.is_expandable());
        assert_eq!(file.expand().unwrap(), b"hi");
    }

    #[test]
    fn test_classification_follows_config() {
        let dir = make_template(
            &[("a.txt", "x"), ("raw/b.txt", "y")],
            Some(r#"{ "noExpand": "raw/**/*" }"#),
        );
        let mut set = make_set(dir.path(), "hi");
        set.read_files(Vec::new()).unwrap();

        assert!(set.find("a.txt").unwrap().is_expandable());
        assert!(!set.find(Path::new("raw").join("b.txt")).unwrap().is_expandable());
    }

    #[test]
    fn test_bulk_export_writes_every_file() {
        let dir = make_template(&[("a.txt", "A {{msg}}"), ("sub/b.txt", "B {{msg}}")], None);
        let mut set = make_set(dir.path(), "hi");
        set.read_files(Vec::new()).unwrap();

        let out = tempfile::tempdir().unwrap();
        set.export(out.path()).unwrap();

        assert_eq!(
            fs::read_to_string(out.path().join("a.txt")).unwrap(),
            "A hi"
        );
        assert_eq!(
            fs::read_to_string(out.path().join("sub/b.txt")).unwrap(),
            "B hi"
        );
    }
}
