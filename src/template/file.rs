use std::path::{Path, PathBuf};
use std::sync::Arc;

use tera::Context;

use crate::engine::Engine;
use crate::error::{Result, StencilError};

/// Where a file's raw bytes come from.
#[derive(Debug)]
pub enum ContentSource {
    /// Pre-supplied buffer from an in-memory override.
    Memory(Vec<u8>),
    /// Read lazily from `assets_root/relative_path`.
    Disk,
}

/// Expansion policy, fixed at construction.
#[derive(Debug)]
pub enum FileClass {
    /// Content goes through the substitution engine.
    Expandable(ContentSource),
    /// Content is passed through verbatim.
    Opaque(ContentSource),
}

impl FileClass {
    fn source(&self) -> &ContentSource {
        match self {
            FileClass::Expandable(source) | FileClass::Opaque(source) => source,
        }
    }
}

/// Content pipeline state. Transitions are monotonic and each occurs at most
/// once: Unloaded -> Loaded -> Expanded.
#[derive(Debug)]
enum ContentState {
    Unloaded,
    Loaded(Vec<u8>),
    Expanded(Vec<u8>),
}

/// A single file entry in a template: identity, expansion policy, and the
/// lazily-populated content cache.
#[derive(Debug)]
pub struct TemplateFile {
    relative_path: PathBuf,
    assets_root: PathBuf,
    class: FileClass,
    state: ContentState,
    engine: Arc<Engine>,
    context: Arc<Context>,
}

impl TemplateFile {
    pub(crate) fn new(
        relative_path: PathBuf,
        assets_root: PathBuf,
        class: FileClass,
        engine: Arc<Engine>,
        context: Arc<Context>,
    ) -> Self {
        Self {
            relative_path,
            assets_root,
            class,
            state: ContentState::Unloaded,
            engine,
            context,
        }
    }

    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Full on-disk location of the source file. Pure join, no I/O.
    pub fn full_path(&self) -> PathBuf {
        self.assets_root.join(&self.relative_path)
    }

    pub fn is_expandable(&self) -> bool {
        matches!(self.class, FileClass::Expandable(_))
    }

    /// Expanded content of this file.
    ///
    /// The first call loads the raw bytes (override buffer or disk read) and,
    /// for expandable files, runs them through the engine. The result is
    /// cached: repeated calls return the same bytes without further I/O or
    /// engine invocations. Opaque content comes back byte-for-byte unchanged.
    pub fn expand(&mut self) -> Result<&[u8]> {
        if !matches!(self.state, ContentState::Expanded(_)) {
            self.load()?;

            let expanded = match &self.class {
                FileClass::Expandable(_) => {
                    let rendered = {
                        let ContentState::Loaded(bytes) = &self.state else {
                            unreachable!("load() leaves the state Loaded");
                        };
                        let text = std::str::from_utf8(bytes).map_err(|_| {
                            StencilError::TemplateNotUtf8 {
                                path: self.full_path(),
                            }
                        })?;
                        let name = self.relative_path.to_string_lossy();
                        self.engine
                            .render(name.as_ref(), text, &self.context)
                            .map_err(|e| StencilError::Render {
                                path: self.full_path(),
                                source: e,
                            })?
                    };
                    rendered.into_bytes()
                }
                FileClass::Opaque(_) => {
                    let ContentState::Loaded(bytes) =
                        std::mem::replace(&mut self.state, ContentState::Unloaded)
                    else {
                        unreachable!("load() leaves the state Loaded");
                    };
                    bytes
                }
            };

            self.state = ContentState::Expanded(expanded);
        }

        let ContentState::Expanded(bytes) = &self.state else {
            unreachable!("state is Expanded after the block above");
        };
        Ok(bytes)
    }

    /// Write this file under `output_dir`, creating intermediate directories
    /// as needed. Opaque disk files are copied straight from the source so
    /// binary content never touches the expand pipeline.
    pub fn export(&mut self, output_dir: &Path) -> Result<()> {
        let dest = output_dir.join(&self.relative_path);

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StencilError::Io {
                context: format!("creating directory {}", parent.display()),
                source: e,
            })?;
        }

        let copy_verbatim = matches!(
            (&self.class, &self.state),
            (FileClass::Opaque(ContentSource::Disk), ContentState::Unloaded)
        );

        if copy_verbatim {
            std::fs::copy(self.full_path(), &dest).map_err(|e| StencilError::Write {
                path: dest,
                source: e,
            })?;
        } else {
            let content = self.expand()?;
            std::fs::write(&dest, content).map_err(|e| StencilError::Write {
                path: dest,
                source: e,
            })?;
        }

        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        if matches!(self.state, ContentState::Unloaded) {
            let bytes = match self.class.source() {
                ContentSource::Memory(bytes) => bytes.clone(),
                ContentSource::Disk => {
                    let path = self.full_path();
                    std::fs::read(&path)
                        .map_err(|e| StencilError::FileRead { path, source: e })?
                }
            };
            self.state = ContentState::Loaded(bytes);
        }
        Ok(())
    }
}
