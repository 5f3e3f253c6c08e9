use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::config::TemplateConfig;
use crate::error::{Result, StencilError};

/// Classification of every file under the assets directory.
///
/// Paths are relative to the assets root. A file matching neither pattern set
/// appears in neither list: a non-default `expand` acts as an include-list.
pub struct Discovery {
    pub expand: Vec<PathBuf>,
    pub pass_through: Vec<PathBuf>,
}

/// Walk the assets directory and classify each file as expandable or
/// pass-through. `noExpand` wins over `expand` for any doubly-matched path.
pub fn discover(assets_root: &Path, config: &TemplateConfig) -> Result<Discovery> {
    let expand_set = PatternMatcher::build(config.expand.as_slice())?;
    let no_expand_set = PatternMatcher::build(config.no_expand.as_slice())?;

    let mut expand = Vec::new();
    let mut pass_through = Vec::new();

    for entry in WalkDir::new(assets_root)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let rel_path = entry
            .path()
            .strip_prefix(assets_root)
            .expect("entry must be under assets_root");
        let rel_str = rel_path.to_string_lossy();

        if no_expand_set.is_match(rel_str.as_ref()) {
            pass_through.push(rel_path.to_path_buf());
        } else if expand_set.is_match(rel_str.as_ref()) {
            expand.push(rel_path.to_path_buf());
        }
    }

    Ok(Discovery {
        expand,
        pass_through,
    })
}

/// A compiled pattern set with `!`-negation support: a path matches when it
/// matches any plain pattern and no negated one.
struct PatternMatcher {
    include: GlobSet,
    negate: GlobSet,
}

impl PatternMatcher {
    fn build(patterns: &[String]) -> Result<Self> {
        let mut include = GlobSetBuilder::new();
        let mut negate = GlobSetBuilder::new();

        for pattern in patterns {
            if let Some(negated) = pattern.strip_prefix('!') {
                negate.add(compile_glob(negated)?);
            } else {
                include.add(compile_glob(pattern)?);
            }
        }

        Ok(Self {
            include: build_glob_set(include)?,
            negate: build_glob_set(negate)?,
        })
    }

    fn is_match(&self, path: &str) -> bool {
        self.include.is_match(path) && !self.negate.is_match(path)
    }
}

fn compile_glob(pattern: &str) -> Result<Glob> {
    Glob::new(pattern).map_err(|e| StencilError::GlobPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

fn build_glob_set(builder: GlobSetBuilder) -> Result<GlobSet> {
    builder.build().map_err(|e| StencilError::GlobPattern {
        pattern: "<combined>".into(),
        source: e,
    })
}
