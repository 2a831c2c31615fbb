use anyhow::Context;
use askama::Template;
use std::path::{Path, PathBuf};

/// A generated file, held in memory until the pipeline writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path relative to the output root
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    /// Non-empty contents always end with a newline.
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let mut contents = contents.into();
        if !contents.is_empty() && !contents.ends_with('\n') {
            contents.push('\n');
        }
        Self {
            path: path.into(),
            contents,
        }
    }

    /// An empty file, e.g. a package marker.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self::new(path, String::new())
    }

    pub fn render<T: Template>(path: impl AsRef<Path>, template: &T) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = template
            .render()
            .with_context(|| format!("Failed to render template for {}", path.display()))?;
        Ok(Self::new(path, contents))
    }
}
