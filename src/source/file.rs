//! File-based status source.
//!
//! Reads a saved copy of the statistics page, or a plain dump of the
//! status text, from disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{html, StatusSource};
use crate::FetchError;

/// A status source that reads a saved page or text dump.
///
/// If the file is HTML containing the status element, the element's text
/// is used. Anything else is taken as the status text itself.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    element_id: String,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P, element_id: impl Into<String>) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            element_id: element_id.into(),
            description,
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pick the status text out of the file content.
    fn status_text(&self, content: String) -> String {
        match html::element_text(&content, &self.element_id) {
            Some(text) => {
                debug!(element = %self.element_id, "Found status element in saved page");
                text
            }
            None => content,
        }
    }
}

#[async_trait]
impl StatusSource for FileSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(self.status_text(content))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
