//! Where uploaded answer sheets come from.
//!
//! Reading the upload is the only suspension point in an evaluation, so the
//! source trait is async and everything after it is synchronous.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::SubmissionError;

/// An upload that can be read as text.
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    /// Human-readable name for logs and reports.
    fn describe(&self) -> String;

    /// Read the full contents of the upload.
    async fn read_text(&self) -> Result<String, SubmissionError>;
}

/// An answer sheet on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    require_json_extension: bool,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            require_json_extension: false,
        }
    }

    /// Only accept files named `*.json`. The check looks at the name alone.
    pub fn json_only(mut self, enabled: bool) -> Self {
        self.require_json_extension = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SubmissionSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_text(&self) -> Result<String, SubmissionError> {
        if self.require_json_extension
            && !self
                .path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            return Err(SubmissionError::ExtensionRejected(self.path.clone()));
        }

        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|error| SubmissionError::Read {
                source_name: self.describe(),
                error,
            })
    }
}

/// An answer sheet already held in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    name: String,
    content: String,
}

impl InlineSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
impl SubmissionSource for InlineSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    async fn read_text(&self) -> Result<String, SubmissionError> {
        Ok(self.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_source_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"q1":"A"}"#).unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.read_text().await.unwrap(), r#"{"q1":"A"}"#);
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("nope.json"));
        assert!(matches!(
            source.read_text().await,
            Err(SubmissionError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn json_only_filters_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("answers.txt");
        let upper = dir.path().join("ANSWERS.JSON");
        std::fs::write(&txt, "{}").unwrap();
        std::fs::write(&upper, "not even json").unwrap();

        let rejected = FileSource::new(&txt).json_only(true).read_text().await;
        assert!(matches!(
            rejected,
            Err(SubmissionError::ExtensionRejected(_))
        ));

        // Name check only: content is not inspected here.
        let accepted = FileSource::new(&upper).json_only(true).read_text().await;
        assert_eq!(accepted.unwrap(), "not even json");

        // Without the filter any name is accepted.
        assert!(FileSource::new(&txt).read_text().await.is_ok());
    }

    #[tokio::test]
    async fn inline_source() {
        let source = InlineSource::new("stdin", "{}");
        assert_eq!(source.describe(), "stdin");
        assert_eq!(source.read_text().await.unwrap(), "{}");
    }
}
