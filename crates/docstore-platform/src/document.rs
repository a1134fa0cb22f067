use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use thiserror::Error;

use crate::names;

/// Name carried by the "not found" sentinel document.
pub const NULL_DOCUMENT_NAME: &str = "NullDocument";

/// A named byte payload.
///
/// Documents are immutable once built. An empty name means "no name"; absent
/// data (`None`) is distinct from an empty payload and is never written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    data: Option<Bytes>,
}

impl Document {
    /// The sentinel returned when a lookup finds nothing.
    pub fn null() -> Self {
        Self {
            name: NULL_DOCUMENT_NAME.to_string(),
            data: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Payload length in bytes, 0 when there is no data
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Bytes::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_null(&self) -> bool {
        *self == Self::null()
    }

    /// UTF-8 decoding of the payload. Invalid sequences become U+FFFD and
    /// absent data gives an empty string.
    pub fn to_text(&self) -> String {
        match &self.data {
            Some(data) => String::from_utf8_lossy(data).into_owned(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read document source {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Builds a [`Document`] from bytes, a string, or the contents of a file.
///
/// Set the name first, then the payload. When both a source file and direct
/// bytes are supplied the file wins; it is read when [`build`](Self::build)
/// is called.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    name: Option<String>,
    file: Option<PathBuf>,
    bytes: Option<Bytes>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Use the last segment of `path` as the name. Both `/` and `\` are
    /// treated as separators.
    pub fn with_name_from_path(self, path: &str) -> Self {
        let name = names::file_name_from_path(path).to_string();
        self.with_name(name)
    }

    /// Source the payload from the full contents of `path` at build time.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Set the payload directly. `None` builds a document with no data.
    pub fn with_bytes(mut self, bytes: Option<Bytes>) -> Self {
        self.bytes = bytes;
        self
    }

    pub fn with_string(self, text: &str) -> Self {
        self.with_bytes(Some(Bytes::copy_from_slice(text.as_bytes())))
    }

    pub fn build(self) -> Result<Document, BuildError> {
        let data = match self.file {
            Some(path) => match std::fs::read(&path) {
                Ok(contents) => Some(Bytes::from(contents)),
                Err(source) => return Err(BuildError::ReadFile { path, source }),
            },
            None => self.bytes,
        };

        Ok(Document {
            name: self.name.unwrap_or_default(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_text_bytes_render_as_string() {
        let doc = DocumentBuilder::new()
            .with_name("test.txt")
            .with_bytes(Some(Bytes::from_static(b"a message in a file")))
            .build()
            .unwrap();

        assert_eq!(doc.to_text(), "a message in a file");
        assert_eq!(doc.to_string(), "a message in a file");
    }

    #[test]
    fn test_absent_bytes_render_empty() {
        let doc = DocumentBuilder::new()
            .with_name("test.txt")
            .with_bytes(None)
            .build()
            .unwrap();

        assert!(!doc.has_data());
        assert_eq!(doc.to_text(), "");
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let doc = DocumentBuilder::new()
            .with_name("bin.dat")
            .with_bytes(Some(Bytes::from_static(&[b'o', b'k', 0xFF])))
            .build()
            .unwrap();

        assert_eq!(doc.to_text(), "ok\u{FFFD}");
    }

    #[test]
    fn test_with_string_encodes_utf8() {
        let doc = DocumentBuilder::new()
            .with_name("greeting.txt")
            .with_string("héllo")
            .build()
            .unwrap();

        assert_eq!(doc.data().unwrap().as_ref(), "héllo".as_bytes());
        assert_eq!(doc.len(), 6);
    }

    #[test]
    fn test_name_from_path() {
        let doc = DocumentBuilder::new()
            .with_name_from_path(r"reports\2024/summary.md")
            .with_string("# Summary")
            .build()
            .unwrap();

        assert_eq!(doc.name(), "summary.md");
    }

    #[test]
    fn test_missing_name_is_empty() {
        let doc = DocumentBuilder::new().with_string("x").build().unwrap();
        assert_eq!(doc.name(), "");
    }

    #[test]
    fn test_file_source_wins_over_bytes() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.txt");
        fs::write(&source, b"from disk").unwrap();

        let doc = DocumentBuilder::new()
            .with_name("copy.txt")
            .with_string("from memory")
            .with_file(&source)
            .build()
            .unwrap();

        assert_eq!(doc.to_text(), "from disk");
    }

    #[test]
    fn test_unreadable_file_source_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.txt");

        let result = DocumentBuilder::new()
            .with_name("missing.txt")
            .with_file(&missing)
            .build();

        assert!(matches!(result, Err(BuildError::ReadFile { ref path, .. }) if *path == missing));
    }

    #[test]
    fn test_null_document_sentinel() {
        let null = Document::null();
        assert_eq!(null.name(), NULL_DOCUMENT_NAME);
        assert!(null.data().is_none());
        assert!(null.is_null());
        assert_eq!(null, Document::null());
    }

    #[test]
    fn test_empty_payload_is_not_null() {
        let doc = DocumentBuilder::new()
            .with_name(NULL_DOCUMENT_NAME)
            .with_bytes(Some(Bytes::new()))
            .build()
            .unwrap();

        assert!(doc.has_data());
        assert!(doc.is_empty());
        assert!(!doc.is_null());
    }
}
