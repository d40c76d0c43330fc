//! Text document produced by components.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Meta;

/// A piece of text plus the metadata of the source it was produced from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Hex SHA-256 over content and metadata. Equal documents share an id.
    pub id: String,

    pub content: Option<String>,

    #[serde(default)]
    pub meta: Meta,
}

impl Document {
    /// Create a document, deriving its id from content and metadata.
    pub fn new(content: impl Into<String>, meta: Meta) -> Self {
        let content = Some(content.into());
        let id = Self::make_id(content.as_deref(), &meta);
        Self { id, content, meta }
    }

    fn make_id(content: Option<&str>, meta: &Meta) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.unwrap_or_default().as_bytes());
        // Map serialization is key-ordered, so the digest is stable.
        hasher.update(serde_json::Value::Object(meta.clone()).to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(path: &str) -> Meta {
        let mut meta = Meta::new();
        meta.insert("file_path".to_string(), json!(path));
        meta
    }

    #[test]
    fn test_id_is_deterministic() {
        let a = Document::new("test transcription", meta("a.wav"));
        let b = Document::new("test transcription", meta("a.wav"));
        assert_eq!(a.id, b.id);
        assert_eq!(a.id.len(), 64);
    }

    #[test]
    fn test_id_depends_on_content_and_meta() {
        let base = Document::new("test transcription", meta("a.wav"));
        let other_content = Document::new("other", meta("a.wav"));
        let other_meta = Document::new("test transcription", meta("b.wav"));

        assert_ne!(base.id, other_content.id);
        assert_ne!(base.id, other_meta.id);
    }

    #[test]
    fn test_serializes_meta_as_object() {
        let doc = Document::new("hello", meta("a.wav"));
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["content"], json!("hello"));
        assert_eq!(value["meta"]["file_path"], json!("a.wav"));
    }
}
