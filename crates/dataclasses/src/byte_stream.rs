//! In-memory binary payload with metadata.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{ByteStreamError, Meta};

/// Raw bytes plus the metadata describing where they came from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ByteStream {
    /// The payload.
    pub data: Vec<u8>,

    /// Free-form metadata. Components read well-known keys such as `file_path`.
    #[serde(default)]
    pub metadata: Meta,

    /// MIME type of the payload, if known.
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl ByteStream {
    /// Create a stream with empty metadata.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            metadata: Meta::new(),
            mime_type: None,
        }
    }

    /// Create a stream carrying the given metadata.
    pub fn with_metadata(data: impl Into<Vec<u8>>, metadata: Meta) -> Self {
        Self {
            data: data.into(),
            metadata,
            mime_type: None,
        }
    }

    /// Set the MIME type.
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Read a whole file into a stream.
    ///
    /// The MIME type is guessed from the extension. No metadata is attached;
    /// callers that want `file_path` set it themselves.
    pub fn from_file_path(path: impl AsRef<Path>) -> Result<Self, ByteStreamError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ByteStreamError::FileNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        let data = std::fs::read(path)?;
        debug!("Read {} bytes from {:?}", data.len(), path);

        Ok(Self {
            data,
            metadata: Meta::new(),
            mime_type: guess_mime_type(path).map(str::to_string),
        })
    }

    /// Create a UTF-8 text stream.
    pub fn from_string(text: &str) -> Self {
        Self::new(text.as_bytes()).mime_type("text/plain")
    }

    /// Write the payload to `path`, replacing any existing file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ByteStreamError> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }
}

/// Map common audio extensions to their MIME types.
pub(crate) fn guess_mime_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "wav" => "audio/wav",
        "mp3" | "mpga" | "mpeg" => "audio/mpeg",
        "m4a" | "mp4" => "audio/mp4",
        "flac" => "audio/flac",
        "ogg" | "oga" => "audio/ogg",
        "webm" => "audio/webm",
        "txt" => "text/plain",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_file_path_reads_bytes_and_guesses_mime() {
        let mut file = tempfile::Builder::new()
            .suffix(".wav")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(b"RIFF....WAVE").expect("Failed to write");

        let stream = ByteStream::from_file_path(file.path()).expect("Should read file");

        assert_eq!(stream.data, b"RIFF....WAVE");
        assert_eq!(stream.mime_type.as_deref(), Some("audio/wav"));
        assert!(stream.metadata.is_empty());
    }

    #[test]
    fn test_from_file_path_missing_file() {
        let result = ByteStream::from_file_path("/tmp/this_file_does_not_exist_12345.wav");
        assert!(
            matches!(result, Err(ByteStreamError::FileNotFound(_))),
            "Expected FileNotFound, got: {:?}",
            result
        );
    }

    #[test]
    fn test_to_file_writes_payload() {
        let stream = ByteStream::from_string("hello");
        let file = NamedTempFile::new().expect("Failed to create temp file");

        stream.to_file(file.path()).expect("Should write file");

        assert_eq!(std::fs::read(file.path()).unwrap(), b"hello");
    }

    #[test]
    fn test_guess_mime_type() {
        let test_cases = vec![
            ("audio.wav", Some("audio/wav")),
            ("AUDIO.MP3", Some("audio/mpeg")),
            ("clip.m4a", Some("audio/mp4")),
            ("clip.webm", Some("audio/webm")),
            ("archive.zip", None),
            ("no_extension", None),
        ];

        for (name, expected) in test_cases {
            assert_eq!(
                guess_mime_type(Path::new(name)),
                expected,
                "Unexpected MIME type for {}",
                name
            );
        }
    }
}
