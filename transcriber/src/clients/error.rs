use remote_whisper_dataclasses::ByteStreamError;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("API returned status {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<ByteStreamError> for TranscriptionError {
    fn from(err: ByteStreamError) -> Self {
        match err {
            ByteStreamError::FileNotFound(path) => TranscriptionError::FileNotFound(path),
            ByteStreamError::Io(e) => TranscriptionError::IoError(e),
            other => TranscriptionError::IoError(std::io::Error::other(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formats_correctly() {
        let errors = vec![
            (
                TranscriptionError::FileNotFound("missing.wav".to_string()),
                "missing.wav",
            ),
            (
                TranscriptionError::Request("connection refused".to_string()),
                "connection refused",
            ),
            (
                TranscriptionError::ApiError {
                    status: 401,
                    message: "Invalid API key".to_string(),
                },
                "401",
            ),
            (
                TranscriptionError::InvalidResponse("missing field `text`".to_string()),
                "missing field",
            ),
        ];

        for (err, expected_substring) in errors {
            let display = err.to_string();
            assert!(
                display.contains(expected_substring),
                "Error display '{}' should contain '{}'",
                display,
                expected_substring
            );
        }
    }

    #[test]
    fn test_from_byte_stream_error() {
        let err: TranscriptionError = ByteStreamError::FileNotFound("a.wav".to_string()).into();
        assert!(matches!(err, TranscriptionError::FileNotFound(p) if p == "a.wav"));
    }
}
