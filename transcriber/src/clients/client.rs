use serde_json::{Map, Value};

use super::error::TranscriptionError;

/// One audio payload plus everything the endpoint needs to transcribe it
#[derive(Debug, Clone, Copy)]
pub struct TranscriptionRequest<'a> {
    pub audio: &'a [u8],
    /// File name reported in the multipart upload; the API uses its extension
    pub file_name: &'a str,
    pub mime_type: Option<&'a str>,
    pub model: &'a str,
    /// Extra request parameters (language, prompt, response_format, ...)
    pub params: &'a Map<String, Value>,
}

/// Trait for transcription API clients
///
/// Each implementation knows how to:
/// - Construct the correct API URL
/// - Add proper authentication headers
/// - Build the request with provider-specific fields
/// - Extract the transcribed text from the response
pub trait TranscriptionClient: Send + Sync {
    /// Send one request and return the transcribed text
    fn transcribe(&self, request: TranscriptionRequest<'_>) -> Result<String, TranscriptionError>;
}
