use std::str::FromStr;

use log::{debug, error, info, warn};
use reqwest::blocking::multipart::{Form, Part};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;

use super::client::{TranscriptionClient, TranscriptionRequest};
use super::config::ApiConfig;
use super::error::TranscriptionError;
use super::response_format::ResponseFormat;

const TRANSCRIPTION_PATH: &str = "/audio/transcriptions";
const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

/// OpenAI Whisper API client
pub struct OpenAIClient {
    config: ApiConfig,
    http: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAIClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::blocking::Client::new(),
        }
    }

    fn transcription_url(&self) -> String {
        format!(
            "{}{}",
            self.config.api_base_url.trim_end_matches('/'),
            TRANSCRIPTION_PATH
        )
    }

    fn add_auth(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        let request = request.bearer_auth(self.config.api_key.expose_secret());
        match &self.config.organization {
            Some(organization) => request.header(ORGANIZATION_HEADER, organization.as_str()),
            None => request,
        }
    }

    fn build_form(&self, request: &TranscriptionRequest<'_>) -> Result<Form, TranscriptionError> {
        let mut audio_part =
            Part::bytes(request.audio.to_vec()).file_name(request.file_name.to_string());
        if let Some(mime_type) = request.mime_type {
            audio_part = audio_part.mime_str(mime_type).map_err(|e| {
                TranscriptionError::Request(format!("Failed to create audio part: {}", e))
            })?;
        }

        let form = Form::new()
            .part("file", audio_part)
            .text("model", request.model.to_string());

        Ok(request
            .params
            .iter()
            .fold(form, |form, (key, value)| append_param(form, key, value)))
    }
}

/// Add one request parameter to the form.
///
/// Strings go in verbatim, other scalars in their JSON rendering, arrays as
/// repeated `key[]` fields. Nulls are dropped.
fn append_param(form: Form, key: &str, value: &Value) -> Form {
    match value {
        Value::Null => form,
        Value::String(s) => form.text(key.to_string(), s.clone()),
        Value::Array(items) => {
            let array_key = format!("{}[]", key);
            items
                .iter()
                .fold(form, |form, item| append_param(form, &array_key, item))
        }
        other => form.text(key.to_string(), other.to_string()),
    }
}

fn response_format(request: &TranscriptionRequest<'_>) -> ResponseFormat {
    match request.params.get("response_format").and_then(Value::as_str) {
        Some(raw) => ResponseFormat::from_str(raw).unwrap_or_else(|_| {
            warn!("Unknown response_format '{}', reading response as JSON", raw);
            ResponseFormat::Json
        }),
        None => ResponseFormat::Json,
    }
}

/// Pull the human-readable message out of an OpenAI error body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.to_string(),
    }
}

fn parse_text(format: ResponseFormat, body: String) -> Result<String, TranscriptionError> {
    if !format.is_json() {
        return Ok(body);
    }

    let parsed: TranscriptionResponse = serde_json::from_str(&body).map_err(|e| {
        error!("Failed to parse response: {}", e);
        TranscriptionError::InvalidResponse(format!("Failed to parse response: {}", e))
    })?;
    Ok(parsed.text)
}

impl TranscriptionClient for OpenAIClient {
    fn transcribe(&self, request: TranscriptionRequest<'_>) -> Result<String, TranscriptionError> {
        let url = self.transcription_url();
        let format = response_format(&request);
        let form = self.build_form(&request)?;

        debug!(
            "Sending {} ({} bytes) to {} with model {}",
            request.file_name,
            request.audio.len(),
            url,
            request.model
        );

        let response = self
            .add_auth(self.http.post(&url))
            .multipart(form)
            .send()
            .map_err(|e| {
                error!("API request error: {}", e);
                TranscriptionError::Request(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| TranscriptionError::InvalidResponse(format!("body: {}", e)))?;

        if !status.is_success() {
            let message = error_message(&body);
            error!("API error response ({}): {}", status, message);
            return Err(TranscriptionError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let text = parse_text(format, body)?;
        info!("Transcription successful: {} characters", text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use serde_json::{json, Map};

    fn client(base_url: &str) -> OpenAIClient {
        OpenAIClient::new(ApiConfig {
            api_key: SecretString::from("test_api_key".to_string()),
            organization: None,
            api_base_url: base_url.to_string(),
        })
    }

    #[test]
    fn test_transcription_url() {
        let test_cases = vec![
            (
                "https://api.openai.com/v1",
                "https://api.openai.com/v1/audio/transcriptions",
            ),
            (
                "https://api.openai.com/v1/",
                "https://api.openai.com/v1/audio/transcriptions",
            ),
            ("test_api_url", "test_api_url/audio/transcriptions"),
        ];

        for (base_url, expected) in test_cases {
            assert_eq!(client(base_url).transcription_url(), expected);
        }
    }

    #[test]
    fn test_error_message_extracts_openai_error() {
        let body = r#"{"error": {"message": "Invalid API key", "type": "invalid_request_error"}}"#;
        assert_eq!(error_message(body), "Invalid API key");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_parse_text_by_format() {
        let json_body = r#"{"text": "test transcription"}"#.to_string();
        assert_eq!(
            parse_text(ResponseFormat::Json, json_body).unwrap(),
            "test transcription"
        );

        let srt_body = "1\n00:00:00,000 --> 00:00:01,000\nhello\n".to_string();
        assert_eq!(
            parse_text(ResponseFormat::Srt, srt_body.clone()).unwrap(),
            srt_body
        );

        let result = parse_text(ResponseFormat::Json, "{}".to_string());
        assert!(matches!(result, Err(TranscriptionError::InvalidResponse(_))));
    }

    #[test]
    fn test_response_format_from_params() {
        let test_cases = vec![
            (json!({}), ResponseFormat::Json),
            (json!({"response_format": "json"}), ResponseFormat::Json),
            (json!({"response_format": "text"}), ResponseFormat::Text),
            (json!({"response_format": "bogus"}), ResponseFormat::Json),
        ];

        for (params, expected) in test_cases {
            let params: Map<String, Value> = params.as_object().cloned().unwrap();
            let request = TranscriptionRequest {
                audio: b"",
                file_name: "a.wav",
                mime_type: None,
                model: "whisper-1",
                params: &params,
            };
            assert_eq!(response_format(&request), expected, "params: {:?}", params);
        }
    }
}
