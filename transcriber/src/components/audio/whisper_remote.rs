//! Transcribes audio through the OpenAI Whisper API.
//!
//! [`RemoteWhisperTranscriber`] sends every source to the remote endpoint, one
//! blocking request at a time, and wraps each transcription in a [`Document`]
//! carrying the source's metadata. Nothing is retried: the first failure aborts
//! the batch.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};
use remote_whisper_dataclasses::{ByteStream, Document, Meta};
use secrecy::SecretString;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::clients::{
    ApiConfig, OpenAIClient, TranscriptionClient, TranscriptionError, TranscriptionRequest,
};
use crate::components::{Component, ComponentConfig, ComponentError};
use crate::credential;

pub const DEFAULT_MODEL: &str = "whisper-1";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

const COMPONENT_NAME: &str = "RemoteWhisperTranscriber";
const FALLBACK_FILE_NAME: &str = "__fallback__.wav";
const FILE_PATH_KEY: &str = "file_path";
const RESPONSE_FORMAT_KEY: &str = "response_format";
const DEFAULT_RESPONSE_FORMAT: &str = "json";

// Keys with a dedicated field, or that the client sets itself.
const RESERVED_PARAMS: [&str; 6] = [
    "model_name",
    "api_base_url",
    "organization",
    "api_key",
    "model",
    "file",
];

/// One input to [`RemoteWhisperTranscriber::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSource {
    /// Path given as a plain string.
    Str(String),
    /// Path given as a structured path.
    Path(PathBuf),
    /// Audio already in memory. `metadata["file_path"]` is copied to the document.
    Bytes(ByteStream),
}

impl From<&str> for AudioSource {
    fn from(path: &str) -> Self {
        AudioSource::Str(path.to_string())
    }
}

impl From<String> for AudioSource {
    fn from(path: String) -> Self {
        AudioSource::Str(path)
    }
}

impl From<PathBuf> for AudioSource {
    fn from(path: PathBuf) -> Self {
        AudioSource::Path(path)
    }
}

impl From<&Path> for AudioSource {
    fn from(path: &Path) -> Self {
        AudioSource::Path(path.to_path_buf())
    }
}

impl From<ByteStream> for AudioSource {
    fn from(stream: ByteStream) -> Self {
        AudioSource::Bytes(stream)
    }
}

impl AudioSource {
    /// Load the payload, recording the original path for path sources.
    fn into_stream(self) -> Result<ByteStream, TranscriptionError> {
        match self {
            AudioSource::Str(path) => {
                let mut stream = ByteStream::from_file_path(&path)?;
                stream
                    .metadata
                    .insert(FILE_PATH_KEY.to_string(), Value::String(path));
                Ok(stream)
            }
            AudioSource::Path(path) => {
                let mut stream = ByteStream::from_file_path(&path)?;
                stream.metadata.insert(
                    FILE_PATH_KEY.to_string(),
                    Value::String(path.to_string_lossy().into_owned()),
                );
                Ok(stream)
            }
            AudioSource::Bytes(stream) => Ok(stream),
        }
    }
}

/// Name used for the multipart upload; the API infers the audio format from it.
fn upload_file_name(metadata: &Meta) -> String {
    metadata
        .get(FILE_PATH_KEY)
        .and_then(Value::as_str)
        .and_then(|path| Path::new(path).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}

/// Result of [`RemoteWhisperTranscriber::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriberOutput {
    /// One document per source, in input order.
    pub documents: Vec<Document>,
}

/// Transcribes audio with the OpenAI Whisper API.
///
/// Build it with [`RemoteWhisperTranscriber::builder`]. Persist it with
/// [`Component::to_config`]; the API key is never part of the config.
pub struct RemoteWhisperTranscriber {
    model_name: String,
    organization: Option<String>,
    api_base_url: String,
    whisper_params: Map<String, Value>,
    client: Box<dyn TranscriptionClient>,
}

impl fmt::Debug for RemoteWhisperTranscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteWhisperTranscriber")
            .field("model_name", &self.model_name)
            .field("organization", &self.organization)
            .field("api_base_url", &self.api_base_url)
            .field("whisper_params", &self.whisper_params)
            .finish_non_exhaustive()
    }
}

/// Builder for [`RemoteWhisperTranscriber`].
#[derive(Debug, Default)]
pub struct RemoteWhisperTranscriberBuilder {
    api_key: Option<SecretString>,
    model_name: Option<String>,
    organization: Option<String>,
    api_base_url: Option<String>,
    params: Map<String, Value>,
}

impl RemoteWhisperTranscriberBuilder {
    /// Set the API key. It also replaces the process-wide key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = Some(api_base_url.into());
        self
    }

    /// Add one request parameter such as `language` or `temperature`.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add several request parameters at once.
    pub fn params(mut self, params: Map<String, Value>) -> Self {
        self.params.extend(params);
        self
    }

    /// Resolve the API key and build the transcriber.
    ///
    /// The process-wide key is only touched once the parameters are accepted.
    pub fn build(self) -> Result<RemoteWhisperTranscriber, ComponentError> {
        if let Some(key) = self
            .params
            .keys()
            .find(|key| RESERVED_PARAMS.contains(&key.as_str()))
        {
            return Err(ComponentError::InvalidParameter(format!(
                "'{}' cannot be passed as a request parameter",
                key
            )));
        }

        let api_key =
            credential::resolve_api_key(self.api_key).ok_or(ComponentError::MissingApiKey {
                component: COMPONENT_NAME,
            })?;

        let mut whisper_params = self.params;
        match whisper_params.get(RESPONSE_FORMAT_KEY) {
            None => {
                whisper_params.insert(
                    RESPONSE_FORMAT_KEY.to_string(),
                    Value::String(DEFAULT_RESPONSE_FORMAT.to_string()),
                );
            }
            Some(format) if format.as_str() == Some(DEFAULT_RESPONSE_FORMAT) => {}
            Some(format) => {
                warn!(
                    "{} was given response_format {}; documents will hold the raw response body",
                    COMPONENT_NAME, format
                );
            }
        }

        let model_name = self.model_name.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_base_url = self
            .api_base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let client = OpenAIClient::new(ApiConfig {
            api_key,
            organization: self.organization.clone(),
            api_base_url: api_base_url.clone(),
        });

        Ok(RemoteWhisperTranscriber {
            model_name,
            organization: self.organization,
            api_base_url,
            whisper_params,
            client: Box::new(client),
        })
    }
}

impl RemoteWhisperTranscriber {
    pub fn builder() -> RemoteWhisperTranscriberBuilder {
        RemoteWhisperTranscriberBuilder::default()
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Extra request parameters; always contains `response_format`.
    pub fn whisper_params(&self) -> &Map<String, Value> {
        &self.whisper_params
    }

    /// Replace the client used to reach the API.
    pub fn with_client(mut self, client: Box<dyn TranscriptionClient>) -> Self {
        self.client = client;
        self
    }

    /// Transcribe every source in order, one request each.
    ///
    /// # Returns
    /// * `Ok(TranscriberOutput)` - One document per source, same order
    /// * `Err(TranscriptionError)` - The first failure; later sources are not sent
    pub fn run<I>(&self, sources: I) -> Result<TranscriberOutput, TranscriptionError>
    where
        I: IntoIterator,
        I::Item: Into<AudioSource>,
    {
        let mut documents = Vec::new();

        for source in sources {
            let stream = source.into().into_stream()?;
            let file_name = upload_file_name(&stream.metadata);

            let text = self.client.transcribe(TranscriptionRequest {
                audio: &stream.data,
                file_name: &file_name,
                mime_type: stream.mime_type.as_deref(),
                model: &self.model_name,
                params: &self.whisper_params,
            })?;

            documents.push(Document::new(text, stream.metadata));
        }

        info!("{} transcribed {} sources", COMPONENT_NAME, documents.len());
        Ok(TranscriberOutput { documents })
    }
}

/// Take an optional string entry out of `init_parameters`.
fn take_string(
    params: &mut Map<String, Value>,
    key: &str,
) -> Result<Option<String>, ComponentError> {
    match params.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(other) => Err(ComponentError::Deserialization(format!(
            "'{}' must be a string, found {}",
            key, other
        ))),
    }
}

impl Component for RemoteWhisperTranscriber {
    const TYPE_NAME: &'static str = concat!(module_path!(), "::RemoteWhisperTranscriber");

    fn to_config(&self) -> ComponentConfig {
        let mut init_parameters = Map::new();
        init_parameters.insert("model_name".to_string(), json!(self.model_name));
        init_parameters.insert("api_base_url".to_string(), json!(self.api_base_url));
        init_parameters.insert("organization".to_string(), json!(self.organization));
        init_parameters.extend(self.whisper_params.clone());

        ComponentConfig::new(Self::TYPE_NAME, init_parameters)
    }

    fn from_config(config: ComponentConfig) -> Result<Self, ComponentError> {
        config.expect_type(Self::TYPE_NAME)?;

        let mut params = config.init_parameters;
        let model_name = take_string(&mut params, "model_name")?;
        let api_base_url = take_string(&mut params, "api_base_url")?;
        let organization = take_string(&mut params, "organization")?;

        let mut builder = Self::builder().params(params);
        if let Some(model_name) = model_name {
            builder = builder.model_name(model_name);
        }
        if let Some(api_base_url) = api_base_url {
            builder = builder.api_base_url(api_base_url);
        }
        if let Some(organization) = organization {
            builder = builder.organization(organization);
        }

        builder.build()
    }
}
