//! Remote Whisper transcription component.
//!
//! [`RemoteWhisperTranscriber`] uploads audio to the OpenAI transcription API
//! and returns one [`Document`] per source. Its configuration round-trips
//! through [`ComponentConfig`] so it can be persisted as JSON; the API key is
//! resolved from the builder, the process-wide slot in [`credential`], or the
//! `OPENAI_API_KEY` environment variable, in that order.

pub mod clients;
pub mod components;
pub mod credential;
mod error;

pub use components::audio::{AudioSource, RemoteWhisperTranscriber, TranscriberOutput};
pub use components::{Component, ComponentConfig, ComponentError};
pub use error::Error;
pub use remote_whisper_dataclasses::{ByteStream, Document};
