mod client;
mod config;
mod error;
mod openai_client;
mod response_format;

// Re-export public types
pub use client::{TranscriptionClient, TranscriptionRequest};
pub use config::ApiConfig;
pub use error::TranscriptionError;
pub use openai_client::OpenAIClient;
