#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    #[error("{component} expects an OpenAI API key. Set the OPENAI_API_KEY environment variable (recommended) or pass it explicitly.")]
    MissingApiKey { component: &'static str },
    #[error("Failed to deserialize component: {0}")]
    Deserialization(String),
    #[error("Invalid init parameter: {0}")]
    InvalidParameter(String),
}
