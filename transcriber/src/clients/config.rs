use std::fmt;

use secrecy::SecretString;

/// Connection settings for the transcription API
pub struct ApiConfig {
    pub api_key: SecretString,
    /// Sent as the `OpenAI-Organization` header when set
    pub organization: Option<String>,
    /// Base URL without the `/audio/transcriptions` suffix
    pub api_base_url: String,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("organization", &self.organization)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}
