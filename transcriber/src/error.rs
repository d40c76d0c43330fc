use derive_more::{Display, From};

#[derive(Debug, Display, From)]
pub enum Error {
    #[from]
    #[display("{_0}")]
    Component(crate::components::ComponentError),

    #[from]
    #[display("{_0}")]
    Transcription(crate::clients::TranscriptionError),

    #[from]
    #[display("IO error: {_0}")]
    Io(std::io::Error),

    #[from]
    #[display("Invalid JSON: {_0}")]
    Json(serde_json::Error),
}

impl std::error::Error for Error {}
