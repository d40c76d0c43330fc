mod whisper_remote;

pub use whisper_remote::{
    AudioSource, RemoteWhisperTranscriber, RemoteWhisperTranscriberBuilder, TranscriberOutput,
    DEFAULT_API_BASE_URL, DEFAULT_MODEL,
};
