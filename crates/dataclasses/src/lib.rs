//! Value types exchanged between remote-whisper components.
//!
//! A [`ByteStream`] carries raw bytes plus a free-form metadata mapping, and a
//! [`Document`] carries text produced by a component together with the
//! metadata of the source it came from.
//!
//! # Example
//!
//! ```no_run
//! use remote_whisper_dataclasses::{ByteStream, Document};
//!
//! fn main() -> Result<(), remote_whisper_dataclasses::ByteStreamError> {
//!     let stream = ByteStream::from_file_path("answer.wav")?;
//!     let doc = Document::new("answer.", stream.metadata.clone());
//!     println!("{} -> {:?}", doc.id, doc.content);
//!     Ok(())
//! }
//! ```

mod byte_stream;
mod document;

use thiserror::Error;

pub use byte_stream::ByteStream;
pub use document::Document;

/// Free-form metadata attached to streams and documents.
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// Errors that can occur when moving a [`ByteStream`] to or from disk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ByteStreamError {
    /// The source file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Reading or writing the file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
