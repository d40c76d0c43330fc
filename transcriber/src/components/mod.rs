//! Components that can be configured, persisted and run.

pub mod audio;
mod error;
mod serialization;

pub use error::ComponentError;
pub use serialization::{Component, ComponentConfig};
