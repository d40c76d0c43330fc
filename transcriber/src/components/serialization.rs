use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ComponentError;

/// Persisted form of a component: a type discriminator plus the parameters
/// needed to rebuild it. Secrets never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub init_parameters: Map<String, Value>,
}

impl ComponentConfig {
    pub fn new(type_name: impl Into<String>, init_parameters: Map<String, Value>) -> Self {
        Self {
            type_name: type_name.into(),
            init_parameters,
        }
    }

    /// Fail unless this config was produced for `expected`.
    pub fn expect_type(&self, expected: &str) -> Result<(), ComponentError> {
        if self.type_name != expected {
            return Err(ComponentError::Deserialization(format!(
                "expected type '{}', found '{}'",
                expected, self.type_name
            )));
        }
        Ok(())
    }
}

/// A component that round-trips through [`ComponentConfig`].
pub trait Component: Sized {
    /// Fully-qualified name written to the `type` field.
    const TYPE_NAME: &'static str;

    fn to_config(&self) -> ComponentConfig;

    fn from_config(config: ComponentConfig) -> Result<Self, ComponentError>;
}
