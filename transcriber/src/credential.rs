//! Process-wide OpenAI API key.
//!
//! Components share one key for the lifetime of the process. Resolution order
//! when a component is built:
//!
//! 1. a non-empty key passed explicitly (also stored in the slot),
//! 2. a non-empty key already in the slot (the environment is not read),
//! 3. a non-empty `OPENAI_API_KEY` environment variable (also stored in the slot).

use std::sync::{PoisonError, RwLock};

use log::debug;
use secrecy::{ExposeSecret, SecretString};

pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

static API_KEY: RwLock<Option<SecretString>> = RwLock::new(None);

fn copy(key: &SecretString) -> SecretString {
    SecretString::from(key.expose_secret().to_string())
}

fn is_set(key: &SecretString) -> bool {
    !key.expose_secret().is_empty()
}

/// Current slot value, if any.
pub fn api_key() -> Option<SecretString> {
    API_KEY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(copy)
}

/// Replace the slot value.
pub fn set_api_key(key: SecretString) {
    *API_KEY.write().unwrap_or_else(PoisonError::into_inner) = Some(key);
}

/// Empty the slot.
pub fn clear_api_key() {
    *API_KEY.write().unwrap_or_else(PoisonError::into_inner) = None;
}

/// Resolve the key a component should use, updating the slot as described in
/// the module docs. Returns `None` when no source yields a non-empty key.
pub fn resolve_api_key(explicit: Option<SecretString>) -> Option<SecretString> {
    if let Some(key) = explicit.filter(is_set) {
        debug!("Using explicitly provided API key");
        set_api_key(copy(&key));
        return Some(key);
    }

    if let Some(key) = api_key().filter(is_set) {
        debug!("Using process-wide API key");
        return Some(key);
    }

    match std::env::var(API_KEY_ENV_VAR) {
        Ok(value) if !value.is_empty() => {
            debug!("Using API key from {}", API_KEY_ENV_VAR);
            let key = SecretString::from(value);
            set_api_key(copy(&key));
            Some(key)
        }
        _ => None,
    }
}

/// Restores `OPENAI_API_KEY` to its prior value when dropped.
#[cfg(test)]
pub(crate) struct EnvKeyGuard(Option<std::ffi::OsString>);

#[cfg(test)]
impl EnvKeyGuard {
    pub(crate) fn new() -> Self {
        Self(std::env::var_os(API_KEY_ENV_VAR))
    }
}

#[cfg(test)]
impl Drop for EnvKeyGuard {
    fn drop(&mut self) {
        match self.0.take() {
            Some(value) => std::env::set_var(API_KEY_ENV_VAR, value),
            None => std::env::remove_var(API_KEY_ENV_VAR),
        }
    }
}
