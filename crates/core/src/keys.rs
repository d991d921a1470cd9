use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MINECRAFT_NAMESPACE: &str = "minecraft";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Namespace must not be empty")]
    EmptyNamespace,
    #[error("Key must not be empty")]
    EmptyKey,
    #[error("Invalid namespace '{0}': must match [a-z0-9._-]")]
    InvalidNamespace(String),
    #[error("Invalid key '{0}': must match [a-z0-9/._-]")]
    InvalidKey(String),
}

fn is_valid_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '.' | '_' | '-')
}

fn is_valid_key_char(c: char) -> bool {
    is_valid_namespace_char(c) || c == '/'
}

/// A two-part `namespace:key` identifier naming an item or resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacedKey {
    namespace: String,
    key: String,
}

impl NamespacedKey {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Result<Self, KeyError> {
        let namespace = namespace.into();
        let key = key.into();
        if namespace.is_empty() {
            return Err(KeyError::EmptyNamespace);
        }
        if key.is_empty() {
            return Err(KeyError::EmptyKey);
        }
        if !namespace.chars().all(is_valid_namespace_char) {
            return Err(KeyError::InvalidNamespace(namespace));
        }
        if !key.chars().all(is_valid_key_char) {
            return Err(KeyError::InvalidKey(key));
        }
        Ok(Self { namespace, key })
    }

    pub fn minecraft(key: impl Into<String>) -> Result<Self, KeyError> {
        Self::new(MINECRAFT_NAMESPACE, key)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.key)
    }
}

impl FromStr for NamespacedKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, key)) => Self::new(namespace, key),
            None => Self::minecraft(s),
        }
    }
}
