use thiserror::Error;

/// Errors produced while scanning the document or resolving an address.
///
/// Lookup and type errors carry the address prefix that had been resolved
/// successfully before the failure. Offsets are character offsets into the
/// decoded stream, not byte offsets.
#[derive(Debug, Error)]
pub enum Error {
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { message: String, offset: u64 },

    #[error("key '{key}' not found in object '{address}'")]
    KeyNotFound { key: String, address: String },

    #[error("value at '{address}' is not an object")]
    NotAnObject { address: String },

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("deserialize failed: {0}")]
    Deserialize(String),
}

impl Error {
    pub(crate) fn syntax(message: impl Into<String>, offset: u64) -> Self {
        Self::Syntax {
            message: message.into(),
            offset,
        }
    }

    pub(crate) fn key_not_found(key: impl Into<String>, address: String) -> Self {
        Self::KeyNotFound {
            key: key.into(),
            address,
        }
    }

    pub(crate) fn not_an_object(address: String) -> Self {
        Self::NotAnObject { address }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
