//! Core-layer error type.

use serde::Serialize;
use thiserror::Error;

// Re-export the provider taxonomy for downstream convenience
pub use domain_max_provider::{DnsError, ErrorEnvelope};

/// Errors produced by the core services: the provider taxonomy plus the
/// credential-envelope concerns layered on top of it.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// AEAD verification failed or the envelope is malformed.
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// A credential blob could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error surfaced from the provider layer.
    #[error("{0}")]
    Provider(#[from] DnsError),
}

impl CoreError {
    /// Taxonomy kind for the canonical error envelope.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Crypto(_) => "CryptoError",
            Self::Serialization(_) => "ValidationError",
            Self::Provider(e) => e.kind(),
        }
    }

    /// Build the canonical `{error, code, message}` envelope.
    #[must_use]
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            Self::Provider(e) => e.envelope(),
            Self::Crypto(_) => ErrorEnvelope {
                error: "credential decryption failed".to_string(),
                code: self.kind().to_string(),
                message: self.to_string(),
            },
            Self::Serialization(_) => ErrorEnvelope {
                error: "malformed credential data".to_string(),
                code: self.kind().to_string(),
                message: self.to_string(),
            },
        }
    }

    /// Whether this is expected behavior, used for log leveling.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Crypto(_) | Self::Serialization(_) => false,
            Self::Provider(e) => e.is_expected(),
        }
    }
}

/// Convenience alias for `Result<T, CoreError>`.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
