//! # domain-max-core
//!
//! Core services for the domain-max control plane: the credential-at-rest
//! encryption layer and the glue that turns stored credential envelopes
//! into live DNS provider adapters.
//!
//! The provider abstraction itself lives in [`domain_max_provider`] and is
//! re-exported here for convenience.
//!
//! ## Credential envelopes
//!
//! Provider configs are persisted as a single opaque base64 string:
//! `base64( 12-byte nonce || AES-256-GCM ciphertext || 16-byte tag )` of
//! the UTF-8 JSON of the flat config map. See [`crypto::CryptoService`].
//!
//! ```rust
//! use domain_max_core::crypto::CryptoService;
//! use std::collections::HashMap;
//!
//! let crypto = CryptoService::new("master-passphrase");
//! let config: HashMap<String, String> =
//!     [("token".to_string(), "cf-token".to_string())].into();
//!
//! let envelope = crypto.encrypt_json(&config).expect("encrypt");
//! let roundtrip = crypto.decrypt_json(&envelope).expect("decrypt");
//! assert_eq!(roundtrip, config);
//! ```

pub mod crypto;
mod error;
pub mod services;

pub use error::{CoreError, CoreResult};

// Re-export the provider layer
pub use domain_max_provider::{
    provider_features, BatchAddFailure, BatchAddResult, DnsError, DnsProvider, DnsRecord,
    ErrorEnvelope, ProviderConfig, ProviderFactory, ProviderFeatures, ProviderManager,
    RecordType, RegisteredProvider, RetryConfig, SUPPORTED_PROVIDERS,
};
