//! Credential lifecycle: sealing configs into envelopes, opening them back
//! up, and turning `(tag, envelope)` pairs into live adapters.

use std::collections::HashMap;
use std::sync::Arc;

use domain_max_provider::{DnsProvider, ProviderFactory, ProviderManager};

use crate::crypto::CryptoService;
use crate::error::CoreResult;

/// Bridges the crypto layer and the provider factory.
///
/// Storage keeps only the opaque envelope string; at request time the
/// envelope is opened into the flat config map and handed to the factory.
/// Plaintext configs never persist and never log.
pub struct CredentialService {
    crypto: CryptoService,
    factory: ProviderFactory,
}

impl CredentialService {
    /// Service over a passphrase-derived key and a default factory.
    #[must_use]
    pub fn new(passphrase: &str) -> Self {
        Self {
            crypto: CryptoService::new(passphrase),
            factory: ProviderFactory::new(),
        }
    }

    /// Service with a pre-configured factory (custom retry policy).
    #[must_use]
    pub fn with_factory(passphrase: &str, factory: ProviderFactory) -> Self {
        Self {
            crypto: CryptoService::new(passphrase),
            factory,
        }
    }

    /// Encrypt a flat config map into the storage envelope.
    pub fn seal_config(&self, config: &HashMap<String, String>) -> CoreResult<String> {
        self.crypto.encrypt_json(config)
    }

    /// Decrypt a storage envelope back into the flat config map.
    pub fn open_config(&self, envelope: &str) -> CoreResult<HashMap<String, String>> {
        self.crypto.decrypt_json(envelope)
    }

    /// Open an envelope and construct a live adapter from it.
    pub fn provider_from_envelope(
        &self,
        provider_type: &str,
        envelope: &str,
    ) -> CoreResult<Arc<dyn DnsProvider>> {
        let config = self.open_config(envelope)?;
        let provider = self.factory.create_provider(provider_type, &config)?;
        provider.validate_config()?;
        Ok(provider)
    }

    /// Open an envelope and register the adapter under `name` in the given
    /// manager.
    pub fn register_from_envelope(
        &self,
        manager: &ProviderManager,
        name: &str,
        provider_type: &str,
        envelope: &str,
    ) -> CoreResult<()> {
        let config = self.open_config(envelope)?;
        manager.register(name, provider_type, &config)?;
        Ok(())
    }
}
