//! Stub adapter for vendors whose integration is not yet written.
//!
//! The supported-tag set is closed; tags without a real integration still
//! construct so the surface stays uniform, but every operation (including
//! the structural config check) reports `NotImplemented`.

use async_trait::async_trait;

use crate::error::{DnsError, Result};
use crate::traits::DnsProvider;
use crate::types::{DnsRecord, ProviderConfig};

/// Placeholder adapter carrying only its vendor tag.
#[derive(Debug)]
pub struct UnimplementedProvider {
    tag: &'static str,
    #[allow(dead_code)]
    config: ProviderConfig,
}

impl UnimplementedProvider {
    /// Construct a stub for the given tag. Always succeeds.
    #[must_use]
    pub fn new(tag: &'static str, config: ProviderConfig) -> Self {
        Self { tag, config }
    }

    fn unimplemented(&self) -> DnsError {
        DnsError::NotImplemented {
            provider: self.tag.to_string(),
        }
    }
}

#[async_trait]
impl DnsProvider for UnimplementedProvider {
    fn name(&self) -> &'static str {
        self.tag
    }

    fn validate_config(&self) -> Result<()> {
        Err(self.unimplemented())
    }

    async fn test_connection(&self) -> Result<()> {
        Err(self.unimplemented())
    }

    async fn list_records(&self, _domain: &str) -> Result<Vec<DnsRecord>> {
        Err(self.unimplemented())
    }

    async fn get_record(&self, _domain: &str, _record_id: &str) -> Result<DnsRecord> {
        Err(self.unimplemented())
    }

    async fn add_record(&self, _domain: &str, _record: &DnsRecord) -> Result<DnsRecord> {
        Err(self.unimplemented())
    }

    async fn update_record(
        &self,
        _domain: &str,
        _record_id: &str,
        _record: &DnsRecord,
    ) -> Result<()> {
        Err(self.unimplemented())
    }

    async fn delete_record(&self, _domain: &str, _record_id: &str) -> Result<()> {
        Err(self.unimplemented())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_operation_reports_not_implemented() {
        let provider = UnimplementedProvider::new("huawei", ProviderConfig::default());
        assert_eq!(provider.name(), "huawei");

        let res = provider.validate_config();
        assert!(
            matches!(&res, Err(DnsError::NotImplemented { provider }) if provider == "huawei"),
            "unexpected result: {res:?}"
        );

        let res = provider.test_connection().await;
        assert!(matches!(&res, Err(DnsError::NotImplemented { .. })));

        let res = provider.list_records("example.com").await;
        assert!(matches!(&res, Err(DnsError::NotImplemented { .. })));
    }
}
