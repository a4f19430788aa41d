use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BatchAddFailure, BatchAddResult, DnsRecord, ProviderFeatures};

/// Raw API error extracted from a vendor envelope (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Vendor error code, where the envelope carries one.
    pub code: Option<String>,
    /// Vendor error message.
    pub message: String,
    /// Vendor request id, if present.
    pub request_id: Option<String>,
}

impl RawApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }
}

/// Context for mapping vendor errors to the taxonomy (internal).
///
/// Lets adapters fill `NotFound` resources with the domain or record the
/// failed call was about.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub domain: Option<String>,
    pub record_id: Option<String>,
}

impl ErrorContext {
    pub fn domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            record_id: None,
        }
    }

    pub fn record(domain: &str, record_id: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            record_id: Some(record_id.to_string()),
        }
    }
}

/// The capability set every DNS provider adapter implements.
///
/// Adapters are immutable after construction and safe for concurrent use;
/// the only shared mutable state is the underlying HTTP client's connection
/// pool. Callers bound operations with `tokio::time::timeout` when they
/// need a deadline; dropping the future cancels the request client-side
/// but cannot retract a vendor-side effect that was already sent.
#[async_trait]
pub trait DnsProvider: Send + Sync + std::fmt::Debug {
    /// Vendor tag (`"aliyun"`, `"cloudflare"`, ...). Pure.
    fn name(&self) -> &'static str;

    /// Static capability descriptor for this vendor.
    fn features(&self) -> ProviderFeatures {
        crate::factory::provider_features(self.name())
    }

    /// Structural configuration check. Never performs network I/O.
    fn validate_config(&self) -> Result<()>;

    /// Cheapest possible authenticated call (list domains with limit 1, or
    /// fetch user info) to prove the credentials work.
    async fn test_connection(&self) -> Result<()>;

    /// List every record under the apex `domain`, paginating up to the
    /// vendor maximum.
    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>>;

    /// Fetch a single record by vendor id. Vendors without a single-record
    /// endpoint implement this by filtering [`list_records`](Self::list_records).
    async fn get_record(&self, domain: &str, record_id: &str) -> Result<DnsRecord>;

    /// Create a record. The returned record equals the input with the
    /// vendor-assigned id populated; the input id is ignored.
    async fn add_record(&self, domain: &str, record: &DnsRecord) -> Result<DnsRecord>;

    /// Replace a record wholesale: every settable field is sent.
    async fn update_record(&self, domain: &str, record_id: &str, record: &DnsRecord)
        -> Result<()>;

    /// Delete a record by vendor id.
    async fn delete_record(&self, domain: &str, record_id: &str) -> Result<()>;

    /// Add several records, reporting partial success.
    ///
    /// The default implementation commits records one at a time (vendors
    /// without a native batch API), so each sub-record succeeds or fails
    /// independently; every failure is reported with its submission index
    /// alongside the records that were created.
    async fn batch_add_records(
        &self,
        domain: &str,
        records: &[DnsRecord],
    ) -> Result<BatchAddResult> {
        let mut added = Vec::new();
        let mut failures = Vec::new();

        for (index, record) in records.iter().enumerate() {
            match self.add_record(domain, record).await {
                Ok(created) => added.push(created),
                Err(e) => failures.push(BatchAddFailure {
                    index,
                    name: record.normalized_name().to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        Ok(BatchAddResult { added, failures })
    }
}
