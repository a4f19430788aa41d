//! Tencent Cloud DNSPod provider.

mod error;
mod http;
mod provider;
mod sign;
mod types;

use reqwest::Client;

use crate::error::{DnsError, Result};
use crate::providers::common::create_http_client;
use crate::types::ProviderConfig;

pub(crate) use types::{
    CreateRecordResponse, DescribeDomainListResponse, DescribeRecordListResponse,
    EmptyResponse,
};

pub(crate) const DNSPOD_DEFAULT_ENDPOINT: &str = "https://dnspod.tencentcloudapi.com";
pub(crate) const DNSPOD_API_VERSION: &str = "2021-03-23";
pub(crate) const DNSPOD_DEFAULT_REGION: &str = "ap-beijing";
pub(crate) const DNSPOD_SERVICE: &str = "dnspod";
/// DNSPod caps list calls at 3000 items per page.
pub(crate) const DNSPOD_LIST_LIMIT: u32 = 3000;

/// Tencent Cloud DNSPod adapter.
///
/// Authenticates with the TC3-HMAC-SHA256 signature over
/// `api_key` (SecretId) / `api_secret` (SecretKey). Record ids are numeric
/// on the wire and carried as strings in the canonical model.
#[derive(Debug)]
pub struct DnspodProvider {
    pub(crate) config: ProviderConfig,
    pub(crate) endpoint: String,
    pub(crate) client: Client,
}

impl DnspodProvider {
    /// Build an adapter from a frozen config.
    ///
    /// Requires `api_key` and `api_secret`; the endpoint defaults to the
    /// public Tencent Cloud DNSPod API when blank.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(DnsError::ConfigError {
                provider: "dnspod".to_string(),
                detail: "Tencent DNSPod requires api_key and api_secret".to_string(),
            });
        }

        let endpoint = if config.endpoint.is_empty() {
            DNSPOD_DEFAULT_ENDPOINT.to_string()
        } else {
            config.endpoint.trim_end_matches('/').to_string()
        };

        Ok(Self {
            config,
            endpoint,
            client: create_http_client(),
        })
    }

    pub(crate) fn region(&self) -> &str {
        if self.config.region.is_empty() {
            DNSPOD_DEFAULT_REGION
        } else {
            &self.config.region
        }
    }
}
