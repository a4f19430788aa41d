//! Aliyun DNS provider.

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
    AddDomainRecordResponse, DeleteDomainRecordResponse, DescribeDomainRecordInfoResponse,
    DescribeDomainRecordsResponse, DescribeDomainsResponse, UpdateDomainRecordResponse,
};

pub(crate) const ALIYUN_DEFAULT_ENDPOINT: &str = "https://alidns.aliyuncs.com";
pub(crate) const ALIYUN_API_VERSION: &str = "2015-01-09";
/// Aliyun caps `DescribeDomainRecords` at 500 records per page.
pub(crate) const ALIYUN_PAGE_SIZE: u32 = 500;

/// Aliyun DNS adapter.
///
/// Authenticates with the RPC-style HMAC-SHA1 canonical-query signature
/// over `api_key` / `api_secret`.
#[derive(Debug)]
pub struct AliyunProvider {
    pub(crate) config: ProviderConfig,
    pub(crate) endpoint: String,
    pub(crate) client: Client,
}

impl AliyunProvider {
    /// Build an adapter from a frozen config.
    ///
    /// Requires `api_key` and `api_secret`; the endpoint defaults to the
    /// public Aliyun DNS API when blank.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(DnsError::ConfigError {
                provider: "aliyun".to_string(),
                detail: "Aliyun DNS requires api_key and api_secret".to_string(),
            });
        }

        let endpoint = if config.endpoint.is_empty() {
            ALIYUN_DEFAULT_ENDPOINT.to_string()
        } else {
            config.endpoint.trim_end_matches('/').to_string()
        };

        Ok(Self {
            config,
            endpoint,
            client: create_http_client(),
        })
    }
}
