//! Cloudflare DNS provider.

mod auth;
mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::{DnsError, Result};
use crate::providers::common::create_http_client;
use crate::types::ProviderConfig;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse, CloudflareSrvData, CloudflareZone};

pub(crate) const CF_DEFAULT_ENDPOINT: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare page size used for record listing.
pub(crate) const CF_RECORDS_PER_PAGE: u32 = 100;

/// Cloudflare DNS adapter.
///
/// No request signing: authenticates with either a Bearer API token or the
/// legacy Global API Key plus account email (`extra_params["email"]`).
#[derive(Debug)]
pub struct CloudflareProvider {
    pub(crate) config: ProviderConfig,
    pub(crate) endpoint: String,
    pub(crate) client: Client,
}

impl CloudflareProvider {
    /// Build an adapter from a frozen config.
    ///
    /// Requires a token or an API key; the endpoint defaults to the public
    /// Cloudflare v4 API when blank.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        if config.token.is_empty() && config.api_key.is_empty() {
            return Err(DnsError::ConfigError {
                provider: "cloudflare".to_string(),
                detail: "Cloudflare requires an API token or a Global API Key".to_string(),
            });
        }

        let endpoint = if config.endpoint.is_empty() {
            CF_DEFAULT_ENDPOINT.to_string()
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
