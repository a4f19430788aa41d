//! # domain-max-provider
//!
//! A unified DNS provider abstraction for managing records across
//! heterogeneous authoritative DNS vendors.
//!
//! ## Supported Providers
//!
//! | Provider | Tag | Auth Method |
//! |----------|-----|-------------|
//! | [Aliyun DNS](https://www.aliyun.com/product/dns) | `aliyun` | HMAC-SHA1 canonical-query signature |
//! | [Tencent DNSPod](https://www.dnspod.cn/) | `dnspod` | TC3-HMAC-SHA256 |
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | Bearer token or Global API Key + email |
//!
//! The remaining tags (`huawei`, `baidu`, `west`, `volcengine`, `dnsla`,
//! `namesilo`, `powerdns`) construct stub adapters that uniformly report
//! [`DnsError::NotImplemented`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use domain_max_provider::{DnsRecord, ProviderManager, RecordType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = ProviderManager::new();
//!
//!     // Register an adapter from a decrypted credential map
//!     let config: HashMap<String, String> =
//!         [("token".to_string(), "cf-api-token".to_string())].into();
//!     manager.register("cf-prod", "cloudflare", &config)?;
//!
//!     // Prove the credentials work, then list records
//!     manager.test("cf-prod").await?;
//!     let provider = manager.get("cf-prod")?;
//!     for record in provider.list_records("example.com").await? {
//!         println!("{} {} -> {}", record.name, record.record_type, record.value);
//!     }
//!
//!     // Create an apex A record
//!     let record = DnsRecord::new("@", RecordType::A, "203.0.113.9", 300);
//!     let created = provider.add_record("example.com", &record).await?;
//!     println!("created record {}", created.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, DnsError>`](DnsError). Adapters
//! translate vendor envelopes into the taxonomy and never surface raw
//! vendor structures; [`ProviderManager::retry`] re-attempts only the
//! transient kinds (`NetworkError`, `RateLimited`) under exponential
//! backoff.

mod error;
mod factory;
mod http_client;
mod manager;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{DnsError, ErrorEnvelope, Result};

pub use factory::{provider_features, ProviderFactory, SUPPORTED_PROVIDERS};

pub use manager::{ProviderManager, RegisteredProvider};

pub use traits::DnsProvider;

pub use types::{
    BatchAddFailure, BatchAddResult, DnsRecord, ProviderConfig, ProviderFeatures, RecordType,
    RetryConfig,
};

pub use providers::{AliyunProvider, CloudflareProvider, DnspodProvider, UnimplementedProvider};
