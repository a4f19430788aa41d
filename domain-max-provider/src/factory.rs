//! Provider factory: tag enumeration, feature lookup and adapter
//! construction.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{DnsError, Result};
use crate::providers::{AliyunProvider, CloudflareProvider, DnspodProvider, UnimplementedProvider};
use crate::traits::DnsProvider;
use crate::types::{ProviderConfig, ProviderFeatures, RecordType, RetryConfig};

/// The closed set of supported vendor tags.
pub const SUPPORTED_PROVIDERS: [&str; 10] = [
    "aliyun",
    "dnspod",
    "huawei",
    "baidu",
    "west",
    "volcengine",
    "dnsla",
    "cloudflare",
    "namesilo",
    "powerdns",
];

/// Static capability descriptor for a vendor tag.
///
/// Unknown or not-yet-integrated tags get a conservative default.
#[must_use]
pub fn provider_features(provider_type: &str) -> ProviderFeatures {
    use RecordType::{Aaaa, Caa, Cname, Mx, Ns, Srv, Txt, A};

    match provider_type {
        "aliyun" => ProviderFeatures {
            supported_record_types: vec![A, Aaaa, Cname, Mx, Txt, Ns, Srv, Caa],
            supports_batch: true,
            supports_line_types: true,
            max_records_per_domain: 10_000,
            min_ttl: 1,
            max_ttl: 604_800,
        },
        "dnspod" => ProviderFeatures {
            supported_record_types: vec![A, Aaaa, Cname, Mx, Txt, Ns, Srv],
            supports_batch: true,
            supports_line_types: true,
            max_records_per_domain: 10_000,
            min_ttl: 1,
            max_ttl: 604_800,
        },
        "cloudflare" => ProviderFeatures {
            supported_record_types: vec![A, Aaaa, Cname, Mx, Txt, Ns, Srv, Caa],
            supports_batch: false,
            supports_line_types: false,
            max_records_per_domain: 20_000,
            min_ttl: 60,
            max_ttl: 604_800,
        },
        _ => ProviderFeatures {
            supported_record_types: vec![A, Aaaa, Cname, Mx, Txt, Ns],
            supports_batch: false,
            supports_line_types: false,
            max_records_per_domain: 1_000,
            min_ttl: 300,
            max_ttl: 86_400,
        },
    }
}

/// Builds adapters from `(tag, flat config map)` pairs.
#[derive(Debug, Clone, Default)]
pub struct ProviderFactory {
    retry_config: RetryConfig,
}

impl ProviderFactory {
    /// Factory with the default retry policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            retry_config: RetryConfig::default(),
        }
    }

    /// Replace the retry policy handed to managers built on this factory.
    pub fn set_retry_config(&mut self, config: RetryConfig) {
        self.retry_config = config;
    }

    /// The retry policy currently in effect.
    #[must_use]
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    /// Whether `provider_type` names a supported vendor tag.
    #[must_use]
    pub fn is_supported(&self, provider_type: &str) -> bool {
        SUPPORTED_PROVIDERS.contains(&provider_type)
    }

    /// The supported vendor tags, in declaration order.
    #[must_use]
    pub fn supported_types(&self) -> Vec<&'static str> {
        SUPPORTED_PROVIDERS.to_vec()
    }

    /// Capability descriptor for a tag.
    #[must_use]
    pub fn features(&self, provider_type: &str) -> ProviderFeatures {
        provider_features(provider_type)
    }

    /// Construct an adapter from a flat config map.
    ///
    /// The recognized keys (`api_key`, `api_secret`, `token`, `region`,
    /// `endpoint`) populate the typed config; the whole map is preserved
    /// as `extra_params`. Unknown tags are a `ConfigError`.
    pub fn create_provider(
        &self,
        provider_type: &str,
        config: &HashMap<String, String>,
    ) -> Result<Arc<dyn DnsProvider>> {
        let provider_config = ProviderConfig::from_map(config);

        match provider_type {
            "aliyun" => Ok(Arc::new(AliyunProvider::new(provider_config)?)),
            "dnspod" => Ok(Arc::new(DnspodProvider::new(provider_config)?)),
            "cloudflare" => Ok(Arc::new(CloudflareProvider::new(provider_config)?)),
            "huawei" => Ok(Arc::new(UnimplementedProvider::new("huawei", provider_config))),
            "baidu" => Ok(Arc::new(UnimplementedProvider::new("baidu", provider_config))),
            "west" => Ok(Arc::new(UnimplementedProvider::new("west", provider_config))),
            "volcengine" => Ok(Arc::new(UnimplementedProvider::new(
                "volcengine",
                provider_config,
            ))),
            "dnsla" => Ok(Arc::new(UnimplementedProvider::new("dnsla", provider_config))),
            "namesilo" => Ok(Arc::new(UnimplementedProvider::new(
                "namesilo",
                provider_config,
            ))),
            "powerdns" => Ok(Arc::new(UnimplementedProvider::new(
                "powerdns",
                provider_config,
            ))),
            other => Err(DnsError::ConfigError {
                provider: "factory".to_string(),
                detail: format!("unsupported DNS provider: {other}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_credentials() -> HashMap<String, String> {
        [
            ("api_key".to_string(), "AK".to_string()),
            ("api_secret".to_string(), "SK".to_string()),
            ("token".to_string(), "tk".to_string()),
        ]
        .into()
    }

    #[test]
    fn every_supported_tag_constructs_with_matching_name() {
        let factory = ProviderFactory::new();
        let config = full_credentials();

        for tag in SUPPORTED_PROVIDERS {
            let provider = factory
                .create_provider(tag, &config)
                .unwrap_or_else(|e| panic!("{tag}: construction failed: {e}"));
            assert_eq!(provider.name(), tag);
        }
    }

    #[test]
    fn unknown_tag_is_config_error() {
        let factory = ProviderFactory::new();
        let res = factory.create_provider("route53", &full_credentials());
        assert!(
            matches!(&res, Err(DnsError::ConfigError { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn is_supported_matches_tag_list() {
        let factory = ProviderFactory::new();
        assert!(factory.is_supported("aliyun"));
        assert!(factory.is_supported("powerdns"));
        assert!(!factory.is_supported("route53"));
        assert_eq!(factory.supported_types().len(), 10);
    }

    #[test]
    fn aliyun_requires_key_and_secret() {
        let factory = ProviderFactory::new();
        let config: HashMap<String, String> =
            [("api_key".to_string(), "AK".to_string())].into();
        let res = factory.create_provider("aliyun", &config);
        assert!(
            matches!(&res, Err(DnsError::ConfigError { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn cloudflare_accepts_token_alone() {
        let factory = ProviderFactory::new();
        let config: HashMap<String, String> =
            [("token".to_string(), "tk_xxx".to_string())].into();
        let provider = factory.create_provider("cloudflare", &config).unwrap();
        assert_eq!(provider.name(), "cloudflare");
        assert!(provider.validate_config().is_ok());
    }

    #[test]
    fn features_table() {
        let cf = provider_features("cloudflare");
        assert!(!cf.supports_batch);
        assert!(!cf.supports_line_types);
        assert_eq!(cf.min_ttl, 60);

        let aliyun = provider_features("aliyun");
        assert!(aliyun.supports_line_types);
        assert_eq!(aliyun.min_ttl, 1);

        let fallback = provider_features("west");
        assert_eq!(fallback.max_records_per_domain, 1_000);
        assert!(!fallback.supported_record_types.contains(&RecordType::Srv));
    }
}
