//! Cloudflare authentication header selection.

use crate::error::{DnsError, Result};
use crate::types::ProviderConfig;

/// Header name/value pairs for one request.
///
/// A token takes precedence and becomes `Authorization: Bearer`; otherwise
/// the Global API Key path requires `extra_params["email"]` and produces
/// `X-Auth-Email` / `X-Auth-Key`. A key without an email is a
/// configuration error, caught here and by `validate_config`.
pub(crate) fn auth_headers(config: &ProviderConfig) -> Result<Vec<(&'static str, String)>> {
    if !config.token.is_empty() {
        return Ok(vec![(
            "Authorization",
            format!("Bearer {}", config.token),
        )]);
    }

    if !config.api_key.is_empty() {
        let email = config
            .extra_params
            .get("email")
            .filter(|e| !e.is_empty())
            .ok_or_else(|| DnsError::ConfigError {
                provider: "cloudflare".to_string(),
                detail: "Global API Key auth requires an account email".to_string(),
            })?;
        return Ok(vec![
            ("X-Auth-Email", email.clone()),
            ("X-Auth-Key", config.api_key.clone()),
        ]);
    }

    Err(DnsError::ConfigError {
        provider: "cloudflare".to_string(),
        detail: "no API token or Global API Key configured".to_string(),
    })
}
