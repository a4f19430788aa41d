//! Cloudflare error-code mapping.
//!
//! Cloudflare reports numeric error codes inside the response envelope.

use crate::error::DnsError;
use crate::traits::ErrorContext;

const PROVIDER: &str = "cloudflare";

pub(crate) fn map_api_error(code: i64, message: String, context: &ErrorContext) -> DnsError {
    match code {
        // 6003 invalid headers, 9103 unknown email/key, 9109 invalid token,
        // 10000 authentication error
        6003 | 9103 | 9109 | 10000 => DnsError::AuthError {
            provider: PROVIDER.to_string(),
            raw_message: Some(message),
        },

        // 7003 could not route (bad zone id), 1001 zone not found
        1001 | 7003 => DnsError::NotFound {
            provider: PROVIDER.to_string(),
            resource: format!(
                "domain '{}'",
                context.domain.clone().unwrap_or_default()
            ),
            raw_message: Some(message),
        },

        // 81044 record not found
        81044 => DnsError::NotFound {
            provider: PROVIDER.to_string(),
            resource: format!(
                "record '{}'",
                context.record_id.clone().unwrap_or_default()
            ),
            raw_message: Some(message),
        },

        // 971 / 10013 rate limit style responses
        971 | 10013 => DnsError::RateLimited {
            provider: PROVIDER.to_string(),
            retry_after: None,
            raw_message: Some(message),
        },

        _ => DnsError::ProviderError {
            provider: PROVIDER.to_string(),
            code: code.to_string(),
            message,
            request_id: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_token_is_auth_error() {
        let e = map_api_error(9109, "Invalid access token".to_string(), &ErrorContext::default());
        assert!(matches!(e, DnsError::AuthError { .. }), "got {e:?}");
    }

    #[test]
    fn record_not_found_code() {
        let e = map_api_error(
            81044,
            "Record does not exist".to_string(),
            &ErrorContext::record("example.com", "rec123"),
        );
        match e {
            DnsError::NotFound { resource, .. } => assert_eq!(resource, "record 'rec123'"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn unknown_code_is_provider_error() {
        let e = map_api_error(81057, "identical record exists".to_string(), &ErrorContext::default());
        match e {
            DnsError::ProviderError { code, .. } => assert_eq!(code, "81057"),
            other => panic!("expected ProviderError, got {other:?}"),
        }
    }
}
