//! Aliyun error-code mapping.
//!
//! Reference: <https://api.aliyun.com/document/Alidns/2015-01-09/errorCode>

use crate::error::DnsError;
use crate::traits::{ErrorContext, RawApiError};

const PROVIDER: &str = "aliyun";

pub(crate) fn map_api_error(raw: RawApiError, context: &ErrorContext) -> DnsError {
    match raw.code.as_deref() {
        Some(
            "InvalidAccessKeyId.NotFound"
            | "SignatureDoesNotMatch"
            | "IncompleteSignature"
            | "Forbidden.AccessKeyDisabled",
        ) => DnsError::AuthError {
            provider: PROVIDER.to_string(),
            raw_message: Some(raw.message),
        },

        Some("Throttling" | "Throttling.User" | "Throttling.Api") => DnsError::RateLimited {
            provider: PROVIDER.to_string(),
            retry_after: None,
            raw_message: Some(raw.message),
        },

        Some("InvalidDomainName.NoExist" | "DomainNotFound") => DnsError::NotFound {
            provider: PROVIDER.to_string(),
            resource: format!(
                "domain '{}'",
                context.domain.clone().unwrap_or_default()
            ),
            raw_message: Some(raw.message),
        },

        Some(
            "InvalidRecordId.NotFound" | "DomainRecordNotBelongToUser" | "InvalidRR.NoExist",
        ) => DnsError::NotFound {
            provider: PROVIDER.to_string(),
            resource: format!(
                "record '{}'",
                context.record_id.clone().unwrap_or_default()
            ),
            raw_message: Some(raw.message),
        },

        Some(code) => DnsError::ProviderError {
            provider: PROVIDER.to_string(),
            code: code.to_string(),
            message: raw.message,
            request_id: raw.request_id,
        },

        None => DnsError::ProviderError {
            provider: PROVIDER.to_string(),
            code: String::new(),
            message: raw.message,
            request_id: raw.request_id,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_signature_is_auth_error() {
        let e = map_api_error(
            RawApiError::new("SignatureDoesNotMatch", "bad sig"),
            &ErrorContext::default(),
        );
        assert!(matches!(e, DnsError::AuthError { .. }), "got {e:?}");
    }

    #[test]
    fn throttling_is_rate_limited() {
        let e = map_api_error(
            RawApiError::new("Throttling.User", "slow down"),
            &ErrorContext::default(),
        );
        assert!(e.is_retryable(), "got {e:?}");
    }

    #[test]
    fn missing_domain_carries_domain_name() {
        let e = map_api_error(
            RawApiError::new("InvalidDomainName.NoExist", "no zone"),
            &ErrorContext::domain("example.com"),
        );
        match e {
            DnsError::NotFound { resource, .. } => assert_eq!(resource, "domain 'example.com'"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn unknown_code_becomes_provider_error_with_request_id() {
        let raw = RawApiError::new("QuotaExceeded.Record", "too many")
            .with_request_id(Some("req-9".to_string()));
        let e = map_api_error(raw, &ErrorContext::default());
        match e {
            DnsError::ProviderError {
                code, request_id, ..
            } => {
                assert_eq!(code, "QuotaExceeded.Record");
                assert_eq!(request_id.as_deref(), Some("req-9"));
            }
            other => panic!("expected ProviderError, got {other:?}"),
        }
    }
}
