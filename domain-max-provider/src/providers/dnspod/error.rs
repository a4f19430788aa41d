//! Tencent Cloud error-code mapping.
//!
//! Reference: <https://cloud.tencent.com/document/api/1427/56192>

use crate::error::DnsError;
use crate::traits::{ErrorContext, RawApiError};

const PROVIDER: &str = "dnspod";

pub(crate) fn map_api_error(raw: RawApiError, context: &ErrorContext) -> DnsError {
    let code = raw.code.as_deref().unwrap_or_default();

    if code.starts_with("AuthFailure") || code == "UnauthorizedOperation" {
        return DnsError::AuthError {
            provider: PROVIDER.to_string(),
            raw_message: Some(raw.message),
        };
    }

    if code == "RequestLimitExceeded" || code.starts_with("LimitExceeded.RequestLimit") {
        return DnsError::RateLimited {
            provider: PROVIDER.to_string(),
            retry_after: None,
            raw_message: Some(raw.message),
        };
    }

    match code {
        "InvalidParameter.DomainIdInvalid"
        | "InvalidParameterValue.DomainNotExists"
        | "ResourceNotFound.NoDataOfDomain" => DnsError::NotFound {
            provider: PROVIDER.to_string(),
            resource: format!(
                "domain '{}'",
                context.domain.clone().unwrap_or_default()
            ),
            raw_message: Some(raw.message),
        },

        "InvalidParameter.RecordIdInvalid" | "ResourceNotFound.NoDataOfRecord" => {
            DnsError::NotFound {
                provider: PROVIDER.to_string(),
                resource: format!(
                    "record '{}'",
                    context.record_id.clone().unwrap_or_default()
                ),
                raw_message: Some(raw.message),
            }
        }

        _ => DnsError::ProviderError {
            provider: PROVIDER.to_string(),
            code: code.to_string(),
            message: raw.message,
            request_id: raw.request_id,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failure_family_maps_to_auth_error() {
        for code in ["AuthFailure.SignatureFailure", "AuthFailure.SecretIdNotFound"] {
            let e = map_api_error(RawApiError::new(code, "denied"), &ErrorContext::default());
            assert!(matches!(e, DnsError::AuthError { .. }), "{code}: got {e:?}");
        }
    }

    #[test]
    fn request_limit_is_retryable() {
        let e = map_api_error(
            RawApiError::new("RequestLimitExceeded", "qps"),
            &ErrorContext::default(),
        );
        assert!(e.is_retryable(), "got {e:?}");
    }

    #[test]
    fn missing_record_maps_to_not_found() {
        let e = map_api_error(
            RawApiError::new("ResourceNotFound.NoDataOfRecord", "none"),
            &ErrorContext::record("example.com", "42"),
        );
        match e {
            DnsError::NotFound { resource, .. } => assert_eq!(resource, "record '42'"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn unknown_code_keeps_vendor_detail() {
        let raw = RawApiError::new("OperationDenied.DomainLocked", "locked")
            .with_request_id(Some("rid".to_string()));
        let e = map_api_error(raw, &ErrorContext::default());
        match e {
            DnsError::ProviderError {
                code, request_id, ..
            } => {
                assert_eq!(code, "OperationDenied.DomainLocked");
                assert_eq!(request_id.as_deref(), Some("rid"));
            }
            other => panic!("expected ProviderError, got {other:?}"),
        }
    }
}
