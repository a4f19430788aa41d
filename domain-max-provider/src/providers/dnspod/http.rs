//! DNSPod HTTP request path.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DnsError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, RawApiError};

use super::types::{TencentEnvelope, TencentError};
use super::{error::map_api_error, sign, DnspodProvider, DNSPOD_API_VERSION};

impl DnspodProvider {
    /// Execute one Tencent Cloud API call: the body is serialized once and
    /// that exact byte string is both signed and sent.
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        action: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = serde_json::to_string(body).map_err(|e| DnsError::ParseError {
            provider: "dnspod".to_string(),
            detail: format!("failed to serialize request body: {e}"),
        })?;

        let host = host_of(&self.endpoint);
        let timestamp = Utc::now().timestamp();
        let authorization = sign::authorization(
            &self.config.api_key,
            &self.config.api_secret,
            &host,
            &payload,
            timestamp,
        );

        let request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json; charset=utf-8")
            .header("Host", host)
            .header("X-TC-Action", action)
            .header("X-TC-Version", DNSPOD_API_VERSION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("X-TC-Region", self.region())
            .header("Authorization", authorization)
            .body(payload);

        let (status, response_text) =
            HttpUtils::execute_request(request, "dnspod", "POST", action).await?;

        let Ok(envelope) = HttpUtils::parse_json::<TencentEnvelope>(&response_text, "dnspod")
        else {
            // Non-2xx without a structured vendor body is a transport failure
            if !(200..300).contains(&status) {
                return Err(DnsError::NetworkError {
                    provider: "dnspod".to_string(),
                    detail: format!(
                        "HTTP {status}: {}",
                        crate::utils::log_sanitizer::truncate_for_log(&response_text)
                    ),
                });
            }
            return Err(DnsError::ParseError {
                provider: "dnspod".to_string(),
                detail: "response body is not a Tencent Cloud envelope".to_string(),
            });
        };
        let request_id = envelope
            .response
            .get("RequestId")
            .and_then(|v| v.as_str())
            .map(String::from);

        if let Some(error_value) = envelope.response.get("Error") {
            let error: TencentError = serde_json::from_value(error_value.clone())
                .map_err(|e| DnsError::ParseError {
                    provider: "dnspod".to_string(),
                    detail: format!("malformed error payload: {e}"),
                })?;
            log::warn!("[dnspod] API error: {} - {}", error.code, error.message);
            return Err(map_api_error(
                RawApiError::new(error.code, error.message).with_request_id(request_id),
                &ctx,
            ));
        }

        serde_json::from_value(envelope.response).map_err(|e| DnsError::ParseError {
            provider: "dnspod".to_string(),
            detail: e.to_string(),
        })
    }
}

/// Host portion of the endpoint, as it appears in the signature scope.
fn host_of(endpoint: &str) -> String {
    endpoint
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::host_of;

    #[test]
    fn host_strips_scheme_and_slash() {
        assert_eq!(host_of("https://dnspod.tencentcloudapi.com"), "dnspod.tencentcloudapi.com");
        assert_eq!(host_of("http://127.0.0.1:9090/"), "127.0.0.1:9090");
    }
}
