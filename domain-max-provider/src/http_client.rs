//! Generic HTTP plumbing shared by the vendor adapters.
//!
//! Signing differs too much between vendors to unify, so each adapter
//! builds its own `RequestBuilder`; the send / status triage / body
//! handling path is identical and lives here.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::DnsError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP helper functions.
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Send a prepared request and return `(status, body)`.
    ///
    /// Transport failures map to `NetworkError` (timeouts included, so the
    /// retry classifier sees them as transient). HTTP 429 becomes
    /// `RateLimited` with the `Retry-After` hint when present; 502-504
    /// become `NetworkError`. Any other status is returned to the caller
    /// together with the body for vendor-envelope parsing.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), DnsError> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| DnsError::NetworkError {
                provider: provider_name.to_string(),
                detail: if e.is_timeout() {
                    format!("timeout: {e}")
                } else {
                    e.to_string()
                },
            })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        // Retry-After must be read before the body consumes the response
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(DnsError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(truncate_for_log(&body)),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Server error (HTTP {status_code})");
            return Err(DnsError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response.text().await.map_err(|e| DnsError::NetworkError {
            provider: provider_name.to_string(),
            detail: format!("failed to read response body: {e}"),
        })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Decode a JSON response body, logging the raw text on failure.
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, DnsError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            DnsError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, DnsError> = HttpUtils::parse_json(r#"{"x":42}"#, "test");
        assert!(
            matches!(&result, Ok(Foo { x: 42 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, DnsError> = HttpUtils::parse_json("not json", "test");
        assert!(
            matches!(&result, Err(DnsError::ParseError { .. })),
            "unexpected parse result: {result:?}"
        );
    }
}
