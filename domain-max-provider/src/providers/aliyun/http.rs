//! Aliyun HTTP request path.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::error::{DnsError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{error::map_api_error, sign, AliyunProvider, ALIYUN_API_VERSION};

impl AliyunProvider {
    /// Execute one RPC-style GET: common parameters and the signature are
    /// attached exactly once, then the signed query is submitted and the
    /// vendor envelope is triaged into the error taxonomy.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        action: &str,
        mut params: BTreeMap<String, String>,
        ctx: ErrorContext,
    ) -> Result<T> {
        params.insert("Action".to_string(), action.to_string());
        params.insert("Version".to_string(), ALIYUN_API_VERSION.to_string());
        params.insert("Format".to_string(), "JSON".to_string());
        params.insert("AccessKeyId".to_string(), self.config.api_key.clone());
        params.insert("SignatureMethod".to_string(), "HMAC-SHA1".to_string());
        params.insert("SignatureVersion".to_string(), "1.0".to_string());
        params.insert(
            "SignatureNonce".to_string(),
            uuid::Uuid::new_v4().to_string(),
        );
        params.insert(
            "Timestamp".to_string(),
            Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        );

        let signature = sign::signature(&self.config.api_secret, &params);
        params.insert("Signature".to_string(), signature);

        let url = format!("{}/?{}", self.endpoint, sign::canonical_query(&params));

        let request = self.client.get(&url);
        let (status, response_text) =
            HttpUtils::execute_request(request, "aliyun", "GET", action).await?;

        if !(200..300).contains(&status) {
            if let Some(raw) = extract_api_error(&response_text) {
                log::warn!("[aliyun] API error: {:?} - {}", raw.code, raw.message);
                return Err(map_api_error(raw, &ctx));
            }
            return Err(DnsError::NetworkError {
                provider: "aliyun".to_string(),
                detail: format!("HTTP {status}: {}", truncate_for_log(&response_text)),
            });
        }

        let value: serde_json::Value = HttpUtils::parse_json(&response_text, "aliyun")?;

        // Some API errors come back with HTTP 200
        if let Some(raw) = extract_api_error_value(&value) {
            log::warn!("[aliyun] API error: {:?} - {}", raw.code, raw.message);
            return Err(map_api_error(raw, &ctx));
        }

        serde_json::from_value(value).map_err(|e| DnsError::ParseError {
            provider: "aliyun".to_string(),
            detail: e.to_string(),
        })
    }
}

fn extract_api_error(body: &str) -> Option<RawApiError> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    extract_api_error_value(&value)
}

fn extract_api_error_value(value: &serde_json::Value) -> Option<RawApiError> {
    let code = value.get("Code").and_then(|v| v.as_str())?;
    let message = value
        .get("Message")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    let request_id = value
        .get("RequestId")
        .and_then(|v| v.as_str())
        .map(String::from);
    Some(RawApiError::new(code, message).with_request_id(request_id))
}
