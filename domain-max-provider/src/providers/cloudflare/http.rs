//! Cloudflare HTTP request path.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DnsError, Result};
use crate::http_client::HttpUtils;
use crate::traits::ErrorContext;

use super::{auth::auth_headers, error::map_api_error, CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    /// Execute one API call and return the decoded envelope.
    ///
    /// A failed envelope (`success: false`) maps its first error entry into
    /// the taxonomy; transport-level failures are handled by `HttpUtils`.
    pub(crate) async fn call<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        ctx: &ErrorContext,
    ) -> Result<CloudflareResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = format!("{}{}", self.endpoint, path);

        let mut request = self.client.request(method.clone(), &url);
        for (name, value) in auth_headers(&self.config)? {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let (status, response_text) =
            HttpUtils::execute_request(request, "cloudflare", method.as_str(), path).await?;

        let Ok(response) = HttpUtils::parse_json::<CloudflareResponse<T>>(&response_text, "cloudflare")
        else {
            // Non-2xx without a structured vendor body is a transport failure
            if !(200..300).contains(&status) {
                return Err(DnsError::NetworkError {
                    provider: "cloudflare".to_string(),
                    detail: format!(
                        "HTTP {status}: {}",
                        crate::utils::log_sanitizer::truncate_for_log(&response_text)
                    ),
                });
            }
            return Err(DnsError::ParseError {
                provider: "cloudflare".to_string(),
                detail: "response body is not a Cloudflare envelope".to_string(),
            });
        };

        if !response.success {
            let (code, message) = response
                .errors
                .as_ref()
                .and_then(|errors| errors.first())
                .map_or((0, "unknown error".to_string()), |e| {
                    (e.code, e.message.clone())
                });
            log::warn!("[cloudflare] API error {code}: {message}");
            return Err(map_api_error(code, message, ctx));
        }

        Ok(response)
    }

    /// GET returning the `result` payload.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: &ErrorContext,
    ) -> Result<T> {
        let response = self.call::<T, ()>(Method::GET, path, None, ctx).await?;
        response.result.ok_or_else(|| DnsError::ParseError {
            provider: "cloudflare".to_string(),
            detail: "response envelope is missing 'result'".to_string(),
        })
    }

    /// POST with a JSON body, returning the `result` payload.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        ctx: &ErrorContext,
    ) -> Result<T> {
        let response = self.call::<T, B>(Method::POST, path, Some(body), ctx).await?;
        response.result.ok_or_else(|| DnsError::ParseError {
            provider: "cloudflare".to_string(),
            detail: "response envelope is missing 'result'".to_string(),
        })
    }

    /// PUT with a JSON body (full-record replace), ignoring the payload.
    pub(crate) async fn put<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        ctx: &ErrorContext,
    ) -> Result<()> {
        let _ = self
            .call::<serde_json::Value, B>(Method::PUT, path, Some(body), ctx)
            .await?;
        Ok(())
    }

    /// DELETE, ignoring the payload.
    pub(crate) async fn delete(&self, path: &str, ctx: &ErrorContext) -> Result<()> {
        let _ = self
            .call::<serde_json::Value, ()>(Method::DELETE, path, None, ctx)
            .await?;
        Ok(())
    }
}
