//! Cloudflare API shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic Cloudflare response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<CloudflareError>>,
    pub result_info: Option<CloudflareResultInfo>,
}

/// One entry of the `errors` array.
#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareError {
    pub code: i64,
    pub message: String,
}

/// Pagination metadata.
#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareResultInfo {
    #[allow(dead_code)]
    pub page: Option<u32>,
    #[allow(dead_code)]
    pub per_page: Option<u32>,
    pub total_count: Option<u64>,
}

/// Zone entry.
#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareZone {
    pub id: String,
    pub name: String,
}

/// DNS record as Cloudflare returns it.
#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub priority: Option<u16>,
    pub proxied: Option<bool>,
    /// Structured payload for SRV/CAA records.
    pub data: Option<Value>,
}

/// `data` object submitted with SRV records.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CloudflareSrvData {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}
