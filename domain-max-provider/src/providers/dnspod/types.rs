//! Tencent Cloud DNSPod API shapes.

use serde::Deserialize;

/// Outer Tencent Cloud envelope; the payload stays a `Value` until the
/// error check is done, then decodes into the concrete response type.
#[derive(Debug, Deserialize)]
pub(crate) struct TencentEnvelope {
    #[serde(rename = "Response")]
    pub response: serde_json::Value,
}

/// Error payload nested inside the envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct TencentError {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

/// Response payload for `DescribeDomainList`.
#[derive(Debug, Deserialize)]
pub(crate) struct DescribeDomainListResponse {
    #[serde(rename = "DomainList")]
    pub domain_list: Option<Vec<DnspodDomain>>,
}

/// Domain item from `DescribeDomainList`.
#[derive(Debug, Deserialize)]
pub(crate) struct DnspodDomain {
    #[serde(rename = "DomainId")]
    pub domain_id: u64,
    #[serde(rename = "Name")]
    pub name: String,
}

/// Response payload for `DescribeRecordList`.
#[derive(Debug, Deserialize)]
pub(crate) struct DescribeRecordListResponse {
    #[serde(rename = "RecordList")]
    pub record_list: Option<Vec<DnspodRecord>>,
    #[serde(rename = "RecordCountInfo")]
    pub record_count_info: Option<RecordCountInfo>,
}

/// Record count metadata from `DescribeRecordList`.
#[derive(Debug, Deserialize)]
pub(crate) struct RecordCountInfo {
    #[serde(rename = "TotalCount")]
    pub total_count: Option<u64>,
}

/// Record item from `DescribeRecordList`.
#[derive(Debug, Deserialize)]
pub(crate) struct DnspodRecord {
    #[serde(rename = "RecordId")]
    pub record_id: u64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    #[serde(rename = "MX")]
    pub mx: Option<u16>,
    #[serde(rename = "Line")]
    pub line: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
}

/// Response payload for `CreateRecord`.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: u64,
}

/// Responses whose payload carries nothing we need (`ModifyRecord`,
/// `DeleteRecord`).
#[derive(Debug, Deserialize)]
pub(crate) struct EmptyResponse {}
