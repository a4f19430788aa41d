//! Aliyun DNS API response shapes.

use serde::Deserialize;

/// Response payload for `DescribeDomains` (connection probing only).
#[derive(Debug, Deserialize)]
pub(crate) struct DescribeDomainsResponse {
    #[serde(rename = "TotalCount")]
    #[allow(dead_code)]
    pub total_count: Option<u64>,
}

/// Response payload for `DescribeDomainRecords`.
#[derive(Debug, Deserialize)]
pub(crate) struct DescribeDomainRecordsResponse {
    #[serde(rename = "TotalCount")]
    pub total_count: Option<u64>,
    #[serde(rename = "DomainRecords")]
    pub domain_records: Option<DomainRecordsContainer>,
}

/// Nested record list container.
#[derive(Debug, Deserialize)]
pub(crate) struct DomainRecordsContainer {
    #[serde(rename = "Record")]
    pub record: Option<Vec<AliyunRecordItem>>,
}

/// One record item as Aliyun returns it.
#[derive(Debug, Deserialize)]
pub(crate) struct AliyunRecordItem {
    #[serde(rename = "RecordId")]
    pub record_id: String,
    #[serde(rename = "RR")]
    pub rr: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    #[serde(rename = "Priority")]
    pub priority: Option<u16>,
    #[serde(rename = "Line")]
    pub line: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
}

/// Response payload for `DescribeDomainRecordInfo`.
#[derive(Debug, Deserialize)]
pub(crate) struct DescribeDomainRecordInfoResponse {
    #[serde(rename = "RecordId")]
    pub record_id: String,
    #[serde(rename = "RR")]
    pub rr: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    #[serde(rename = "Priority")]
    pub priority: Option<u16>,
    #[serde(rename = "Line")]
    pub line: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
}

/// Response payload for `AddDomainRecord`.
#[derive(Debug, Deserialize)]
pub(crate) struct AddDomainRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: String,
}

/// Response payload for `UpdateDomainRecord`.
#[derive(Debug, Deserialize)]
pub(crate) struct UpdateDomainRecordResponse {
    #[serde(rename = "RecordId")]
    #[allow(dead_code)]
    pub record_id: Option<String>,
}

/// Response payload for `DeleteDomainRecord`.
#[derive(Debug, Deserialize)]
pub(crate) struct DeleteDomainRecordResponse {
    #[serde(rename = "RecordId")]
    #[allow(dead_code)]
    pub record_id: Option<String>,
}
