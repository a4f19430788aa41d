//! DNSPod `DnsProvider` implementation.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{DnsError, Result};
use crate::providers::common::parse_record_type;
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{DnsRecord, RecordType};

use super::{
    CreateRecordResponse, DescribeDomainListResponse, DescribeRecordListResponse, DnspodProvider,
    EmptyResponse, DNSPOD_LIST_LIMIT,
};

#[derive(Serialize)]
struct DescribeDomainListRequest {
    #[serde(rename = "Limit")]
    limit: u32,
    #[serde(rename = "Offset", skip_serializing_if = "Option::is_none")]
    offset: Option<u32>,
}

#[derive(Serialize)]
struct DescribeRecordListRequest {
    #[serde(rename = "Domain")]
    domain: String,
    #[serde(rename = "DomainId")]
    domain_id: u64,
    #[serde(rename = "Limit")]
    limit: u32,
    #[serde(rename = "Offset", skip_serializing_if = "Option::is_none")]
    offset: Option<u32>,
}

#[derive(Serialize)]
struct RecordMutationRequest {
    #[serde(rename = "Domain")]
    domain: String,
    #[serde(rename = "DomainId")]
    domain_id: u64,
    #[serde(rename = "RecordId", skip_serializing_if = "Option::is_none")]
    record_id: Option<u64>,
    #[serde(rename = "SubDomain")]
    sub_domain: String,
    #[serde(rename = "RecordType")]
    record_type: String,
    #[serde(rename = "RecordLine")]
    record_line: String,
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "TTL")]
    ttl: u32,
    #[serde(rename = "MX", skip_serializing_if = "Option::is_none")]
    mx: Option<u16>,
}

#[derive(Serialize)]
struct DeleteRecordRequest {
    #[serde(rename = "Domain")]
    domain: String,
    #[serde(rename = "DomainId")]
    domain_id: u64,
    #[serde(rename = "RecordId")]
    record_id: u64,
}

impl DnspodProvider {
    /// Resolve the vendor-internal numeric domain id by exact-name scan of
    /// `DescribeDomainList`. Resolved lazily on every call; nothing is
    /// cached across caller operations.
    async fn resolve_domain_id(&self, domain: &str) -> Result<u64> {
        let request = DescribeDomainListRequest {
            limit: DNSPOD_LIST_LIMIT,
            offset: None,
        };
        let response: DescribeDomainListResponse = self
            .request("DescribeDomainList", &request, ErrorContext::domain(domain))
            .await?;

        response
            .domain_list
            .unwrap_or_default()
            .into_iter()
            .find(|d| d.name == domain)
            .map(|d| d.domain_id)
            .ok_or_else(|| DnsError::NotFound {
                provider: "dnspod".to_string(),
                resource: format!("domain '{domain}'"),
                raw_message: None,
            })
    }

    fn numeric_record_id(record_id: &str) -> Result<u64> {
        record_id.parse().map_err(|_| DnsError::ValidationError {
            param: "record_id".to_string(),
            detail: format!("'{record_id}' is not a numeric DNSPod record id"),
        })
    }

    fn convert_record(item: super::types::DnspodRecord) -> Option<DnsRecord> {
        let record_type = parse_record_type(&item.record_type, "dnspod").ok()?;
        Some(DnsRecord {
            id: item.record_id.to_string(),
            name: item.name,
            record_type,
            value: item.value,
            ttl: item.ttl,
            priority: item.mx.filter(|_| {
                matches!(record_type, RecordType::Mx | RecordType::Srv)
            }),
            weight: None,
            port: None,
            line: item.line.filter(|l| !l.is_empty()),
            status: item.status,
        })
    }

    fn mutation_request(
        domain: &str,
        domain_id: u64,
        record_id: Option<u64>,
        record: &DnsRecord,
    ) -> RecordMutationRequest {
        RecordMutationRequest {
            domain: domain.to_string(),
            domain_id,
            record_id,
            sub_domain: record.normalized_name().to_string(),
            record_type: record.record_type.as_str().to_string(),
            // DNSPod insists on a line; the default line is spelled "默认"
            record_line: record
                .line
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| "默认".to_string()),
            value: record.value.clone(),
            ttl: record.ttl,
            mx: if matches!(record.record_type, RecordType::Mx | RecordType::Srv) {
                record.priority
            } else {
                None
            },
        }
    }
}

#[async_trait]
impl DnsProvider for DnspodProvider {
    fn name(&self) -> &'static str {
        "dnspod"
    }

    fn validate_config(&self) -> Result<()> {
        if self.config.api_key.is_empty() {
            return Err(DnsError::ConfigError {
                provider: "dnspod".to_string(),
                detail: "api_key (SecretId) must not be empty".to_string(),
            });
        }
        if self.config.api_secret.is_empty() {
            return Err(DnsError::ConfigError {
                provider: "dnspod".to_string(),
                detail: "api_secret (SecretKey) must not be empty".to_string(),
            });
        }
        Ok(())
    }

    async fn test_connection(&self) -> Result<()> {
        let request = DescribeDomainListRequest {
            limit: 1,
            offset: None,
        };
        let _: DescribeDomainListResponse = self
            .request("DescribeDomainList", &request, ErrorContext::default())
            .await?;
        Ok(())
    }

    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        let domain_id = self.resolve_domain_id(domain).await?;

        let mut records: Vec<DnsRecord> = Vec::new();
        let mut offset = 0u32;

        loop {
            let request = DescribeRecordListRequest {
                domain: domain.to_string(),
                domain_id,
                limit: DNSPOD_LIST_LIMIT,
                offset: (offset > 0).then_some(offset),
            };
            let response: DescribeRecordListResponse = self
                .request("DescribeRecordList", &request, ErrorContext::domain(domain))
                .await?;

            let batch = response.record_list.unwrap_or_default();
            let batch_len = batch.len() as u32;
            records.extend(batch.into_iter().filter_map(Self::convert_record));

            let total = response
                .record_count_info
                .and_then(|i| i.total_count)
                .unwrap_or(records.len() as u64);
            offset += batch_len;
            if batch_len == 0 || u64::from(offset) >= total {
                break;
            }
        }

        Ok(records)
    }

    async fn get_record(&self, domain: &str, record_id: &str) -> Result<DnsRecord> {
        // DNSPod has no single-record endpoint; filter the list
        let records = self.list_records(domain).await?;
        records
            .into_iter()
            .find(|r| r.id == record_id)
            .ok_or_else(|| DnsError::NotFound {
                provider: "dnspod".to_string(),
                resource: format!("record '{record_id}'"),
                raw_message: None,
            })
    }

    async fn add_record(&self, domain: &str, record: &DnsRecord) -> Result<DnsRecord> {
        record.validate_for(&self.features())?;

        let domain_id = self.resolve_domain_id(domain).await?;
        let request = Self::mutation_request(domain, domain_id, None, record);

        let response: CreateRecordResponse = self
            .request("CreateRecord", &request, ErrorContext::domain(domain))
            .await?;

        let mut created = record.clone();
        created.id = response.record_id.to_string();
        created.name = record.normalized_name().to_string();
        Ok(created)
    }

    async fn update_record(
        &self,
        domain: &str,
        record_id: &str,
        record: &DnsRecord,
    ) -> Result<()> {
        record.validate_for(&self.features())?;

        let numeric_id = Self::numeric_record_id(record_id)?;
        let domain_id = self.resolve_domain_id(domain).await?;
        let request = Self::mutation_request(domain, domain_id, Some(numeric_id), record);

        let _: EmptyResponse = self
            .request(
                "ModifyRecord",
                &request,
                ErrorContext::record(domain, record_id),
            )
            .await?;
        Ok(())
    }

    async fn delete_record(&self, domain: &str, record_id: &str) -> Result<()> {
        let numeric_id = Self::numeric_record_id(record_id)?;
        let domain_id = self.resolve_domain_id(domain).await?;

        let request = DeleteRecordRequest {
            domain: domain.to_string(),
            domain_id,
            record_id: numeric_id,
        };
        let _: EmptyResponse = self
            .request(
                "DeleteRecord",
                &request,
                ErrorContext::record(domain, record_id),
            )
            .await?;
        Ok(())
    }
}
