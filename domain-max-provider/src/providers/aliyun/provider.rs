//! Aliyun `DnsProvider` implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::{DnsError, Result};
use crate::providers::common::parse_record_type;
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{DnsRecord, RecordType};

use super::{
    AddDomainRecordResponse, AliyunProvider, DeleteDomainRecordResponse,
    DescribeDomainRecordInfoResponse, DescribeDomainRecordsResponse, DescribeDomainsResponse,
    UpdateDomainRecordResponse, ALIYUN_PAGE_SIZE,
};

impl AliyunProvider {
    fn convert_record(item: super::types::AliyunRecordItem) -> Option<DnsRecord> {
        let record_type = parse_record_type(&item.record_type, "aliyun").ok()?;
        Some(DnsRecord {
            id: item.record_id,
            name: item.rr,
            record_type,
            value: item.value,
            ttl: item.ttl,
            priority: item.priority,
            weight: None,
            port: None,
            line: item.line.filter(|l| !l.is_empty()),
            status: item.status,
        })
    }

    /// Shared parameter block for `AddDomainRecord` / `UpdateDomainRecord`.
    fn record_params(record: &DnsRecord, params: &mut BTreeMap<String, String>) {
        params.insert("RR".to_string(), record.normalized_name().to_string());
        params.insert("Type".to_string(), record.record_type.as_str().to_string());
        params.insert("Value".to_string(), record.value.clone());
        params.insert("TTL".to_string(), record.ttl.to_string());

        if matches!(record.record_type, RecordType::Mx | RecordType::Srv) {
            if let Some(priority) = record.priority {
                params.insert("Priority".to_string(), priority.to_string());
            }
        }
        if let Some(line) = record.line.as_ref().filter(|l| !l.is_empty()) {
            params.insert("Line".to_string(), line.clone());
        }
    }
}

#[async_trait]
impl DnsProvider for AliyunProvider {
    fn name(&self) -> &'static str {
        "aliyun"
    }

    fn validate_config(&self) -> Result<()> {
        if self.config.api_key.is_empty() {
            return Err(DnsError::ConfigError {
                provider: "aliyun".to_string(),
                detail: "api_key must not be empty".to_string(),
            });
        }
        if self.config.api_secret.is_empty() {
            return Err(DnsError::ConfigError {
                provider: "aliyun".to_string(),
                detail: "api_secret must not be empty".to_string(),
            });
        }
        Ok(())
    }

    async fn test_connection(&self) -> Result<()> {
        let mut params = BTreeMap::new();
        params.insert("PageNumber".to_string(), "1".to_string());
        params.insert("PageSize".to_string(), "1".to_string());

        let _: DescribeDomainsResponse = self
            .request("DescribeDomains", params, ErrorContext::default())
            .await?;
        Ok(())
    }

    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        let mut records: Vec<DnsRecord> = Vec::new();
        let mut page = 1u32;

        loop {
            let mut params = BTreeMap::new();
            params.insert("DomainName".to_string(), domain.to_string());
            params.insert("PageNumber".to_string(), page.to_string());
            params.insert("PageSize".to_string(), ALIYUN_PAGE_SIZE.to_string());

            let response: DescribeDomainRecordsResponse = self
                .request("DescribeDomainRecords", params, ErrorContext::domain(domain))
                .await?;

            let batch = response
                .domain_records
                .and_then(|r| r.record)
                .unwrap_or_default();
            let batch_len = batch.len();
            records.extend(batch.into_iter().filter_map(Self::convert_record));

            let total = response.total_count.unwrap_or(records.len() as u64);
            if batch_len == 0 || (records.len() as u64) >= total {
                break;
            }
            page += 1;
        }

        Ok(records)
    }

    async fn get_record(&self, domain: &str, record_id: &str) -> Result<DnsRecord> {
        let mut params = BTreeMap::new();
        params.insert("RecordId".to_string(), record_id.to_string());

        let info: DescribeDomainRecordInfoResponse = self
            .request(
                "DescribeDomainRecordInfo",
                params,
                ErrorContext::record(domain, record_id),
            )
            .await?;

        Ok(DnsRecord {
            id: info.record_id,
            name: info.rr,
            record_type: parse_record_type(&info.record_type, "aliyun")?,
            value: info.value,
            ttl: info.ttl,
            priority: info.priority,
            weight: None,
            port: None,
            line: info.line.filter(|l| !l.is_empty()),
            status: info.status,
        })
    }

    async fn add_record(&self, domain: &str, record: &DnsRecord) -> Result<DnsRecord> {
        record.validate_for(&self.features())?;

        let mut params = BTreeMap::new();
        params.insert("DomainName".to_string(), domain.to_string());
        Self::record_params(record, &mut params);

        let response: AddDomainRecordResponse = self
            .request("AddDomainRecord", params, ErrorContext::domain(domain))
            .await?;

        let mut created = record.clone();
        created.id = response.record_id;
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

        let mut params = BTreeMap::new();
        params.insert("RecordId".to_string(), record_id.to_string());
        Self::record_params(record, &mut params);

        let _: UpdateDomainRecordResponse = self
            .request(
                "UpdateDomainRecord",
                params,
                ErrorContext::record(domain, record_id),
            )
            .await?;
        Ok(())
    }

    async fn delete_record(&self, domain: &str, record_id: &str) -> Result<()> {
        let mut params = BTreeMap::new();
        params.insert("RecordId".to_string(), record_id.to_string());

        let _: DeleteDomainRecordResponse = self
            .request(
                "DeleteDomainRecord",
                params,
                ErrorContext::record(domain, record_id),
            )
            .await?;
        Ok(())
    }
}
