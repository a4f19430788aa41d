//! Cloudflare `DnsProvider` implementation.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{DnsError, Result};
use crate::providers::common::{full_name_to_relative, parse_record_type, relative_to_full_name};
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{DnsRecord, RecordType};

use super::{
    CloudflareDnsRecord, CloudflareProvider, CloudflareSrvData, CloudflareZone,
    CF_RECORDS_PER_PAGE,
};

/// Body for record create/update calls.
#[derive(Serialize)]
struct RecordBody {
    #[serde(rename = "type")]
    record_type: String,
    name: String,
    content: String,
    ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<CloudflareSrvData>,
}

impl CloudflareProvider {
    /// Resolve the zone id for an apex name by exact match. Resolved lazily
    /// on every call; nothing is cached across caller operations.
    pub(crate) async fn resolve_zone_id(&self, domain: &str) -> Result<String> {
        let path = format!("/zones?name={}", urlencoding::encode(domain));
        let zones: Vec<CloudflareZone> =
            self.get(&path, &ErrorContext::domain(domain)).await?;

        zones
            .into_iter()
            .find(|z| z.name == domain)
            .map(|z| z.id)
            .ok_or_else(|| DnsError::NotFound {
                provider: "cloudflare".to_string(),
                resource: format!("domain '{domain}'"),
                raw_message: None,
            })
    }

    /// Map a wire record back to the canonical shape: the fully-qualified
    /// name collapses to a bare label, proxying shows up as status, and
    /// SRV specifics come out of the structured `data` object.
    fn convert_record(record: CloudflareDnsRecord, domain: &str) -> Option<DnsRecord> {
        let record_type = parse_record_type(&record.record_type, "cloudflare").ok()?;

        let srv: Option<CloudflareSrvData> = record
            .data
            .and_then(|d| serde_json::from_value(d).ok());

        let priority = record
            .priority
            .or_else(|| srv.as_ref().map(|d| d.priority));

        let status = match record.proxied {
            Some(true) => "proxied",
            _ => "active",
        };

        // SRV content is the composed "priority weight port target" string;
        // the canonical value is the bare target
        let value = srv
            .as_ref()
            .map_or(record.content, |d| d.target.clone());

        Some(DnsRecord {
            id: record.id,
            name: full_name_to_relative(&record.name, domain),
            record_type,
            value,
            ttl: record.ttl,
            priority,
            weight: srv.as_ref().map(|d| d.weight),
            port: srv.as_ref().map(|d| d.port),
            line: None,
            status: Some(status.to_string()),
        })
    }

    fn record_body(record: &DnsRecord, domain: &str) -> RecordBody {
        let full_name = relative_to_full_name(record.normalized_name(), domain);

        let priority = if matches!(record.record_type, RecordType::Mx | RecordType::Srv) {
            record.priority
        } else {
            None
        };

        if record.record_type == RecordType::Srv {
            let data = CloudflareSrvData {
                priority: record.priority.unwrap_or_default(),
                weight: record.weight.unwrap_or_default(),
                port: record.port.unwrap_or_default(),
                target: record.value.clone(),
            };
            // SRV content mirrors the data object: "priority weight port target"
            let content = format!(
                "{} {} {} {}",
                data.priority, data.weight, data.port, data.target
            );
            return RecordBody {
                record_type: record.record_type.as_str().to_string(),
                name: full_name,
                content,
                ttl: record.ttl,
                priority,
                data: Some(data),
            };
        }

        RecordBody {
            record_type: record.record_type.as_str().to_string(),
            name: full_name,
            content: record.value.clone(),
            ttl: record.ttl,
            priority,
            data: None,
        }
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn name(&self) -> &'static str {
        "cloudflare"
    }

    fn validate_config(&self) -> Result<()> {
        // Either auth path must be fully specified
        super::auth::auth_headers(&self.config).map(|_| ())
    }

    async fn test_connection(&self) -> Result<()> {
        let _: serde_json::Value = self.get("/user", &ErrorContext::default()).await?;
        Ok(())
    }

    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        let zone_id = self.resolve_zone_id(domain).await?;
        let ctx = ErrorContext::domain(domain);

        let mut records: Vec<DnsRecord> = Vec::new();
        let mut page = 1u32;

        loop {
            let path = format!(
                "/zones/{zone_id}/dns_records?page={page}&per_page={CF_RECORDS_PER_PAGE}"
            );
            let response = self
                .call::<Vec<CloudflareDnsRecord>, ()>(reqwest::Method::GET, &path, None, &ctx)
                .await?;

            let batch = response.result.unwrap_or_default();
            let batch_len = batch.len();
            records.extend(
                batch
                    .into_iter()
                    .filter_map(|r| Self::convert_record(r, domain)),
            );

            let total = response
                .result_info
                .and_then(|i| i.total_count)
                .unwrap_or(records.len() as u64);
            if batch_len == 0 || (records.len() as u64) >= total {
                break;
            }
            page += 1;
        }

        Ok(records)
    }

    async fn get_record(&self, domain: &str, record_id: &str) -> Result<DnsRecord> {
        let zone_id = self.resolve_zone_id(domain).await?;
        let ctx = ErrorContext::record(domain, record_id);

        let record: CloudflareDnsRecord = self
            .get(&format!("/zones/{zone_id}/dns_records/{record_id}"), &ctx)
            .await?;

        Self::convert_record(record, domain).ok_or_else(|| DnsError::ParseError {
            provider: "cloudflare".to_string(),
            detail: format!("record '{record_id}' has an unrecognized type"),
        })
    }

    async fn add_record(&self, domain: &str, record: &DnsRecord) -> Result<DnsRecord> {
        record.validate_for(&self.features())?;

        let zone_id = self.resolve_zone_id(domain).await?;
        let body = Self::record_body(record, domain);

        let created: CloudflareDnsRecord = self
            .post(
                &format!("/zones/{zone_id}/dns_records"),
                &body,
                &ErrorContext::domain(domain),
            )
            .await?;

        let mut result = record.clone();
        result.id = created.id;
        result.name = record.normalized_name().to_string();
        Ok(result)
    }

    async fn update_record(
        &self,
        domain: &str,
        record_id: &str,
        record: &DnsRecord,
    ) -> Result<()> {
        record.validate_for(&self.features())?;

        let zone_id = self.resolve_zone_id(domain).await?;
        let body = Self::record_body(record, domain);

        self.put(
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            &body,
            &ErrorContext::record(domain, record_id),
        )
        .await
    }

    async fn delete_record(&self, domain: &str, record_id: &str) -> Result<()> {
        let zone_id = self.resolve_zone_id(domain).await?;
        self.delete(
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            &ErrorContext::record(domain, record_id),
        )
        .await
    }
}
