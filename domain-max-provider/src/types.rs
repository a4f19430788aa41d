use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DnsError, Result};

// ============ Record Types ============

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Pointer (reverse lookup) record.
    Ptr,
    /// Certificate Authority Authorization record.
    Caa,
}

impl RecordType {
    /// Uppercase wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Ptr => "PTR",
            Self::Caa => "CAA",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Canonical DNS Record ============

/// A vendor-neutral DNS record.
///
/// The `name` field holds the bare subdomain label; `"@"` (or empty, which
/// adapters normalize to `"@"`) means the zone apex. Vendor-specific fields
/// (`line`, `status`) are carried opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Opaque vendor record id. Empty on records that have not been created.
    #[serde(default)]
    pub id: String,
    /// Subdomain label (`"www"`, `"@"` for apex).
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record value (IP address, target hostname, text, ...).
    pub value: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Priority, required for MX and SRV records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// SRV weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    /// SRV port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Vendor resolution line tag, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    /// Vendor-reported status (`"active"`, `"proxied"`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl DnsRecord {
    /// Create a record with the given name, type, value and TTL; the id and
    /// the optional fields start empty.
    #[must_use]
    pub fn new(name: impl Into<String>, record_type: RecordType, value: impl Into<String>, ttl: u32) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            record_type,
            value: value.into(),
            ttl,
            priority: None,
            weight: None,
            port: None,
            line: None,
            status: None,
        }
    }

    /// Subdomain label with the empty-string spelling normalized to `"@"`.
    #[must_use]
    pub fn normalized_name(&self) -> &str {
        if self.name.is_empty() {
            "@"
        } else {
            &self.name
        }
    }

    /// Check the canonical invariants of this record.
    ///
    /// Verifies type-specific value shapes (dotted-quad for A, IPv6 for
    /// AAAA, hostname for CNAME/NS/PTR, length for TXT), the presence of
    /// priority for MX/SRV and of weight/port for SRV, and a positive TTL.
    pub fn validate(&self) -> Result<()> {
        if self.ttl == 0 {
            return Err(field_error("ttl", "TTL must be positive"));
        }

        match self.record_type {
            RecordType::A => {
                if self.value.parse::<Ipv4Addr>().is_err() {
                    return Err(field_error(
                        "value",
                        format!("'{}' is not a valid IPv4 address", self.value),
                    ));
                }
            }
            RecordType::Aaaa => {
                if self.value.parse::<Ipv6Addr>().is_err() {
                    return Err(field_error(
                        "value",
                        format!("'{}' is not a valid IPv6 address", self.value),
                    ));
                }
            }
            RecordType::Cname | RecordType::Ns | RecordType::Ptr => {
                if !is_valid_hostname(&self.value) {
                    return Err(field_error(
                        "value",
                        format!("'{}' is not a valid domain name", self.value),
                    ));
                }
            }
            RecordType::Txt => {
                if self.value.len() > 255 {
                    return Err(field_error("value", "TXT value exceeds 255 bytes"));
                }
            }
            RecordType::Mx => {
                if self.priority.is_none() {
                    return Err(field_error("priority", "MX records require a priority"));
                }
            }
            RecordType::Srv => {
                if self.priority.is_none() {
                    return Err(field_error("priority", "SRV records require a priority"));
                }
                if self.weight.is_none() {
                    return Err(field_error("weight", "SRV records require a weight"));
                }
                if self.port.is_none() {
                    return Err(field_error("port", "SRV records require a port"));
                }
            }
            RecordType::Caa => {}
        }

        Ok(())
    }

    /// Validate against a specific provider's declared capabilities:
    /// canonical invariants first, then type support and TTL bounds.
    pub fn validate_for(&self, features: &ProviderFeatures) -> Result<()> {
        self.validate()?;

        if !features.supported_record_types.contains(&self.record_type) {
            return Err(field_error(
                "type",
                format!("record type {} is not supported by this provider", self.record_type),
            ));
        }
        if self.ttl < features.min_ttl || self.ttl > features.max_ttl {
            return Err(field_error(
                "ttl",
                format!(
                    "TTL {} outside provider range [{}, {}]",
                    self.ttl, features.min_ttl, features.max_ttl
                ),
            ));
        }

        Ok(())
    }
}

fn field_error(param: &str, detail: impl Into<String>) -> DnsError {
    DnsError::ValidationError {
        param: param.to_string(),
        detail: detail.into(),
    }
}

/// Loose hostname check: dot-separated labels of legal length and
/// characters. Underscores are allowed (service labels like `_dmarc`),
/// a single trailing dot is tolerated.
fn is_valid_hostname(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > 253 {
        return false;
    }
    name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

// ============ Provider Configuration ============

/// Credentials and connection settings for one provider instance.
///
/// Materialized from a decrypted JSON blob at request time. The `Debug`
/// implementation redacts secret material so configs can never leak
/// through logging.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Vendor API key / access key id.
    #[serde(default)]
    pub api_key: String,
    /// Vendor API secret / access key secret.
    #[serde(default)]
    pub api_secret: String,
    /// Bearer-style API token (Cloudflare).
    #[serde(default)]
    pub token: String,
    /// Vendor region, where applicable.
    #[serde(default)]
    pub region: String,
    /// Endpoint override; blank means the vendor default.
    #[serde(default)]
    pub endpoint: String,
    /// The full flat configuration map, carrying vendor-specific extras
    /// such as Cloudflare's auth email.
    #[serde(default)]
    pub extra_params: HashMap<String, String>,
}

impl ProviderConfig {
    /// Build a config from a flat map, pulling the recognized keys and
    /// preserving the whole map as `extra_params`.
    #[must_use]
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).cloned().unwrap_or_default();
        Self {
            api_key: get("api_key"),
            api_secret: get("api_secret"),
            token: get("token"),
            region: get("region"),
            endpoint: get("endpoint"),
            extra_params: map.clone(),
        }
    }

    /// Whether the config carries any usable credential: a key/secret pair
    /// or a token.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        (!self.api_key.is_empty() && !self.api_secret.is_empty()) || !self.token.is_empty()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(s: &str) -> &'static str {
            if s.is_empty() {
                "<empty>"
            } else {
                "<redacted>"
            }
        }
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("token", &redact(&self.token))
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("extra_params", &format_args!("<{} entries>", self.extra_params.len()))
            .finish()
    }
}

// ============ Provider Features ============

/// Static per-vendor capability descriptor, used by callers for
/// client-side preflight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderFeatures {
    /// Record types the vendor accepts.
    pub supported_record_types: Vec<RecordType>,
    /// Whether the vendor has a native batch API.
    pub supports_batch: bool,
    /// Whether the vendor supports resolution line tags.
    pub supports_line_types: bool,
    /// Maximum records per domain.
    pub max_records_per_domain: u32,
    /// Minimum accepted TTL in seconds.
    pub min_ttl: u32,
    /// Maximum accepted TTL in seconds.
    pub max_ttl: u32,
}

// ============ Retry Configuration ============

/// Exponential-backoff retry policy for transient provider errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of re-attempts after the first try.
    pub max_retries: u32,
    /// Delay before the first re-attempt.
    pub initial_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
    /// Multiplier applied per attempt.
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_factor: 2.0,
        }
    }
}

impl RetryConfig {
    /// Delay before re-attempt number `attempt` (1-based):
    /// `min(max_delay, initial_delay * backoff_factor^(attempt - 1))`.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = self.backoff_factor.powi(attempt.saturating_sub(1).min(64) as i32);
        let delay = self.initial_delay.mul_f64(factor.max(0.0));
        delay.min(self.max_delay)
    }
}

// ============ Batch Operations ============

/// Outcome of a batch add: the records that were created plus a failure
/// entry for every record that was not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAddResult {
    /// Successfully created records, in submission order.
    pub added: Vec<DnsRecord>,
    /// Per-record failures, identified by submission index.
    pub failures: Vec<BatchAddFailure>,
}

impl BatchAddResult {
    /// Whether every record in the batch was created.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A single failed record in a batch add.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAddFailure {
    /// Index of the record in the submitted slice.
    pub index: usize,
    /// Subdomain label of the failed record.
    pub name: String,
    /// Why it failed.
    pub reason: String,
}
