//! Shared adapter helpers.

use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::Client;
use sha1::Sha1;
use sha2::Sha256;

use crate::error::{DnsError, Result};
use crate::types::RecordType;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

// ============ HTTP Client ============

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Per-request timeout, independent of any caller deadline; the shorter
/// of the two applies.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build the adapter HTTP client with the standard timeouts.
pub(crate) fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_default()
}

// ============ Record Type Conversion ============

/// Parse a vendor record-type string into the canonical enum.
pub(crate) fn parse_record_type(record_type: &str, provider: &str) -> Result<RecordType> {
    match record_type.to_uppercase().as_str() {
        "A" => Ok(RecordType::A),
        "AAAA" => Ok(RecordType::Aaaa),
        "CNAME" => Ok(RecordType::Cname),
        "MX" => Ok(RecordType::Mx),
        "TXT" => Ok(RecordType::Txt),
        "NS" => Ok(RecordType::Ns),
        "SRV" => Ok(RecordType::Srv),
        "PTR" => Ok(RecordType::Ptr),
        "CAA" => Ok(RecordType::Caa),
        _ => Err(DnsError::ParseError {
            provider: provider.to_string(),
            detail: format!("unrecognized record type: {record_type}"),
        }),
    }
}

// ============ HMAC ============

/// HMAC-SHA1 (Aliyun request signing).
pub(crate) fn hmac_sha1(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = match HmacSha1::new_from_slice(key) {
        Ok(mac) => mac,
        Err(_) => return Vec::new(), // HMAC accepts keys of any size
    };
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// HMAC-SHA256 (Tencent TC3 key derivation chain).
pub(crate) fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = match HmacSha256::new_from_slice(key) {
        Ok(mac) => mac,
        Err(_) => return Vec::new(),
    };
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

// ============ Name Handling ============

/// Strip a single trailing dot.
pub(crate) fn normalize_domain_name(name: &str) -> &str {
    name.trim_end_matches('.')
}

/// Fully-qualified name to the bare subdomain label relative to `zone`:
/// `"www.example.com" + "example.com" -> "www"`, the apex itself -> `"@"`.
pub(crate) fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = normalize_domain_name(full_name);
    let zone = normalize_domain_name(zone_name);

    if full == zone {
        "@".to_string()
    } else if let Some(subdomain) = full.strip_suffix(&format!(".{zone}")) {
        subdomain.to_string()
    } else {
        full.to_string()
    }
}

/// Bare subdomain label to a fully-qualified name:
/// `"www" + "example.com" -> "www.example.com"`, `"@"`/empty -> the apex.
pub(crate) fn relative_to_full_name(relative_name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);

    if relative_name == "@" || relative_name.is_empty() {
        zone.to_string()
    } else {
        format!("{relative_name}.{zone}")
    }
}
