//! Tencent Cloud TC3-HMAC-SHA256 request signing.
//!
//! Reference: <https://cloud.tencent.com/document/api/1427/56189>

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::providers::common::hmac_sha256;

use super::DNSPOD_SERVICE;

/// Compute the `Authorization` header for one POST.
///
/// Deterministic given `(host, payload, timestamp)`; the signed header set
/// is fixed to `content-type;host`, so the action header does not enter
/// the signature scope.
pub(crate) fn authorization(
    secret_id: &str,
    secret_key: &str,
    host: &str,
    payload: &str,
    timestamp: i64,
) -> String {
    let date = DateTime::<Utc>::from_timestamp(timestamp, 0)
        .unwrap_or_else(Utc::now)
        .format("%Y-%m-%d")
        .to_string();

    // 1. Canonical request
    let canonical_headers =
        format!("content-type:application/json; charset=utf-8\nhost:{host}\n");
    let signed_headers = "content-type;host";
    let hashed_payload = hex::encode(Sha256::digest(payload.as_bytes()));
    let canonical_request =
        format!("POST\n/\n\n{canonical_headers}\n{signed_headers}\n{hashed_payload}");

    // 2. String to sign
    let algorithm = "TC3-HMAC-SHA256";
    let credential_scope = format!("{date}/{DNSPOD_SERVICE}/tc3_request");
    let hashed_canonical_request = hex::encode(Sha256::digest(canonical_request.as_bytes()));
    let string_to_sign =
        format!("{algorithm}\n{timestamp}\n{credential_scope}\n{hashed_canonical_request}");

    // 3. Key derivation chain and signature
    let secret_date = hmac_sha256(format!("TC3{secret_key}").as_bytes(), date.as_bytes());
    let secret_service = hmac_sha256(&secret_date, DNSPOD_SERVICE.as_bytes());
    let secret_signing = hmac_sha256(&secret_service, b"tc3_request");
    let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes()));

    // 4. Assembled header
    format!(
        "{algorithm} Credential={secret_id}/{credential_scope}, \
         SignedHeaders={signed_headers}, Signature={signature}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "dnspod.tencentcloudapi.com";
    // 2024-01-01T00:00:00Z
    const TS: i64 = 1_704_067_200;

    #[test]
    fn authorization_matches_recorded_reference() {
        let auth = authorization("AK", "SK", HOST, r#"{"Limit":1}"#, TS);
        assert_eq!(
            auth,
            "TC3-HMAC-SHA256 Credential=AK/2024-01-01/dnspod/tc3_request, \
             SignedHeaders=content-type;host, \
             Signature=ebae1ea98f24284d012a4b94a1ba3ef7bc055058796f9d6365d7a8755870b16c"
        );
    }

    #[test]
    fn credential_scope_uses_utc_date() {
        let auth = authorization("AK", "SK", HOST, "{}", TS);
        assert!(auth.contains("Credential=AK/2024-01-01/dnspod/tc3_request"));

        // Same day, later hour: scope unchanged
        let evening = authorization("AK", "SK", HOST, "{}", TS + 20 * 3600);
        assert!(evening.contains("/2024-01-01/"));

        // Next day: scope rolls over
        let next_day = authorization("AK", "SK", HOST, "{}", TS + 25 * 3600);
        assert!(next_day.contains("/2024-01-02/"));
    }

    #[test]
    fn deterministic() {
        let a = authorization("AK", "SK", HOST, r#"{"Domain":"x.com"}"#, TS);
        let b = authorization("AK", "SK", HOST, r#"{"Domain":"x.com"}"#, TS);
        assert_eq!(a, b);
    }

    #[test]
    fn payload_changes_signature() {
        let a = authorization("AK", "SK", HOST, r#"{"Domain":"a.com"}"#, TS);
        let b = authorization("AK", "SK", HOST, r#"{"Domain":"b.com"}"#, TS);
        assert_ne!(
            a.rsplit("Signature=").next(),
            b.rsplit("Signature=").next()
        );
    }

    #[test]
    fn secret_changes_signature() {
        let a = authorization("AK", "alpha", HOST, "{}", TS);
        let b = authorization("AK", "beta", HOST, "{}", TS);
        assert_ne!(
            a.rsplit("Signature=").next(),
            b.rsplit("Signature=").next()
        );
    }

    #[test]
    fn signature_is_64_hex_chars() {
        let auth = authorization("AK", "SK", HOST, "{}", TS);
        let sig = auth.rsplit("Signature=").next().unwrap_or_default();
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
