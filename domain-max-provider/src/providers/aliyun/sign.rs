//! Aliyun RPC-style HMAC-SHA1 request signing.
//!
//! Reference: <https://help.aliyun.com/zh/sdk/product-overview/rpc-mechanism>

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::providers::common::hmac_sha1;

/// RFC 3986 percent-encoding as Aliyun expects it: uppercase hex,
/// space as `%20`, unreserved set `A-Z a-z 0-9 - _ . ~`.
pub(crate) fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Canonical query string: parameters sorted by key ascending (a
/// `BTreeMap` keeps them sorted), keys and values percent-encoded,
/// joined with `&`. The `Signature` parameter must not be present.
pub(crate) fn canonical_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Compute the request signature for an HTTP GET.
///
/// String-to-sign is `"GET&" + enc("/") + "&" + enc(canonicalQuery)`,
/// the signing key is `api_secret + "&"`, and the result is the
/// base64-encoded HMAC-SHA1 digest.
pub(crate) fn signature(api_secret: &str, params: &BTreeMap<String, String>) -> String {
    let string_to_sign = format!(
        "GET&{}&{}",
        percent_encode("/"),
        percent_encode(&canonical_query(params))
    );
    let key = format!("{api_secret}&");
    BASE64.encode(hmac_sha1(key.as_bytes(), string_to_sign.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params() -> BTreeMap<String, String> {
        [
            ("Action", "DescribeDomains"),
            ("Version", "2015-01-09"),
            ("Format", "JSON"),
            ("AccessKeyId", "AK"),
            ("SignatureMethod", "HMAC-SHA1"),
            ("SignatureVersion", "1.0"),
            ("SignatureNonce", "N"),
            ("Timestamp", "2024-01-01T00:00:00Z"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn canonical_query_sorted_and_encoded() {
        // Recorded reference: keys sorted ascending, ':' encoded with
        // uppercase hex.
        assert_eq!(
            canonical_query(&base_params()),
            "AccessKeyId=AK&Action=DescribeDomains&Format=JSON&SignatureMethod=HMAC-SHA1\
             &SignatureNonce=N&SignatureVersion=1.0&Timestamp=2024-01-01T00%3A00%3A00Z\
             &Version=2015-01-09"
        );
    }

    #[test]
    fn signature_matches_recorded_reference() {
        assert_eq!(signature("SK", &base_params()), "xxE0eU2ZJl+ukMCmeFVQMN/ngc0=");
    }

    #[test]
    fn signature_second_reference_with_domain_params() {
        let mut params = base_params();
        params.insert("Action".to_string(), "DescribeDomainRecords".to_string());
        params.insert("DomainName".to_string(), "example.com".to_string());
        params.insert("PageSize".to_string(), "500".to_string());
        assert_eq!(signature("SK", &params), "fo6PXKaF8SbsCnOKEIEVc4ZfeN4=");
    }

    #[test]
    fn signature_deterministic() {
        let params = base_params();
        assert_eq!(signature("SK", &params), signature("SK", &params));
    }

    #[test]
    fn signature_changes_with_secret() {
        let params = base_params();
        assert_ne!(signature("SK", &params), signature("SK2", &params));
    }

    #[test]
    fn signature_changes_with_any_param() {
        let params = base_params();
        let mut other = base_params();
        other.insert("SignatureNonce".to_string(), "M".to_string());
        assert_ne!(signature("SK", &params), signature("SK", &other));
    }

    #[test]
    fn percent_encoding_space_and_reserved() {
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("a+b/c"), "a%2Bb%2Fc");
        assert_eq!(percent_encode("safe-chars_.~"), "safe-chars_.~");
    }
}
