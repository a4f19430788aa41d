//! DNSPod adapter tests against a mocked API.

use std::collections::HashMap;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use domain_max_provider::{DnsError, DnsRecord, ProviderManager, RecordType};

fn config_with_endpoint(server: &MockServer) -> HashMap<String, String> {
    [
        ("api_key".to_string(), "AK".to_string()),
        ("api_secret".to_string(), "SK".to_string()),
        ("endpoint".to_string(), server.uri()),
    ]
    .into()
}

async fn mock_domain_list(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("X-TC-Action", "DescribeDomainList"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": {
                "RequestId": "req-domains",
                "DomainList": [
                    { "DomainId": 1234, "Name": "example.com", "Status": "ENABLE" }
                ]
            }
        })))
        .mount(server)
        .await;
}

async fn mock_record_list(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("X-TC-Action", "DescribeRecordList"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": {
                "RequestId": "req-records",
                "RecordCountInfo": { "TotalCount": 2 },
                "RecordList": [
                    {
                        "RecordId": 100,
                        "Name": "www",
                        "Type": "A",
                        "Value": "1.2.3.4",
                        "TTL": 600,
                        "Line": "默认",
                        "Status": "ENABLE"
                    },
                    {
                        "RecordId": 200,
                        "Name": "@",
                        "Type": "MX",
                        "Value": "mx.example.net",
                        "TTL": 600,
                        "MX": 10,
                        "Line": "默认",
                        "Status": "ENABLE"
                    }
                ]
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn list_records_resolves_domain_id_first() {
    let server = MockServer::start().await;
    mock_domain_list(&server).await;
    mock_record_list(&server).await;

    let manager = ProviderManager::new();
    manager
        .register("dp", "dnspod", &config_with_endpoint(&server))
        .expect("registration should succeed");
    let provider = manager.get("dp").expect("provider should be registered");

    let records = provider
        .list_records("example.com")
        .await
        .expect("list_records should succeed");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "100");
    assert_eq!(records[0].name, "www");
    assert_eq!(records[1].record_type, RecordType::Mx);
    assert_eq!(records[1].priority, Some(10));

    // Both the domain lookup and the record list must have been called
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn requests_carry_tc3_headers() {
    let server = MockServer::start().await;
    mock_domain_list(&server).await;

    let manager = ProviderManager::new();
    manager
        .register("dp", "dnspod", &config_with_endpoint(&server))
        .expect("registration should succeed");
    manager.test("dp").await.expect("connection test should pass");

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;

    let auth = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(auth.starts_with("TC3-HMAC-SHA256 Credential=AK/"));
    assert!(auth.contains("SignedHeaders=content-type;host"));

    assert_eq!(
        headers
            .get("X-TC-Version")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default(),
        "2021-03-23"
    );
    assert_eq!(
        headers
            .get("X-TC-Region")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default(),
        "ap-beijing"
    );
    assert!(headers.contains_key("X-TC-Timestamp"));
}

#[tokio::test]
async fn get_record_filters_the_list() {
    let server = MockServer::start().await;
    mock_domain_list(&server).await;
    mock_record_list(&server).await;

    let manager = ProviderManager::new();
    manager
        .register("dp", "dnspod", &config_with_endpoint(&server))
        .expect("registration should succeed");
    let provider = manager.get("dp").expect("provider should be registered");

    let record = provider
        .get_record("example.com", "200")
        .await
        .expect("get_record should succeed");
    assert_eq!(record.name, "@");
    assert_eq!(record.record_type, RecordType::Mx);

    let res = provider.get_record("example.com", "999").await;
    assert!(
        matches!(&res, Err(DnsError::NotFound { .. })),
        "unexpected result: {res:?}"
    );
}

#[tokio::test]
async fn add_record_sends_numeric_domain_id_and_echoes_input() {
    let server = MockServer::start().await;
    mock_domain_list(&server).await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("X-TC-Action", "CreateRecord"))
        .and(body_partial_json(json!({
            "Domain": "example.com",
            "DomainId": 1234,
            "SubDomain": "www",
            "RecordType": "A",
            "Value": "1.2.3.4",
            "TTL": 600
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": { "RequestId": "req-create", "RecordId": 4567 }
        })))
        .mount(&server)
        .await;

    let manager = ProviderManager::new();
    manager
        .register("dp", "dnspod", &config_with_endpoint(&server))
        .expect("registration should succeed");
    let provider = manager.get("dp").expect("provider should be registered");

    let record = DnsRecord::new("www", RecordType::A, "1.2.3.4", 600);
    let created = provider
        .add_record("example.com", &record)
        .await
        .expect("add_record should succeed");

    assert_eq!(created.id, "4567");
    assert_eq!(created.name, "www");
    assert_eq!(created.value, "1.2.3.4");
}

#[tokio::test]
async fn unknown_domain_is_not_found() {
    let server = MockServer::start().await;
    mock_domain_list(&server).await;

    let manager = ProviderManager::new();
    manager
        .register("dp", "dnspod", &config_with_endpoint(&server))
        .expect("registration should succeed");
    let provider = manager.get("dp").expect("provider should be registered");

    let res = provider.list_records("unknown.org").await;
    assert!(
        matches!(&res, Err(DnsError::NotFound { .. })),
        "unexpected result: {res:?}"
    );
}

#[tokio::test]
async fn auth_failure_code_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": {
                "RequestId": "req-auth",
                "Error": {
                    "Code": "AuthFailure.SignatureFailure",
                    "Message": "The provided credentials could not be validated."
                }
            }
        })))
        .mount(&server)
        .await;

    let manager = ProviderManager::new();
    manager
        .register("dp", "dnspod", &config_with_endpoint(&server))
        .expect("registration should succeed");

    let res = manager.test("dp").await;
    assert!(
        matches!(&res, Err(DnsError::AuthError { .. })),
        "unexpected result: {res:?}"
    );
}

#[tokio::test]
async fn non_numeric_record_id_is_a_validation_error() {
    let server = MockServer::start().await;
    mock_domain_list(&server).await;

    let manager = ProviderManager::new();
    manager
        .register("dp", "dnspod", &config_with_endpoint(&server))
        .expect("registration should succeed");
    let provider = manager.get("dp").expect("provider should be registered");

    let res = provider.delete_record("example.com", "abc").await;
    assert!(
        matches!(&res, Err(DnsError::ValidationError { .. })),
        "unexpected result: {res:?}"
    );
}
