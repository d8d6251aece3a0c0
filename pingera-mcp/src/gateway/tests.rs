use std::sync::Arc;
use std::time::Duration;

use pingera_sdk::{ErrorKind, PingeraClient, RetryConfig};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use wiremock::matchers::{any, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::envelope::Envelope;
use crate::params::PageIdParams;

fn page_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Test Page",
        "url": "https://example.com",
        "subdomain": "test",
        "language": "en",
        "css_body_bg_color": "#ffffff",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "organization_id": "org123"
    })
}

fn gateway_for(server: &MockServer, mode: OperationMode) -> Gateway {
    let settings = Arc::new(Settings {
        base_url: format!("{}/v1", server.uri()),
        timeout: Duration::from_secs(5),
        mode,
        ..Settings::new("test-key")
    });
    let client = PingeraClient::builder()
        .api_key("test-key")
        .base_url(&settings.base_url)
        .timeout(settings.timeout)
        .retry_config(RetryConfig {
            max_retries: 2,
            base_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(20),
            jitter: 0.0,
        })
        .build()
        .unwrap();
    Gateway::with_client(settings, client)
}

/// Tool arguments as a client would send them
fn args<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

/// Mount a catch-all that fails the test if any request arrives
async fn forbid_requests(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(server)
        .await;
}

// ===== Mode Gate Tests =====

#[tokio::test]
async fn test_read_only_rejects_every_write_without_network() {
    let server = MockServer::start().await;
    forbid_requests(&server).await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let page = || args(json!({"page_id": "p1"}));
    let check = || args(json!({"check_id": "c1"}));
    let heartbeat = || args(json!({"heartbeat_id": "hb1"}));
    let update = json!({
        "page_id": "p1",
        "check_id": "c1",
        "heartbeat_id": "hb1",
        "fields": {"name": "x"}
    });

    let results: Vec<(&str, Envelope)> = vec![
        ("create_page", gw.create_page(args(json!({"name": "New"}))).await.into()),
        ("update_page", gw.update_page(args(update.clone())).await.into()),
        ("patch_page", gw.patch_page(args(update.clone())).await.into()),
        ("delete_page", gw.delete_page(page()).await.into()),
        (
            "create_component",
            gw.create_component(args(json!({"page_id": "p1", "name": "API"})))
                .await
                .into(),
        ),
        (
            "update_component",
            gw.update_component(args(json!({"page_id": "p1", "component_id": "c1"})))
                .await
                .into(),
        ),
        (
            "delete_component",
            gw.delete_component(args(json!({"page_id": "p1", "component_id": "c1"})))
                .await
                .into(),
        ),
        (
            "create_check",
            gw.create_check(args(json!({
                "name": "site",
                "type": "web",
                "url": "https://example.com"
            })))
            .await
            .into(),
        ),
        ("update_check", gw.update_check(args(update.clone())).await.into()),
        ("delete_check", gw.delete_check(check()).await.into()),
        ("pause_check", gw.pause_check(check()).await.into()),
        ("resume_check", gw.resume_check(check()).await.into()),
        (
            "execute_custom_check",
            gw.execute_custom_check(args(json!({"url": "https://example.com"})))
                .await
                .into(),
        ),
        ("execute_existing_check", gw.execute_existing_check(check()).await.into()),
        (
            "create_heartbeat",
            gw.create_heartbeat(args(json!({"name": "cron", "period": 60})))
                .await
                .into(),
        ),
        ("update_heartbeat", gw.update_heartbeat(args(update.clone())).await.into()),
        ("delete_heartbeat", gw.delete_heartbeat(heartbeat()).await.into()),
        ("send_heartbeat_ping", gw.send_heartbeat_ping(heartbeat()).await.into()),
    ];

    for (operation, envelope) in results {
        assert!(!envelope.ok, "{} should fail", operation);
        assert_eq!(envelope.error_kind(), Some(ErrorKind::PermissionDenied));
        let message = &envelope.error.as_ref().unwrap().message;
        assert!(message.contains(operation), "{}", message);
        assert!(message.contains("read_only"));
    }
}

#[tokio::test]
async fn test_mode_gate_runs_before_validation() {
    let server = MockServer::start().await;
    let gw = gateway_for(&server, OperationMode::ReadOnly);

    let err = gw
        .delete_page(args(json!({"page_id": "../etc"})))
        .await
        .unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::PermissionDenied);

    // Missing and mistyped arguments do not change the answer
    let err = gw.create_page(args(json!({}))).await.unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::PermissionDenied);
    let err = gw
        .create_check(args(json!({"name": 7, "port": "eighty"})))
        .await
        .unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::PermissionDenied);
    let err = gw.delete_heartbeat(args(json!({}))).await.unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::PermissionDenied);
}

#[tokio::test]
async fn test_features_follow_mode() {
    let server = MockServer::start().await;
    let ro = gateway_for(&server, OperationMode::ReadOnly).features();
    let rw = gateway_for(&server, OperationMode::ReadWrite).features();
    assert!(ro.read_operations && !ro.write_operations);
    assert!(rw.read_operations && rw.write_operations);
}

// ===== Parameter Validation Tests =====

#[tokio::test]
async fn test_zero_per_page_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let err = gw
        .list_pages(args(json!({"per_page": 0})))
        .await
        .unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::InvalidParams);
    assert!(err.message.contains("per_page"));

    let err = gw
        .list_heartbeats(args(json!({"page": 0})))
        .await
        .unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::InvalidParams);
}

#[tokio::test]
async fn test_mistyped_paging_is_invalid() {
    let server = MockServer::start().await;
    forbid_requests(&server).await;
    let gw = gateway_for(&server, OperationMode::ReadOnly);

    for bad in [
        json!({"page": -1}),
        json!({"page": 1.5}),
        json!({"per_page": "ten"}),
        json!({"per_page": true}),
        json!({"page": 5_000_000_000u64}),
    ] {
        let err = gw.list_pages(args(bad.clone())).await.unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::InvalidParams, "{}", bad);
    }
}

#[tokio::test]
async fn test_numeric_strings_are_accepted_for_paging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/checks"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"checks": [], "total": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let data = gw
        .list_checks(args(json!({"page": "2", "page_size": "5"})))
        .await
        .unwrap();
    assert_eq!(data["page"], 2);
}

#[tokio::test]
async fn test_missing_required_arguments_are_invalid() {
    let server = MockServer::start().await;
    forbid_requests(&server).await;
    let gw = gateway_for(&server, OperationMode::ReadWrite);

    let err = gw.create_page(args(json!({}))).await.unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::InvalidParams);
    assert_eq!(err.message, "name is required");

    let err = gw.get_check_details(args(json!({}))).await.unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::InvalidParams);
    assert_eq!(err.message, "check_id is required");

    let err = gw
        .get_page_details(args(json!({"page_id": 42})))
        .await
        .unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::InvalidParams);

    let err = gw
        .create_check(args(json!({"name": "db", "type": "tcp", "host": "db", "port": 70000})))
        .await
        .unwrap_err();
    assert!(err.message.contains("port"));

    let err = gw
        .create_heartbeat(args(json!({"name": "cron"})))
        .await
        .unwrap_err();
    assert_eq!(err.message, "period is required");
}

#[tokio::test]
async fn test_oversized_per_page_is_capped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/pages"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pages": [page_json("1")],
            "total": 1,
            "page": 1,
            "per_page": 100
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let data = gw
        .list_pages(args(json!({"per_page": 500})))
        .await
        .unwrap();
    assert_eq!(data["per_page"], 100);
    assert_eq!(data["pages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_identifier_never_reaches_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json("1")))
        .expect(0)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    for bad in ["", "   ", "a/b", "id with space"] {
        let err = gw
            .get_page_details(PageIdParams::new(bad))
            .await
            .unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::InvalidParams, "{:?}", bad);
    }
}

#[tokio::test]
async fn test_check_results_date_validation() {
    let server = MockServer::start().await;
    let gw = gateway_for(&server, OperationMode::ReadOnly);

    let err = gw
        .get_check_results(args(json!({"check_id": "c1", "from_date": "yesterday"})))
        .await
        .unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::InvalidParams);
    assert!(err.message.contains("from_date"));

    let err = gw
        .get_check_results(args(json!({
            "check_id": "c1",
            "from_date": "2024-02-01T00:00:00Z",
            "to_date": "2024-01-01T00:00:00Z"
        })))
        .await
        .unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::InvalidParams);
}

#[tokio::test]
async fn test_check_results_forwards_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/checks/c1/results"))
        .and(query_param("from_date", "2024-01-01T00:00:00+00:00"))
        .and(query_param("page_size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"status": "ok", "response_time": 120.5}],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let data = gw
        .get_check_results(args(json!({"check_id": "c1", "from_date": "2024-01-01T00:00:00Z"})))
        .await
        .unwrap();
    assert_eq!(data["check_id"], "c1");
    assert_eq!(data["results"][0]["status"], "ok");
}

#[tokio::test]
async fn test_update_requires_fields() {
    let server = MockServer::start().await;
    let gw = gateway_for(&server, OperationMode::ReadWrite);

    let err = gw
        .patch_page(args(json!({"page_id": "p1", "fields": {}})))
        .await
        .unwrap_err();
    assert_eq!(err.message, "No fields provided for update");

    let err = gw
        .update_component(args(json!({"page_id": "p1", "component_id": "c1"})))
        .await
        .unwrap_err();
    assert_eq!(err.message, "No fields provided for update");

    let err = gw
        .update_check(args(json!({"check_id": "c1"})))
        .await
        .unwrap_err();
    assert_eq!(err.message, "No fields provided for update");

    let err = gw
        .update_heartbeat(args(json!({"heartbeat_id": "hb1", "fields": "name=x"})))
        .await
        .unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::InvalidParams);
}

#[tokio::test]
async fn test_create_page_rejects_unknown_language() {
    let server = MockServer::start().await;
    let gw = gateway_for(&server, OperationMode::ReadWrite);

    let err = gw
        .create_page(args(json!({"name": "Status", "language": "de"})))
        .await
        .unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::InvalidParams);
    assert!(err.message.contains("'ru' or 'en'"));
}

#[tokio::test]
async fn test_component_status_is_validated() {
    let server = MockServer::start().await;
    let gw = gateway_for(&server, OperationMode::ReadWrite);

    let err = gw
        .create_component(args(json!({"page_id": "p1", "name": "API", "status": "on_fire"})))
        .await
        .unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::InvalidParams);
}

// ===== API Error Mapping Tests =====

#[tokio::test]
async fn test_unknown_page_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/pages/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Page not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let envelope: Envelope = gw
        .get_page_details(PageIdParams::new("missing"))
        .await
        .into();

    let value = envelope.to_value();
    assert_eq!(value["ok"], false);
    assert_eq!(value["error_kind"], "api_error");
    assert_eq!(value["status_code"], 404);
}

#[tokio::test]
async fn test_auth_failure_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/checks"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "bad key"})))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let err = gw.list_checks(args(json!({}))).await.unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::AuthError);
    assert!(err.message.contains("Check your API key"));
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/heartbeats"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/heartbeats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "hb1", "name": "cron", "period": 60}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let data = gw.list_heartbeats(args(json!({}))).await.unwrap();
    assert_eq!(data["heartbeats"][0]["id"], "hb1");
    assert_eq!(data["total"], 1);
}

#[tokio::test]
async fn test_slow_api_maps_to_timeout_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/pages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let settings = Arc::new(Settings {
        base_url: format!("{}/v1", server.uri()),
        timeout: Duration::from_millis(200),
        ..Settings::new("test-key")
    });
    let client = PingeraClient::builder()
        .api_key("test-key")
        .base_url(&settings.base_url)
        .timeout(settings.timeout)
        .retry_config(RetryConfig::disabled())
        .build()
        .unwrap();
    let gw = Gateway::with_client(settings, client);

    let err = gw.list_pages(args(json!({}))).await.unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::TimeoutError);
}

// ===== Success Path Tests =====

#[tokio::test]
async fn test_page_details_keep_unknown_fields() {
    let server = MockServer::start().await;
    let mut body = page_json("123");
    body["headline"] = json!("All systems go");
    Mock::given(method("GET"))
        .and(path("/v1/pages/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let envelope: Envelope = gw
        .get_page_details(PageIdParams::new(" 123 "))
        .await
        .into();

    let value = envelope.to_value();
    assert_eq!(value["ok"], true);
    assert_eq!(value["data"]["id"], "123");
    assert_eq!(value["data"]["css_body_bg_color"], "#ffffff");
    assert_eq!(value["data"]["headline"], "All systems go");
    assert!(value.get("error_kind").is_none());
}

#[tokio::test]
async fn test_delete_page_reports_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/pages/p1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadWrite);
    let data = gw.delete_page(PageIdParams::new("p1")).await.unwrap();
    assert_eq!(data["message"], "Page p1 deleted successfully");
}

#[tokio::test]
async fn test_list_components_counts_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/pages/p1/components"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "c1", "name": "API", "status": "operational"},
            {"id": "c2", "name": "Web", "status": "major_outage"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let data = gw
        .list_components(args(json!({"page_id": "p1"})))
        .await
        .unwrap();
    assert_eq!(data["total"], 2);
    assert_eq!(data["components"][1]["status"], "major_outage");
}

#[tokio::test]
async fn test_connection_report_never_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadWrite);
    let report = gw.test_connection().await.unwrap();
    assert!(!report.connected);
    assert_eq!(report.server_mode, OperationMode::ReadWrite);
    assert!(report.api_info.error.is_some());

    let status = gw.status().await.unwrap();
    assert_eq!(status["mode"], "read_write");
    assert_eq!(status["features"]["write_operations"], true);
}

#[tokio::test]
async fn test_component_groups_collect_members() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/pages/p1/components"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "g1", "name": "Backend", "group": true},
            {"id": "c1", "name": "API", "group_id": "g1"},
            {"id": "c2", "name": "DB", "group_id": "g1"},
            {"id": "c3", "name": "Web"},
            {"id": "g2", "name": "Empty", "group": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let data = gw
        .list_component_groups(args(json!({"page_id": "p1"})))
        .await
        .unwrap();
    assert_eq!(data["total"], 2);
    assert_eq!(data["groups"][0]["id"], "g1");
    assert_eq!(data["groups"][0]["components"].as_array().unwrap().len(), 2);
    assert_eq!(data["groups"][1]["components"], json!([]));
}

#[tokio::test]
async fn test_heartbeat_status_filter_applies_to_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/heartbeats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "heartbeats": [
                {"id": "hb1", "name": "backup", "status": "up"},
                {"id": "hb2", "name": "report", "status": "down"},
                {"id": "hb3", "name": "sync", "status": "DOWN"},
                {"id": "hb4", "name": "new"}
            ],
            "total": 40
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let data = gw
        .list_heartbeats(args(json!({"status": "down"})))
        .await
        .unwrap();
    let ids: Vec<&str> = data["heartbeats"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|hb| hb["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["hb2", "hb3"]);
    assert_eq!(data["total"], 2);
    assert_eq!(data["status"], "down");
}

#[tokio::test]
async fn test_unified_results_default_page_size() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/checks/unified/results"))
        .and(query_param("check_ids", "c1"))
        .and(query_param("check_ids", "c2"))
        .and(query_param("page_size", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"check_id": "c1", "status": "ok"}],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let data = gw
        .get_unified_results(args(json!({"check_ids": "c1, c2"})))
        .await
        .unwrap();
    assert_eq!(data["check_ids"], json!(["c1", "c2"]));
    assert_eq!(data["per_page"], 100);

    let err = gw
        .get_unified_statistics(args(json!({"check_ids": []})))
        .await
        .unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::InvalidParams);
}

#[tokio::test]
async fn test_execute_custom_check_fills_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checks/execute"))
        .and(body_json(json!({
            "url": "https://example.com",
            "type": "web",
            "timeout": 30,
            "name": "On-demand check for https://example.com",
            "parameters": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"job_id": "j1", "status": "queued"})))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadWrite);
    let job = gw
        .execute_custom_check(args(json!({"url": "https://example.com"})))
        .await
        .unwrap();
    assert_eq!(job.id, "j1");

    let err = gw
        .execute_custom_check(args(json!({"url": "example.com"})))
        .await
        .unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::InvalidParams);
}

#[tokio::test]
async fn test_heartbeat_ping_and_logs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/heartbeats/hb1/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "up"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/heartbeats/hb1/logs"))
        .and(query_param("to_date", "2024-01-02T00:00:00+00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "l1", "status": "received"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadWrite);
    let data = gw
        .send_heartbeat_ping(args(json!({"heartbeat_id": "hb1"})))
        .await
        .unwrap();
    assert_eq!(data["message"], "Ping sent to heartbeat hb1");
    assert_eq!(data["response"]["status"], "up");

    let logs = gw
        .get_heartbeat_logs(args(json!({
            "heartbeat_id": "hb1",
            "to_date": "2024-01-02T00:00:00Z"
        })))
        .await
        .unwrap();
    assert_eq!(logs["heartbeat_id"], "hb1");
    assert_eq!(logs["logs"][0]["id"], "l1");
}

#[tokio::test]
async fn test_check_statistics_are_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/checks/c1/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uptime": 99.9})))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway_for(&server, OperationMode::ReadOnly);
    let data = gw
        .get_check_statistics(args(json!({"check_id": "c1"})))
        .await
        .unwrap();
    assert_eq!(data["statistics"]["uptime"], 99.9);
}
