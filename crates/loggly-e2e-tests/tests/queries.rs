//! E2E tests for account info, stats and volume metrics.

mod helpers;

use loggly_api::{StatsQuery, VolumeMetricsQuery};
use serde_json::json;
use wiremock::matchers::{basic_auth, bearer_token, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use helpers::{API_TOKEN, INGEST_TOKEN, TestHarness, customer_body};

/// Account info is fetched, cached, and returned raw.
#[tokio::test]
async fn e2e_account_info_cached() {
    let h = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/apiv2/customer"))
        .and(bearer_token(API_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_body()))
        .expect(1)
        .mount(&h.server)
        .await;

    let mut client = h.client();
    let raw = client.account_info().await.unwrap();
    assert_eq!(raw["subscription"]["subscription_name"], "Standard");

    let info = client.cached_account().unwrap();
    assert_eq!(info.subdomain, "acme");
    assert_eq!(info.tokens, vec![INGEST_TOKEN.to_string()]);
    assert_eq!(info.retention_days, 15);
    assert_eq!(info.volume_limit_mb, 1024);
}

/// Basic auth is used when no API token is configured.
#[tokio::test]
async fn e2e_account_info_basic_auth() {
    let h = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/apiv2/customer"))
        .and(basic_auth("ops", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_body()))
        .expect(1)
        .mount(&h.server)
        .await;

    let mut client = h.basic_auth_client("ops", "s3cret");
    client.account_info().await.unwrap();
}

/// A rejected token surfaces as a 401 response error and leaves no cache.
#[tokio::test]
async fn e2e_account_info_unauthorized() {
    let h = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/apiv2/customer"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&h.server)
        .await;

    let mut client = h.client();
    let err = client.account_info().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(client.cached_account().is_none());
}

/// Stats lower-cases the stat name and defaults the query to `*`.
#[tokio::test]
async fn e2e_stats_request() {
    let h = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/apiv2/stats/percentiles/json.latency"))
        .and(query_param("q", "*"))
        .and(query_param("from", "-1h"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"percentiles": {"99.0": 812.0}})),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let body = h
        .client()
        .stats(&StatsQuery::new("Percentiles", "json.latency").from("-1h"))
        .await
        .unwrap();
    assert_eq!(body["percentiles"]["99.0"], 812.0);
}

/// Volume metrics forwards comma-joined lists.
#[tokio::test]
async fn e2e_volume_metrics_request() {
    let h = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/apiv2/volume-metrics"))
        .and(query_param("group_by", "host,app"))
        .and(query_param("measurement_types", "count"))
        .and(query_param("host", "web-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&h.server)
        .await;

    let query = VolumeMetricsQuery::new()
        .group_by("host")
        .group_by("app")
        .host("web-01")
        .measurement_type("count");
    let body = h.client().volume_metrics(&query).await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

/// Invalid enumerations are rejected without touching the network.
#[tokio::test]
async fn e2e_invalid_parameters_make_no_request() {
    let h = TestHarness::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let client = h.client();
    assert!(
        client
            .stats(&StatsQuery::new("bogus", "bytes"))
            .await
            .unwrap_err()
            .is_request()
    );
    assert!(
        client
            .volume_metrics(&VolumeMetricsQuery::new().measurement_type("bytes"))
            .await
            .unwrap_err()
            .is_request()
    );
}

/// Transport failures (nothing listening) are reported as transport errors.
#[tokio::test]
async fn e2e_unreachable_service() {
    let h = TestHarness::start().await;
    let mut config = h.bare_config();
    config.api_base_url = Some("http://127.0.0.1:9".into());
    config.api_token = Some(API_TOKEN.into());
    let mut client = loggly_api::LogglyClient::new(config).unwrap();

    let err = client.account_info().await.unwrap_err();
    assert!(matches!(err, loggly_api::LogglyError::Transport(_)));
}

/// A stats field with a slash is sent as one escaped path segment.
#[tokio::test]
async fn e2e_stats_field_is_escaped() {
    let h = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/apiv2/stats/avg/json.req%2Fsec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"avg": {"value": 3.0}})))
        .expect(1)
        .mount(&h.server)
        .await;

    let body = h
        .client()
        .stats(&StatsQuery::new("avg", "json.req/sec"))
        .await
        .unwrap();
    assert_eq!(body["avg"]["value"], 3.0);
}
