//! End-to-end tests for surge-server.
//!
//! These tests run the real server on an ephemeral port over an in-memory
//! SQLite store and talk to it over HTTP.
#![allow(clippy::tests_outside_test_module)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode, redirect::Policy};
use surge_server::{CancellationToken, serve};
use surge_store::sql::{SqlRuleStore, SqlStoreConfig};
use tokio::net::TcpListener;

struct TestServer {
    addr: SocketAddr,
    client: Client,
    shutdown: CancellationToken,
}

impl TestServer {
    async fn start() -> Self {
        let store = SqlRuleStore::connect(
            SqlStoreConfig::new("sqlite::memory:")
                .max_connections(1)
                .min_connections(1),
        )
        .await
        .expect("Failed to connect");

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = CancellationToken::new();

        let token = shutdown.clone();
        tokio::spawn(async move {
            serve(listener, Arc::new(store), token, Duration::from_secs(1))
                .await
                .unwrap();
        });

        let client = Client::builder().redirect(Policy::none()).build().unwrap();
        Self {
            addr,
            client,
            shutdown,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, String) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status();
        (status, resp.text().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[tokio::test]
async fn test_redirect_to_default_rule() {
    let server = TestServer::start().await;
    let resp = server.client.get(server.url("/")).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()["location"], "/?rule=direct");
}

#[tokio::test]
async fn test_full_rule_lifecycle() {
    let server = TestServer::start().await;

    let (status, _) = server.get("/rule-list").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = server
        .get("/insert?rules=foo.com%0ABAR%2Cxyz%0A%0A&ruleType=adblock")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("adblock rules inserted:\n"));
    assert!(body.contains("DOMAIN,foo.com\n"));
    assert!(body.contains("BAR,xyz\n"));

    // Same batch again: reported, not duplicated
    let (status, _) = server
        .get("/insert?rules=foo.com%0ABAR%2Cxyz&ruleType=adblock")
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = server.get("/rule?rule=adblock").await;
    assert_eq!(status, StatusCode::OK);
    let mut lines: Vec<&str> = body.lines().collect();
    lines.sort();
    assert_eq!(lines, vec!["BAR,xyz", "DOMAIN,foo.com"]);
    assert!(body.ends_with('\n'));

    let (status, body) = server.get("/get-rule-types").await;
    assert_eq!(status, StatusCode::OK);
    let types: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(types, vec!["adblock"]);

    let (status, body) = server.get("/rule-list").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/rule?rule=adblock"));

    let (status, _) = server.get("/delete-rule?rule=adblock").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = server.get("/rule?rule=adblock").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_errors() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/insert").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "rules must not be empty");

    let (status, _) = server.get("/delete-rule").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let resp = server
        .client
        .post(server.url("/insert?rules=a.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = server.get("/get-rule-types").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = server.get("/rule?rule=a").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_path() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/admin").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not Found");
}
