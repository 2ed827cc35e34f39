use std::sync::Arc;

use resource_store::{http, InMemoryResourceStore, ResourceService};
use serde_json::json;

use crate::support::{content_type, start_server, XML};

#[tokio::test]
async fn unknown_id_is_404_plain_text() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    for path in ["/resource/42", "/resource/abc"] {
        let resp = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), 404);
        assert!(content_type(&resp).starts_with("text/plain"));
        assert_eq!(resp.text().await.unwrap(), "Resource not found");
    }

    let resp = client
        .put(server.url("/resource/42"))
        .json(&json!({ "name": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .delete(server.url("/resource/42"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn malformed_xml_post_is_400_and_stores_nothing() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    client
        .post(server.url("/resource"))
        .json(&json!({ "name": "existing" }))
        .send()
        .await
        .unwrap();
    assert_eq!(server.count(), 1);

    for body in ["<resource><name>x</resource>", "not xml", "<item><name>x</name></item>"] {
        let resp = client
            .post(server.url("/resource"))
            .header("content-type", XML)
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "body: {body}");
        assert_eq!(resp.text().await.unwrap(), "Invalid XML");
    }
    assert_eq!(server.count(), 1);
}

#[tokio::test]
async fn malformed_xml_put_is_400_and_changes_nothing() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    client
        .post(server.url("/resource"))
        .json(&json!({ "name": "keep", "quantity": 1 }))
        .send()
        .await
        .unwrap();

    let resp = client
        .put(server.url("/resource/1"))
        .header("content-type", XML)
        .body("<resource><name>changed</name>")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(server.count(), 1);
    assert_eq!(server.store_name(1).as_deref(), Some("keep"));
}

#[tokio::test]
async fn malformed_json_is_400() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/resource"))
        .header("content-type", "application/json")
        .body("{\"name\":")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.text().await.unwrap(), "Invalid JSON");
    assert_eq!(server.count(), 0);
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .request(reqwest::Method::OPTIONS, server.url("/resource"))
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    assert!(resp
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn serve_fails_when_address_is_taken() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = taken.local_addr().unwrap();

    let service = Arc::new(ResourceService::new(InMemoryResourceStore::new()));
    let err = http::serve(service, addr).await.unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::AddrInUse);
}
