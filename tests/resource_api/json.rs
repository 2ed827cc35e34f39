use resource_store::ResourceStore;
use serde_json::{json, Value};

use crate::support::{content_type, start_server};

#[tokio::test]
async fn list_starts_empty() {
    let server = start_server().await;
    let resp = reqwest::get(server.url("/resource")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(content_type(&resp).starts_with("application/json"));

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_coerces_numbers() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/resource"))
        .json(&json!({ "name": "A", "quantity": "5", "price": "1.5" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(
        created,
        json!({ "id": 1, "name": "A", "quantity": 5, "price": 1.5 })
    );

    let fetched: Value = client
        .get(server.url("/resource/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn non_numeric_quantity_is_not_an_error() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/resource"))
        .json(&json!({ "quantity": "notanumber" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["quantity"], Value::Null);
    assert!(server.store.get(1).unwrap().quantity.is_nan());
}

#[tokio::test]
async fn update_skips_falsy_text_but_sets_zero() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    client
        .post(server.url("/resource"))
        .json(&json!({ "name": "A", "description": "first", "quantity": 3, "price": 2 }))
        .send()
        .await
        .unwrap();

    let resp = client
        .put(server.url("/resource/1"))
        .json(&json!({ "name": "", "description": null, "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(
        updated,
        json!({ "id": 1, "name": "A", "description": "first", "quantity": 0, "price": 2 })
    );
}

#[tokio::test]
async fn ids_keep_increasing_after_delete() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let mut ids = Vec::new();
    for name in ["a", "b", "c"] {
        let created: Value = client
            .post(server.url("/resource"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        ids.push(created["id"].as_u64().unwrap());
        let last = *ids.last().unwrap();
        let resp = client
            .delete(server.url(&format!("/resource/{last}")))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(server.count(), 0);
}

#[tokio::test]
async fn delete_returns_confirmation() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    for name in ["a", "b"] {
        client
            .post(server.url("/resource"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap();
    }

    let resp = client
        .delete(server.url("/resource/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Resource 1 deleted successfully." }));

    let remaining: Value = client
        .get(server.url("/resource"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(remaining, json!([{ "id": 2, "name": "b", "quantity": null, "price": null }]));

    let resp = client
        .get(server.url("/resource/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn non_xml_accept_gets_json() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    for accept in ["text/xml", "application/xml, application/json", "*/*"] {
        let resp = client
            .get(server.url("/resource"))
            .header("accept", accept)
            .send()
            .await
            .unwrap();
        assert!(content_type(&resp).starts_with("application/json"), "accept: {accept}");
    }
}
