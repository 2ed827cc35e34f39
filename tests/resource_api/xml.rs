use serde_json::Value;

use crate::support::{content_type, start_server, XML};

#[tokio::test]
async fn create_from_xml_body() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/resource"))
        .header("content-type", XML)
        .body("<resource><name>Widget</name><quantity>5</quantity><price>1.5</price></resource>")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(content_type(&resp).starts_with("application/json"));

    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["quantity"], 5);
    assert_eq!(created["price"], 1.5);
}

#[tokio::test]
async fn xml_accept_uses_distinct_roots() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    client
        .post(server.url("/resource"))
        .header("content-type", XML)
        .body("<resource><name>Widget</name></resource>")
        .send()
        .await
        .unwrap();

    let list = client
        .get(server.url("/resource"))
        .header("accept", XML)
        .send()
        .await
        .unwrap();
    assert_eq!(list.status(), 200);
    assert!(content_type(&list).starts_with(XML));
    let list = list.text().await.unwrap();
    assert!(list.contains("<resources>"));
    assert!(list.contains("<resource>"));

    let item = client
        .get(server.url("/resource/1"))
        .header("accept", XML)
        .send()
        .await
        .unwrap();
    assert!(content_type(&item).starts_with(XML));
    let item = item.text().await.unwrap();
    assert!(item.contains("<resource>"));
    assert!(!item.contains("<resources>"));
    assert!(item.contains("<name>Widget</name>"));
}

#[tokio::test]
async fn xml_response_round_trips_through_put() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    client
        .post(server.url("/resource"))
        .header("accept", XML)
        .header("content-type", XML)
        .body("<resource><name>A</name><description>d</description><quantity>2</quantity><price>0.5</price></resource>")
        .send()
        .await
        .unwrap();

    let item = client
        .get(server.url("/resource/1"))
        .header("accept", XML)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    // Sending the record back unchanged must not change it.
    let resp = client
        .put(server.url("/resource/1"))
        .header("content-type", XML)
        .body(item)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(
        updated,
        serde_json::json!({ "id": 1, "name": "A", "description": "d", "quantity": 2, "price": 0.5 })
    );
}

#[tokio::test]
async fn delete_confirmation_as_xml() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    client
        .post(server.url("/resource"))
        .json(&serde_json::json!({ "name": "A" }))
        .send()
        .await
        .unwrap();

    let resp = client
        .delete(server.url("/resource/1"))
        .header("accept", XML)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("<response>"));
    assert!(body.contains("<message>Resource 1 deleted successfully.</message>"));
}
