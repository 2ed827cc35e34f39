//! HTTP transport — maps the resource routes onto a [`ResourceService`].
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /resource` — list all resources.
//! - `POST /resource` — create a resource from a JSON or XML body.
//! - `GET /resource/:id` — fetch one resource.
//! - `PUT /resource/:id` — partially update a resource.
//! - `DELETE /resource/:id` — delete a resource.
//!
//! Request bodies are XML when `Content-Type` is `application/xml`, JSON
//! otherwise. Responses are XML only for `Accept: application/xml`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use resource_store::{http, InMemoryResourceStore, ResourceService};
//!
//! let service = Arc::new(ResourceService::new(InMemoryResourceStore::new()));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "0.0.0.0:3000".parse()?).await?;
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::negotiate::NegotiatedResponse;
use crate::service::ResourceService;
use crate::store::ResourceStore;

type SharedService<S> = State<Arc<ResourceService<S>>>;

/// Build an axum `Router` serving the resource routes from the given service.
pub fn router<S: ResourceStore + 'static>(service: Arc<ResourceService<S>>) -> Router {
    Router::new()
        .route(
            "/resource",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route(
            "/resource/:id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Serve the service over HTTP at the given address.
pub async fn serve<S: ResourceStore + 'static>(
    service: Arc<ResourceService<S>>,
    addr: SocketAddr,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "Server running on port {}", local.port());
    axum::serve(listener, app).await
}

impl IntoResponse for NegotiatedResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = HeaderValue::from_static(self.content_type);
        (status, [(header::CONTENT_TYPE, content_type)], self.body).into_response()
    }
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

async fn list_handler<S: ResourceStore + 'static>(
    State(service): SharedService<S>,
    headers: HeaderMap,
) -> NegotiatedResponse {
    service.list(header_str(&headers, header::ACCEPT))
}

async fn create_handler<S: ResourceStore + 'static>(
    State(service): SharedService<S>,
    headers: HeaderMap,
    body: Bytes,
) -> NegotiatedResponse {
    service.create(
        header_str(&headers, header::ACCEPT),
        header_str(&headers, header::CONTENT_TYPE),
        &body,
    )
}

async fn get_handler<S: ResourceStore + 'static>(
    State(service): SharedService<S>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> NegotiatedResponse {
    service.get(header_str(&headers, header::ACCEPT), &id)
}

async fn update_handler<S: ResourceStore + 'static>(
    State(service): SharedService<S>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> NegotiatedResponse {
    service.update(
        header_str(&headers, header::ACCEPT),
        &id,
        header_str(&headers, header::CONTENT_TYPE),
        &body,
    )
}

async fn delete_handler<S: ResourceStore + 'static>(
    State(service): SharedService<S>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> NegotiatedResponse {
    service.delete(header_str(&headers, header::ACCEPT), &id)
}
