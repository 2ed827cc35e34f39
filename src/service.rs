//! Resource Service — the five resource endpoints as plain functions.
//!
//! `ResourceService<S>` owns a store and turns each request into a
//! [`NegotiatedResponse`]. It knows nothing about HTTP frameworks; the
//! `http` module is a thin axum adapter over it.
//!
//! ## Example
//!
//! ```
//! use resource_store::{InMemoryResourceStore, ResourceService};
//!
//! let service = ResourceService::new(InMemoryResourceStore::new());
//! let created = service.create(None, Some("application/json"), br#"{"name":"A"}"#);
//! assert_eq!(created.status, 200);
//!
//! let fetched = service.get(Some("application/xml"), "1");
//! assert_eq!(fetched.content_type, "application/xml; charset=utf-8");
//! ```

use tracing::{debug, info, warn};

use crate::codec::Payload;
use crate::error::ApiError;
use crate::fields::{FieldValue, PartialUpdate};
use crate::negotiate::{respond, NegotiatedResponse};
use crate::normalize::normalize;
use crate::record::ResourceId;
use crate::store::ResourceStore;

pub struct ResourceService<S> {
    store: S,
}

impl<S: ResourceStore> ResourceService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// `GET /resource`
    pub fn list(&self, accept: Option<&str>) -> NegotiatedResponse {
        let result = self.store.list().map(Payload::Collection);
        if let Ok(Payload::Collection(records)) = &result {
            debug!(count = records.len(), "listing resources");
        }
        respond(accept, result.map_err(ApiError::from))
    }

    /// `POST /resource`
    pub fn create(
        &self,
        accept: Option<&str>,
        content_type: Option<&str>,
        body: &[u8],
    ) -> NegotiatedResponse {
        respond(accept, self.create_record(content_type, body))
    }

    /// `GET /resource/:id`
    pub fn get(&self, accept: Option<&str>, raw_id: &str) -> NegotiatedResponse {
        let result = resolve_id(raw_id)
            .and_then(|id| self.store.get(id).map_err(ApiError::from))
            .map(Payload::Record);
        respond(accept, result)
    }

    /// `PUT /resource/:id`
    pub fn update(
        &self,
        accept: Option<&str>,
        raw_id: &str,
        content_type: Option<&str>,
        body: &[u8],
    ) -> NegotiatedResponse {
        respond(accept, self.update_record(raw_id, content_type, body))
    }

    /// `DELETE /resource/:id`
    pub fn delete(&self, accept: Option<&str>, raw_id: &str) -> NegotiatedResponse {
        let result = resolve_id(raw_id).and_then(|id| {
            let confirmation = self.store.delete(id)?;
            info!(id, "resource deleted");
            Ok(Payload::Message(confirmation))
        });
        respond(accept, result)
    }

    fn create_record(&self, content_type: Option<&str>, body: &[u8]) -> Result<Payload, ApiError> {
        let fields = decode_body(content_type, body)?;
        let record = self.store.create(&fields)?;
        info!(id = record.id, "resource created");
        Ok(Payload::Record(record))
    }

    fn update_record(
        &self,
        raw_id: &str,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<Payload, ApiError> {
        let id = resolve_id(raw_id)?;
        // a missing id is reported before the body is looked at
        self.store.get(id)?;
        let fields = decode_body(content_type, body)?;
        let record = self.store.update(id, &fields)?;
        info!(id, "resource updated");
        Ok(Payload::Record(record))
    }
}

fn decode_body(content_type: Option<&str>, body: &[u8]) -> Result<PartialUpdate, ApiError> {
    normalize(content_type, body).map_err(|e| {
        warn!(error = %e, "rejected request body");
        ApiError::from(e)
    })
}

/// Match a path segment against numeric ids the loose way: `"01"` and
/// `"1.0"` both name id 1. Anything else cannot name a resource.
fn resolve_id(raw: &str) -> Result<ResourceId, ApiError> {
    let n = FieldValue::from(raw).to_number().value();
    if n.fract() == 0.0 && n >= 1.0 && n < u64::MAX as f64 {
        Ok(n as ResourceId)
    } else {
        Err(ApiError::NotFound(raw.to_string()))
    }
}
