//! In-memory resource store with JSON/XML content negotiation.
//!
//! Requests decode through the [`normalize`] layer into a [`PartialUpdate`],
//! mutate a [`ResourceStore`], and encode back in the format the client asked
//! for. [`ResourceService`] ties the pieces together; the `http` feature
//! exposes it over axum.

pub mod codec;
mod config;
mod error;
mod fields;
pub mod negotiate;
pub mod normalize;
mod record;
mod service;
mod store;

pub use codec::{CodecError, Format, Payload};
pub use config::{ConfigError, ServerConfig, DEFAULT_PORT, PORT_VAR};
pub use error::ApiError;
pub use fields::{FieldValue, JsonFields, PartialUpdate, XmlFields};
pub use negotiate::NegotiatedResponse;
pub use record::{Confirmation, Numeric, ResourceId, ResourceRecord};
pub use service::ResourceService;
pub use store::{InMemoryResourceStore, ResourceStore, StoreError};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
pub mod http;
