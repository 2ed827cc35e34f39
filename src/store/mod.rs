//! Resource Store — ordered, id-keyed collection of records.
//!
//! ## Example
//!
//! ```
//! use resource_store::{InMemoryResourceStore, PartialUpdate, ResourceStore};
//!
//! let store = InMemoryResourceStore::new();
//! let created = store
//!     .create(&PartialUpdate::new().with_name("Widget").with_quantity("5"))
//!     .unwrap();
//! assert_eq!(created.id, 1);
//! assert_eq!(store.get(1).unwrap().quantity.value(), 5.0);
//! ```

mod in_memory;

use std::fmt;

use crate::fields::PartialUpdate;
use crate::record::{Confirmation, ResourceId, ResourceRecord};

pub use in_memory::InMemoryResourceStore;

/// CRUD storage for resource records.
///
/// Identities are assigned by the store, strictly increasing and never
/// reused. Listing returns records in insertion order.
pub trait ResourceStore: Send + Sync {
    /// All records, in insertion order.
    fn list(&self) -> Result<Vec<ResourceRecord>, StoreError>;

    /// A single record by id.
    fn get(&self, id: ResourceId) -> Result<ResourceRecord, StoreError>;

    /// Allocate the next id and append a record built from `fields`.
    fn create(&self, fields: &PartialUpdate) -> Result<ResourceRecord, StoreError>;

    /// Apply `fields` to an existing record and return its new state.
    fn update(&self, id: ResourceId, fields: &PartialUpdate) -> Result<ResourceRecord, StoreError>;

    /// Remove the record with this id.
    fn delete(&self, id: ResourceId) -> Result<Confirmation, StoreError>;

    /// Number of stored records.
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(ResourceId),
    LockPoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "resource {} not found", id),
            StoreError::LockPoisoned(operation) => {
                write!(f, "resource store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {}
