//! InMemoryResourceStore - Vec-backed store, volatile for the process lifetime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{ResourceStore, StoreError};
use crate::fields::PartialUpdate;
use crate::record::{Confirmation, ResourceId, ResourceRecord};

/// In-memory resource store.
///
/// Clone-friendly via Arc; clones share records and the id counter.
#[derive(Clone)]
pub struct InMemoryResourceStore {
    records: Arc<RwLock<Vec<ResourceRecord>>>,
    next_id: Arc<AtomicU64>,
}

impl Default for InMemoryResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryResourceStore {
    /// Create an empty store whose first record gets id 1.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl ResourceStore for InMemoryResourceStore {
    fn list(&self) -> Result<Vec<ResourceRecord>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned("list"))?;
        Ok(records.clone())
    }

    fn get(&self, id: ResourceId) -> Result<ResourceRecord, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned("get"))?;
        records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn create(&self, fields: &PartialUpdate) -> Result<ResourceRecord, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned("create"))?;

        // allocated under the write lock so insertion order matches id order
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = ResourceRecord::from_fields(id, fields);
        records.push(record.clone());
        debug!(id, count = records.len(), "resource appended");
        Ok(record)
    }

    fn update(&self, id: ResourceId, fields: &PartialUpdate) -> Result<ResourceRecord, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned("update"))?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.apply(fields);
        Ok(record.clone())
    }

    fn delete(&self, id: ResourceId) -> Result<Confirmation, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::LockPoisoned("delete"))?;
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        records.remove(index);
        Ok(Confirmation::deleted(id))
    }

    fn len(&self) -> Result<usize, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned("len"))?;
        Ok(records.len())
    }
}
