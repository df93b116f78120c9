use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::CatalogError;

use super::{IdStrategy, Record, Store};

enum IdAllocator {
    Length,
    Sequential { next: u64 },
}

impl IdAllocator {
    fn new<R: Record>(strategy: IdStrategy, records: &[R]) -> Self {
        match strategy {
            IdStrategy::Length => IdAllocator::Length,
            IdStrategy::Sequential => {
                let highest = records
                    .iter()
                    .filter_map(|r| r.id().parse::<u64>().ok())
                    .max()
                    .unwrap_or(0);
                IdAllocator::Sequential { next: highest + 1 }
            }
        }
    }

    fn next_id(&mut self, len: usize) -> String {
        match self {
            IdAllocator::Length => (len + 1).to_string(),
            IdAllocator::Sequential { next } => {
                let id = *next;
                *next += 1;
                id.to_string()
            }
        }
    }
}

struct Rows<R> {
    records: Vec<R>,
    ids: IdAllocator,
}

impl<R: Record> Rows<R> {
    fn position(&self, id: &str) -> Result<usize, CatalogError> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| CatalogError::NotFound {
                entity: R::ENTITY,
                id: id.to_owned(),
            })
    }
}

/// A [`Store`] backed by a `Vec` behind a lock. Lookups are linear scans.
pub struct MemoryStore<R> {
    rows: RwLock<Rows<R>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn with_records(strategy: IdStrategy, records: Vec<R>) -> Self {
        let ids = IdAllocator::new(strategy, &records);
        Self {
            rows: RwLock::new(Rows { records, ids }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Rows<R>> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Rows<R>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Record> Store<R> for MemoryStore<R> {
    fn get(&self, id: &str) -> Option<R> {
        self.read().records.iter().find(|r| r.id() == id).cloned()
    }

    fn list(&self) -> Vec<R> {
        self.read().records.clone()
    }

    fn insert(&self, draft: R::Draft) -> R {
        let mut rows = self.write();
        let len = rows.records.len();
        let id = rows.ids.next_id(len);
        let record = R::create(id, draft);
        rows.records.push(record.clone());

        tracing::info!(entity = R::ENTITY, id = %record.id(), "created record");
        record
    }

    fn update(&self, id: &str, patch: R::Patch) -> Result<R, CatalogError> {
        let mut rows = self.write();
        let idx = rows.position(id)?;
        let record = &mut rows.records[idx];
        record.apply(patch);

        tracing::info!(entity = R::ENTITY, id, "updated record");
        Ok(record.clone())
    }

    /// Removes every record carrying `id` and returns the first of them.
    fn delete(&self, id: &str) -> Result<R, CatalogError> {
        let mut rows = self.write();
        let idx = rows.position(id)?;
        let removed = rows.records[idx].clone();

        let before = rows.records.len();
        rows.records.retain(|r| r.id() != id);

        let count = before - rows.records.len();
        tracing::info!(entity = R::ENTITY, id, count, "deleted records");
        Ok(removed)
    }
}
