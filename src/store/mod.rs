//! Storage seam between the resolvers and the catalog data.
//!
//! Resolvers only ever see a [`Catalog`], which holds one [`Store`] per
//! entity. The in-memory [`MemoryStore`] is what the server runs with; any
//! other backend only has to implement the five [`Store`] operations.

use std::sync::Arc;

use crate::datamodel::{self, Author, Book};
use crate::error::CatalogError;

mod memory;

pub use memory::MemoryStore;

/// A row type a [`Store`] can hold.
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity name used in error messages and logs.
    const ENTITY: &'static str;

    type Draft: Send;
    type Patch: Send;

    fn id(&self) -> &str;
    fn create(id: String, draft: Self::Draft) -> Self;
    fn apply(&mut self, patch: Self::Patch);
}

pub trait Store<R: Record>: Send + Sync {
    /// First record with a matching id, if any.
    fn get(&self, id: &str) -> Option<R>;

    /// All records in insertion order.
    fn list(&self) -> Vec<R>;

    fn insert(&self, draft: R::Draft) -> R;

    fn update(&self, id: &str, patch: R::Patch) -> Result<R, CatalogError>;

    /// Removes every record with `id` and hands back the first one. Nothing
    /// referencing it is touched.
    fn delete(&self, id: &str) -> Result<R, CatalogError>;
}

/// How new record ids are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum IdStrategy {
    /// `collection length + 1`. Produces duplicate ids once anything has been
    /// deleted; kept for compatibility with existing clients.
    #[default]
    Length,
    /// Monotonic counter that starts past the largest numeric id present.
    Sequential,
}

#[derive(Clone)]
pub struct Catalog {
    pub books: Arc<dyn Store<Book>>,
    pub authors: Arc<dyn Store<Author>>,
}

impl Catalog {
    pub fn new(books: Arc<dyn Store<Book>>, authors: Arc<dyn Store<Author>>) -> Self {
        Self { books, authors }
    }

    /// An in-memory catalog, optionally filled with the demo data set.
    pub fn in_memory(strategy: IdStrategy, seeded: bool) -> Self {
        let (books, authors) = if seeded {
            (datamodel::seed_books(), datamodel::seed_authors())
        } else {
            Default::default()
        };

        Self::new(
            Arc::new(MemoryStore::with_records(strategy, books)),
            Arc::new(MemoryStore::with_records(strategy, authors)),
        )
    }
}
