use std::collections::{HashMap, HashSet};

use async_graphql::Context;

use crate::datamodel::{Author, Book};
use crate::store::Catalog;

use super::dataloader::{BatchFuture, BatchLoader, DataLoader};

/// Relationship lookups for resolvers, batched per request.
pub trait Loaders {
    async fn load_author(&self, id: &str) -> async_graphql::Result<Option<Author>>;
    async fn load_books_by_author(&self, author_id: &str) -> async_graphql::Result<Vec<Book>>;

    /// Forget everything loaded so far in this request. Called after writes.
    fn invalidate_loaders(&self);
}

impl Loaders for Context<'_> {
    async fn load_author(&self, id: &str) -> async_graphql::Result<Option<Author>> {
        let loader = self.data::<DataLoader<LoadAuthors>>()?;
        Ok(loader.load(id.to_owned()).await)
    }

    async fn load_books_by_author(&self, author_id: &str) -> async_graphql::Result<Vec<Book>> {
        let loader = self.data::<DataLoader<LoadBooksByAuthor>>()?;
        Ok(loader.load(author_id.to_owned()).await)
    }

    fn invalidate_loaders(&self) {
        if let Some(loader) = self.data_opt::<DataLoader<LoadAuthors>>() {
            loader.clear();
        }
        if let Some(loader) = self.data_opt::<DataLoader<LoadBooksByAuthor>>() {
            loader.clear();
        }
    }
}

pub struct LoadAuthors {
    pub catalog: Catalog,
}

impl BatchLoader for LoadAuthors {
    type K = String;
    type V = Option<Author>;

    fn load_batch(&self, keys: Vec<String>) -> BatchFuture<String, Option<Author>> {
        let authors = self.catalog.authors.clone();
        Box::pin(async move {
            let found: HashMap<_, _> = keys
                .into_iter()
                .filter_map(|id| {
                    let author = authors.get(&id)?;
                    Some((id, Some(author)))
                })
                .collect();

            tracing::debug!(found = found.len(), "resolved authors");
            found
        })
    }
}

pub struct LoadBooksByAuthor {
    pub catalog: Catalog,
}

impl BatchLoader for LoadBooksByAuthor {
    type K = String;
    type V = Vec<Book>;

    fn load_batch(&self, keys: Vec<String>) -> BatchFuture<String, Vec<Book>> {
        let books = self.catalog.books.clone();
        Box::pin(async move {
            let wanted: HashSet<_> = keys.iter().map(String::as_str).collect();

            let mut by_author: HashMap<String, Vec<Book>> = HashMap::with_capacity(keys.len());
            for book in books.list() {
                if wanted.contains(book.author_id.as_str()) {
                    by_author
                        .entry(book.author_id.clone())
                        .or_default()
                        .push(book);
                }
            }

            tracing::debug!(authors = by_author.len(), "resolved books by author");
            by_author
        })
    }
}
