use async_graphql::{ComplexObject, Context, ErrorExtensions, ID, Object, SimpleObject};

use crate::datamodel::{self, AuthorPatch, BookPatch, NewAuthor, NewBook};
use crate::store::Catalog;

use super::loaders::Loaders;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Book {
    id: ID,
    name: String,
    genre: String,
    author_id: ID,
}

#[ComplexObject]
impl Book {
    /// `null` when no author has this book's `authorId`.
    async fn author(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Author>> {
        let author = ctx.load_author(&self.author_id).await?;
        Ok(author.map(Author::from))
    }
}

impl From<datamodel::Book> for Book {
    fn from(book: datamodel::Book) -> Self {
        Self {
            id: book.id.into(),
            name: book.name,
            genre: book.genre,
            author_id: book.author_id.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Author {
    id: ID,
    name: String,
    age: i32,
}

#[ComplexObject]
impl Author {
    async fn books(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<Option<Book>>>> {
        let books = ctx.load_books_by_author(&self.id).await?;
        Ok(nullable_list(books))
    }
}

impl From<datamodel::Author> for Author {
    fn from(author: datamodel::Author) -> Self {
        Self {
            id: author.id.into(),
            name: author.name,
            age: author.age,
        }
    }
}

fn catalog<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Catalog> {
    ctx.data::<Catalog>()
}

/// Lists are exposed as `[T]`: both the list and its entries are nullable.
fn nullable_list<T, U: From<T>>(items: Vec<T>) -> Option<Vec<Option<U>>> {
    Some(items.into_iter().map(|item| Some(U::from(item))).collect())
}

pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// A single book
    async fn book(&self, ctx: &Context<'_>, id: Option<ID>) -> async_graphql::Result<Option<Book>> {
        let Some(id) = id else {
            return Ok(None);
        };
        Ok(catalog(ctx)?.books.get(&id).map(Book::from))
    }

    /// List of all books
    async fn books(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<Option<Book>>>> {
        Ok(nullable_list(catalog(ctx)?.books.list()))
    }

    /// A single author
    async fn author(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
    ) -> async_graphql::Result<Option<Author>> {
        let Some(id) = id else {
            return Ok(None);
        };
        Ok(catalog(ctx)?.authors.get(&id).map(Author::from))
    }

    /// List of all authors
    async fn authors(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<Option<Author>>>> {
        Ok(nullable_list(catalog(ctx)?.authors.list()))
    }
}

/// Every mutation result is nullable; a failed mutation leaves `null` in its
/// slot next to the error.
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Add a book
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        name: String,
        genre: String,
        author_id: ID,
    ) -> async_graphql::Result<Option<Book>> {
        let book = catalog(ctx)?.books.insert(NewBook {
            name,
            genre,
            author_id: author_id.0,
        });
        ctx.invalidate_loaders();
        Ok(Some(book.into()))
    }

    /// Update a book
    async fn update_book(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        genre: Option<String>,
        author_id: Option<ID>,
    ) -> async_graphql::Result<Option<Book>> {
        let patch = BookPatch {
            name,
            genre,
            author_id: author_id.map(|id| id.0),
        };
        let book = catalog(ctx)?
            .books
            .update(&id, patch)
            .map_err(|e| e.extend())?;
        ctx.invalidate_loaders();
        Ok(Some(book.into()))
    }

    /// Delete a book
    async fn delete_book(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<Book>> {
        let book = catalog(ctx)?.books.delete(&id).map_err(|e| e.extend())?;
        ctx.invalidate_loaders();
        Ok(Some(book.into()))
    }

    /// Add an author
    async fn add_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        age: i32,
    ) -> async_graphql::Result<Option<Author>> {
        let author = catalog(ctx)?.authors.insert(NewAuthor { name, age });
        ctx.invalidate_loaders();
        Ok(Some(author.into()))
    }

    /// Update an author
    async fn update_author(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        age: Option<i32>,
    ) -> async_graphql::Result<Option<Author>> {
        let author = catalog(ctx)?
            .authors
            .update(&id, AuthorPatch { name, age })
            .map_err(|e| e.extend())?;
        ctx.invalidate_loaders();
        Ok(Some(author.into()))
    }

    /// Delete an author
    async fn delete_author(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<Author>> {
        let author = catalog(ctx)?
            .authors
            .delete(&id)
            .map_err(|e| e.extend())?;
        ctx.invalidate_loaders();
        Ok(Some(author.into()))
    }
}
