//! List/form components for books and authors.
//!
//! Each component runs its list query via `refetch` when mounted, keeps a single form
//! for both adding and editing (a form with an id is an edit), and re-fetches
//! the whole list after every successful mutation. The message of the last
//! failure is kept verbatim in `error`; nothing is retried.

use cynic::{MutationBuilder as _, QueryBuilder as _};

use super::{
    AddAuthor, AddAuthorVariables, AddBook, AddBookVariables, AuthorRow, AuthorsQuery, BookRow,
    BooksQuery, Client, ClientError, DeleteAuthor, DeleteBook, IdVariables, UpdateAuthor,
    UpdateAuthorVariables, UpdateBook, UpdateBookVariables,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub id: Option<String>,
    pub name: String,
    pub genre: String,
    pub author_id: String,
}

pub struct BookList {
    client: Client,
    pub rows: Vec<BookRow>,
    pub form: BookForm,
    pub error: Option<String>,
}

impl BookList {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            rows: Vec::new(),
            form: BookForm::default(),
            error: None,
        }
    }

    pub async fn refetch(&mut self) -> Result<(), ClientError> {
        let result = self.client.query(BooksQuery::build(())).await;
        let data = settle(&mut self.error, result)?;
        self.rows = data.into_rows();
        Ok(())
    }

    /// Copies the row with `id` into the form. Returns `false` if no such row
    /// is listed.
    pub fn edit(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id.inner() == id) else {
            return false;
        };
        self.form = BookForm {
            id: Some(row.id.inner().to_owned()),
            name: row.name.clone(),
            genre: row.genre.clone(),
            author_id: row.author_id.inner().to_owned(),
        };
        true
    }

    /// Adds or updates depending on whether the form has an id. Updates only
    /// send the name and genre.
    pub async fn submit(&mut self) -> Result<BookRow, ClientError> {
        let form = self.form.clone();
        let result = match form.id {
            Some(id) => self
                .client
                .query(UpdateBook::build(UpdateBookVariables {
                    id: cynic::Id::new(id),
                    name: Some(form.name),
                    genre: Some(form.genre),
                }))
                .await
                .and_then(|data| data.update_book.ok_or(ClientError::MissingData)),
            None => self
                .client
                .query(AddBook::build(AddBookVariables {
                    name: form.name,
                    genre: form.genre,
                    author_id: cynic::Id::new(form.author_id),
                }))
                .await
                .and_then(|data| data.add_book.ok_or(ClientError::MissingData)),
        };
        let book = settle(&mut self.error, result)?;

        tracing::debug!(id = book.id.inner(), "saved book");
        self.form = BookForm::default();
        self.refetch().await?;
        Ok(book)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        let result = self
            .client
            .query(DeleteBook::build(IdVariables {
                id: cynic::Id::new(id),
            }))
            .await;
        settle(&mut self.error, result)?;
        self.refetch().await
    }
}

/// The author form keeps `age` as typed text; it is parsed on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorForm {
    pub id: Option<String>,
    pub name: String,
    pub age: String,
}

pub struct AuthorList {
    client: Client,
    pub rows: Vec<AuthorRow>,
    pub form: AuthorForm,
    pub error: Option<String>,
}

impl AuthorList {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            rows: Vec::new(),
            form: AuthorForm::default(),
            error: None,
        }
    }

    pub async fn refetch(&mut self) -> Result<(), ClientError> {
        let result = self.client.query(AuthorsQuery::build(())).await;
        let data = settle(&mut self.error, result)?;
        self.rows = data.into_rows();
        Ok(())
    }

    pub fn edit(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id.inner() == id) else {
            return false;
        };
        self.form = AuthorForm {
            id: Some(row.id.inner().to_owned()),
            name: row.name.clone(),
            age: row.age.to_string(),
        };
        true
    }

    pub async fn submit(&mut self) -> Result<AuthorRow, ClientError> {
        let form = self.form.clone();
        let age = form.age.trim().parse::<i32>().map_err(|_| {
            ClientError::InvalidInput(format!("age must be a whole number, got `{}`", form.age))
        });
        let age = settle(&mut self.error, age)?;

        let result = match form.id {
            Some(id) => self
                .client
                .query(UpdateAuthor::build(UpdateAuthorVariables {
                    id: cynic::Id::new(id),
                    name: Some(form.name),
                    age: Some(age),
                }))
                .await
                .and_then(|data| data.update_author.ok_or(ClientError::MissingData)),
            None => self
                .client
                .query(AddAuthor::build(AddAuthorVariables {
                    name: form.name,
                    age,
                }))
                .await
                .and_then(|data| data.add_author.ok_or(ClientError::MissingData)),
        };
        let author = settle(&mut self.error, result)?;

        tracing::debug!(id = author.id.inner(), "saved author");
        self.form = AuthorForm::default();
        self.refetch().await?;
        Ok(author)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        let result = self
            .client
            .query(DeleteAuthor::build(IdVariables {
                id: cynic::Id::new(id),
            }))
            .await;
        settle(&mut self.error, result)?;
        self.refetch().await
    }
}

fn settle<T>(error: &mut Option<String>, result: Result<T, ClientError>) -> Result<T, ClientError> {
    *error = result.as_ref().err().map(ToString::to_string);
    result
}
