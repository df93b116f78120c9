use cynic::http::{CynicReqwestError, ReqwestExt};
use cynic::serde;
use reqwest::Url;
use thiserror::Error;

mod lists;

pub use lists::{AuthorList, BookList};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] CynicReqwestError),

    /// Messages of every GraphQL error in the response, joined.
    #[error("{0}")]
    GraphQl(String),

    #[error("the response carried no data")]
    MissingData,

    #[error("{0}")]
    InvalidInput(String),
}

#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    url: Url,
}

impl Client {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub async fn query<Query, Input>(
        &self,
        op: cynic::Operation<Query, Input>,
    ) -> Result<Query, ClientError>
    where
        Input: serde::Serialize,
        Query: serde::de::DeserializeOwned + 'static,
    {
        let response = self.client.post(self.url.clone()).run_graphql(op).await?;

        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ClientError::GraphQl(message));
        }
        response.data.ok_or(ClientError::MissingData)
    }
}

#[cynic::schema("library")]
mod schema {}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "Author")]
pub struct AuthorRow {
    pub id: cynic::Id,
    pub name: String,
    pub age: i32,
}

#[derive(cynic::QueryFragment, Debug, Clone, PartialEq)]
#[cynic(graphql_type = "Book")]
pub struct BookRow {
    pub id: cynic::Id,
    pub name: String,
    pub genre: String,
    pub author_id: cynic::Id,
    pub author: Option<AuthorRow>,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Book")]
pub struct BookRef {
    pub id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Author")]
pub struct AuthorRef {
    pub id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct BooksQuery {
    pub books: Option<Vec<Option<BookRow>>>,
}

impl BooksQuery {
    /// The listed books, skipping `null` entries.
    pub fn into_rows(self) -> Vec<BookRow> {
        self.books.into_iter().flatten().flatten().collect()
    }
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct AuthorsQuery {
    pub authors: Option<Vec<Option<AuthorRow>>>,
}

impl AuthorsQuery {
    pub fn into_rows(self) -> Vec<AuthorRow> {
        self.authors.into_iter().flatten().flatten().collect()
    }
}

#[derive(cynic::QueryVariables, Debug)]
pub struct IdVariables {
    pub id: cynic::Id,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct LookupVariables {
    pub id: Option<cynic::Id>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "LookupVariables")]
pub struct BookQuery {
    #[arguments(id: $id)]
    pub book: Option<BookRow>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct AddBookVariables {
    pub name: String,
    pub genre: String,
    pub author_id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "AddBookVariables")]
pub struct AddBook {
    #[arguments(name: $name, genre: $genre, authorId: $author_id)]
    pub add_book: Option<BookRow>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct UpdateBookVariables {
    pub id: cynic::Id,
    pub name: Option<String>,
    pub genre: Option<String>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "UpdateBookVariables")]
pub struct UpdateBook {
    #[arguments(id: $id, name: $name, genre: $genre)]
    pub update_book: Option<BookRow>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "IdVariables")]
pub struct DeleteBook {
    #[arguments(id: $id)]
    pub delete_book: Option<BookRef>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct AddAuthorVariables {
    pub name: String,
    pub age: i32,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "AddAuthorVariables")]
pub struct AddAuthor {
    #[arguments(name: $name, age: $age)]
    pub add_author: Option<AuthorRow>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct UpdateAuthorVariables {
    pub id: cynic::Id,
    pub name: Option<String>,
    pub age: Option<i32>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "UpdateAuthorVariables")]
pub struct UpdateAuthor {
    #[arguments(id: $id, name: $name, age: $age)]
    pub update_author: Option<AuthorRow>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "IdVariables")]
pub struct DeleteAuthor {
    #[arguments(id: $id)]
    pub delete_author: Option<AuthorRef>,
}
