use cynic::{MutationBuilder as _, QueryBuilder as _};

use crate::client::{
    AuthorList, BookList, BookQuery, BooksQuery, ClientError, IdVariables, LookupVariables,
    UpdateAuthor, UpdateAuthorVariables,
};
use crate::server::GRAPHQL_PATH;


#[tokio::test]
async fn test_request() {
    let server = testserver::Server::seeded();
    let client = server.client();

    let books = client.query(BooksQuery::build(())).await.unwrap().into_rows();

    assert_eq!(books.len(), 6);
    let first = &books[0];
    assert_eq!(first.name, "Harry Potter");
    assert_eq!(
        first.author.as_ref().map(|a| a.name.as_str()),
        Some("J.K. Rowling")
    );
    assert!(books[5].author.is_none());
}

#[tokio::test]
async fn book_lookup_over_http() {
    let server = testserver::Server::seeded();
    let client = server.client();

    let found = client
        .query(BookQuery::build(LookupVariables {
            id: Some(cynic::Id::new("3")),
        }))
        .await
        .unwrap();
    assert_eq!(found.book.map(|b| b.name), Some("The Shining".into()));

    let missing = client
        .query(BookQuery::build(LookupVariables {
            id: Some(cynic::Id::new("99")),
        }))
        .await
        .unwrap();
    assert!(missing.book.is_none());

    let no_id = client
        .query(BookQuery::build(LookupVariables { id: None }))
        .await
        .unwrap();
    assert!(no_id.book.is_none());
}

#[tokio::test]
async fn graphiql_is_served_on_the_endpoint() {
    let server = testserver::Server::seeded();

    let res = reqwest::get(server.url(GRAPHQL_PATH)).await.unwrap();
    assert!(res.status().is_success());

    let body = res.text().await.unwrap();
    assert!(body.to_lowercase().contains("graphiql"));
}

#[tokio::test]
async fn unknown_ids_surface_the_server_message() {
    let server = testserver::Server::seeded();
    let client = server.client();

    let err = client
        .query(UpdateAuthor::build(UpdateAuthorVariables {
            id: cynic::Id::new("42"),
            name: Some("Nobody".into()),
            age: None,
        }))
        .await
        .unwrap_err();
    assert!(matches!(&err, ClientError::GraphQl(message) if message == "Author not found"));

    let err = client
        .query(crate::client::DeleteBook::build(IdVariables {
            id: cynic::Id::new("42"),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Book not found");
}

#[tokio::test]
async fn book_list_adds_edits_and_deletes() {
    let server = testserver::Server::seeded();
    let mut list = BookList::new(server.client());
    list.refetch().await.unwrap();
    assert_eq!(list.rows.len(), 6);

    // an empty form adds
    list.form.name = "It".into();
    list.form.genre = "Horror".into();
    list.form.author_id = "3".into();
    let added = list.submit().await.unwrap();
    assert_eq!(added.id.inner(), "7");
    assert_eq!(added.author.map(|a| a.name), Some("Stephen King".into()));
    assert_eq!(list.rows.len(), 7);
    assert_eq!(list.form, Default::default());

    // a form with an id updates
    assert!(list.edit("7"));
    assert_eq!(list.form.id.as_deref(), Some("7"));
    list.form.genre = "Coming-of-age".into();
    list.submit().await.unwrap();
    let row = list.rows.iter().find(|b| b.id.inner() == "7").unwrap();
    assert_eq!(row.name, "It");
    assert_eq!(row.genre, "Coming-of-age");
    assert_eq!(row.author_id.inner(), "3");

    list.delete("1").await.unwrap();
    assert_eq!(list.rows.len(), 6);
    assert!(list.rows.iter().all(|b| b.id.inner() != "1"));
    assert!(list.error.is_none());
}

#[tokio::test]
async fn book_list_keeps_rows_when_a_mutation_fails() {
    let server = testserver::Server::seeded();
    let mut list = BookList::new(server.client());
    list.refetch().await.unwrap();

    assert!(list.delete("99").await.is_err());
    assert_eq!(list.error.as_deref(), Some("Book not found"));
    assert_eq!(list.rows.len(), 6);

    assert!(!list.edit("99"));
}

#[tokio::test]
async fn author_list_validates_age_locally() {
    let server = testserver::Server::seeded();
    let mut list = AuthorList::new(server.client());
    list.refetch().await.unwrap();

    list.form.name = "Ursula K. Le Guin".into();
    list.form.age = "eighty-eight".into();
    let err = list.submit().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidInput(_)));
    assert!(list.error.as_deref().unwrap().contains("eighty-eight"));
    assert_eq!(list.rows.len(), 3);

    list.form.age = "88".into();
    let added = list.submit().await.unwrap();
    assert_eq!(added.id.inner(), "4");
    assert_eq!(list.rows.len(), 4);
    assert!(list.error.is_none());
}

#[tokio::test]
async fn author_list_updates_and_deletes() {
    let server = testserver::Server::seeded();
    let mut list = AuthorList::new(server.client());
    list.refetch().await.unwrap();

    assert!(list.edit("2"));
    assert_eq!(list.form.age, "72");
    list.form.age = "76".into();
    let updated = list.submit().await.unwrap();
    assert_eq!(updated.name, "George R.R. Martin");
    assert_eq!(updated.age, 76);

    list.delete("2").await.unwrap();
    assert_eq!(list.rows.len(), 2);

    // books by the deleted author are left dangling
    let mut books = BookList::new(server.client());
    books.refetch().await.unwrap();
    let orphaned: Vec<_> = books
        .rows
        .iter()
        .filter(|b| b.author_id.inner() == "2")
        .collect();
    assert_eq!(orphaned.len(), 2);
    assert!(orphaned.iter().all(|b| b.author.is_none()));
}
