use cynic::QueryBuilder as _;

use crate::client::{AuthorList, BookList, BookQuery, BookRow, Client, LookupVariables};
use crate::config::{AuthorAction, BookAction, ClientConfig, ServerConfig};
use crate::error::AppError;
use crate::server::{GRAPHQL_PATH, GraphQl, make_app};
use crate::store::Catalog;

pub async fn serve(config: &ServerConfig) -> Result<(), AppError> {
    let catalog = Catalog::in_memory(config.id_strategy, !config.empty);
    let app = make_app(catalog);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        id_strategy = ?config.id_strategy,
        seeded = !config.empty,
        "server running, GraphiQL at http://{addr}{GRAPHQL_PATH}"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Prints the SDL the server exposes. `schemas/library.graphql` is kept in
/// sync with this output.
pub fn schema() {
    let graphql = GraphQl::new(Catalog::in_memory(Default::default(), false));
    println!("{}", graphql.sdl());
}

pub async fn books(config: &ClientConfig, action: Option<BookAction>) -> Result<(), AppError> {
    let client = Client::new(config.endpoint.clone());
    let action = action.unwrap_or(BookAction::List);

    if let BookAction::Show { id } = &action {
        let found = client
            .query(BookQuery::build(LookupVariables {
                id: Some(cynic::Id::new(id)),
            }))
            .await?;
        match found.book {
            Some(book) => print_book(&book),
            None => println!("no book with id {id}"),
        }
        return Ok(());
    }

    let mut list = BookList::new(client);
    list.refetch().await?;

    match action {
        BookAction::List | BookAction::Show { .. } => {}
        BookAction::Add {
            name,
            genre,
            author_id,
        } => {
            list.form.name = name;
            list.form.genre = genre;
            list.form.author_id = author_id;
            list.submit().await?;
        }
        BookAction::Update { id, name, genre } => {
            if !list.edit(&id) {
                println!("no book with id {id}");
                return Ok(());
            }
            if let Some(name) = name {
                list.form.name = name;
            }
            if let Some(genre) = genre {
                list.form.genre = genre;
            }
            list.submit().await?;
        }
        BookAction::Delete { id } => list.delete(&id).await?,
    }

    list.rows.iter().for_each(print_book);
    Ok(())
}

fn print_book(book: &BookRow) {
    let author = match &book.author {
        Some(author) => format!("{} (age {})", author.name, author.age),
        None => format!("unknown author {}", book.author_id.inner()),
    };
    println!(
        "{:>4}  {}  [{}]  by {}",
        book.id.inner(),
        book.name,
        book.genre,
        author
    );
}

pub async fn authors(config: &ClientConfig, action: Option<AuthorAction>) -> Result<(), AppError> {
    let mut list = AuthorList::new(Client::new(config.endpoint.clone()));
    list.refetch().await?;

    match action.unwrap_or(AuthorAction::List) {
        AuthorAction::List => {}
        AuthorAction::Add { name, age } => {
            list.form.name = name;
            list.form.age = age;
            list.submit().await?;
        }
        AuthorAction::Update { id, name, age } => {
            if !list.edit(&id) {
                println!("no author with id {id}");
                return Ok(());
            }
            if let Some(name) = name {
                list.form.name = name;
            }
            if let Some(age) = age {
                list.form.age = age;
            }
            list.submit().await?;
        }
        AuthorAction::Delete { id } => list.delete(&id).await?,
    }

    for author in &list.rows {
        println!("{:>4}  {} (age {})", author.id.inner(), author.name, author.age);
    }
    Ok(())
}
