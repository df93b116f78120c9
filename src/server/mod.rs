use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ErrorKind;
use crate::store::Catalog;

mod dataloader;
mod loaders;
mod schema;

use dataloader::DataLoader;
use loaders::{LoadAuthors, LoadBooksByAuthor};
pub use schema::{MutationRoot, QueryRoot};

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub const GRAPHQL_PATH: &str = "/graphql";

pub fn build_schema(catalog: Catalog) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(catalog)
        .finish()
}

/// The executable schema together with the catalog its loaders read from.
#[derive(Clone)]
pub struct GraphQl {
    schema: CatalogSchema,
    catalog: Catalog,
}

impl GraphQl {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            schema: build_schema(catalog.clone()),
            catalog,
        }
    }

    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }

    /// Runs one request with fresh relationship loaders attached.
    pub async fn execute(&self, req: impl Into<async_graphql::Request>) -> async_graphql::Response {
        let load_authors = DataLoader::new(LoadAuthors {
            catalog: self.catalog.clone(),
        });
        let load_books = DataLoader::new(LoadBooksByAuthor {
            catalog: self.catalog.clone(),
        });
        let req: async_graphql::Request = req.into();
        let req = req.data(load_authors.clone()).data(load_books.clone());

        let execute = self.schema.execute(req);
        let mut response = load_authors.wrap(load_books.wrap(execute)).await;
        tag_engine_errors(&mut response);
        response
    }
}

/// Errors raised by the engine itself (parsing, validation, argument
/// coercion) carry no code of their own.
fn tag_engine_errors(response: &mut async_graphql::Response) {
    for error in &mut response.errors {
        let extensions = error.extensions.get_or_insert_with(Default::default);
        if extensions.get("code").is_none() {
            extensions.set("code", ErrorKind::Validation.code());
        }
    }
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

#[axum::debug_handler]
async fn graphql_handler(State(graphql): State<GraphQl>, req: GraphQLRequest) -> GraphQLResponse {
    graphql.execute(req.into_inner()).await.into()
}

pub fn make_app(catalog: Catalog) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(GraphQl::new(catalog))
}
