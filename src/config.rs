use std::net::{IpAddr, SocketAddr};

use clap::{Args, Parser, Subcommand};
use reqwest::Url;

use crate::store::IdStrategy;

#[derive(Parser, Debug)]
#[command(version, about = "A small library catalog served over GraphQL")]
pub struct Cli {
    /// Default log level, overridden by `RUST_LOG`
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    #[arg(long, env = "ID_STRATEGY", value_enum, default_value_t = IdStrategy::Length)]
    pub id_strategy: IdStrategy,

    /// Start without the demo books and authors
    #[arg(long, env = "CATALOG_EMPTY")]
    pub empty: bool,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the GraphQL server (the default)
    Serve,
    /// Print the schema in SDL
    Schema,
    /// List and edit books on a running server
    Books {
        #[command(flatten)]
        client: ClientConfig,
        #[command(subcommand)]
        action: Option<BookAction>,
    },
    /// List and edit authors on a running server
    Authors {
        #[command(flatten)]
        client: ClientConfig,
        #[command(subcommand)]
        action: Option<AuthorAction>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ClientConfig {
    #[arg(long, env = "CATALOG_ENDPOINT", default_value = "http://localhost:5000/graphql")]
    pub endpoint: Url,
}

#[derive(Subcommand, Debug)]
pub enum BookAction {
    List,
    Show {
        id: String,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        genre: String,
        #[arg(long)]
        author_id: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        genre: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthorAction {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<String>,
    },
    Delete {
        id: String,
    },
}
