use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Tag carried under `extensions.code` of every GraphQL error the server
/// returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Validation => "VALIDATION_ERROR",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
        }
    }
}

impl ErrorExtensions for CatalogError {
    fn extend(&self) -> async_graphql::Error {
        let CatalogError::NotFound { id, .. } = self;
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.kind().code());
            e.set("id", id.as_str());
        })
    }
}

/// Errors that end the process.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("logger error: {0}")]
    Logger(String),

    #[error("client error: {0}")]
    Client(#[from] crate::client::ClientError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
