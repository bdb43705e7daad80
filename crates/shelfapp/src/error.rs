use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    /// The catalog could not be read or parsed. Terminal for the session.
    #[error("Could not load the catalog: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ShelfError>;
