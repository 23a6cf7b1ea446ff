#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to parse MongoDB connection options: {0}")]
    ClientOptions(mongodb::error::Error),
    #[error("failed to construct MongoDB client: {0}")]
    ClientBuild(mongodb::error::Error),
    #[error("failed to ping MongoDB: {0}")]
    Ping(mongodb::error::Error),
    #[error("failed to create collection {database}.{collection}: {source}")]
    CreateCollection {
        database: String,
        collection: String,
        #[source]
        source: mongodb::error::Error,
    },
    #[error("failed to list collections in {database}: {source}")]
    ListCollections {
        database: String,
        #[source]
        source: mongodb::error::Error,
    },
    #[error(
        "database {database} is missing collections: {missing}",
        missing = missing.join(", ")
    )]
    MissingCollections {
        database: String,
        missing: Vec<String>,
    },
}

pub type ProvisionResult<T> = std::result::Result<T, ProvisionError>;
