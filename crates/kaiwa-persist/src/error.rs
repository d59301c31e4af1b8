use thiserror::Error;

/// Infrastructure failures from the storage layer.
///
/// "Not found" and "malformed id" are not errors here: repository reads and
/// deletes absorb them into `None` / `false` / empty results, so only
/// genuine driver or connection problems cross this boundary.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("BSON serialization error: {0}")]
    BsonSerialization(#[from] bson::ser::Error),

    #[error("BSON deserialization error: {0}")]
    BsonDeserialization(#[from] bson::de::Error),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;
