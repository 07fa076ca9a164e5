use thiserror::Error;

use crate::{db_types::OrderId, traits::StorageError};

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database error: {0}")]
    QueryError(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error("Could not (de)serialize order fields: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Conversion error: {0}")]
    ConversionError(String),
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),
    #[error("Order {0} is already paid")]
    AlreadyPaid(OrderId),
    #[error("{product} ({variant}) is out of stock")]
    InsufficientStock { product: String, variant: String },
    #[error("{product} is out of stock")]
    OutOfStock { product: String },
}

impl From<SqliteDatabaseError> for StorageError {
    fn from(e: SqliteDatabaseError) -> Self {
        match e {
            SqliteDatabaseError::OrderNotFound(id) => StorageError::OrderNotFound(id),
            SqliteDatabaseError::AlreadyPaid(id) => StorageError::AlreadyPaid(id),
            SqliteDatabaseError::InsufficientStock { product, variant } => {
                StorageError::InsufficientStock { product, variant }
            },
            SqliteDatabaseError::OutOfStock { product } => StorageError::OutOfStock { product },
            e => StorageError::DatabaseError(e.to_string()),
        }
    }
}
