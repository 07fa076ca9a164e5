use thiserror::Error;

use crate::{
    db_types::{FulfillmentStatus, OrderId},
    traits::{GatewayError, StorageError},
};

/// Everything that can go wrong between "buyer asked to check out" and "order committed".
///
/// The messages are caller-visible: the server returns them verbatim inside the
/// `{success: false, message}` envelope.
#[derive(Debug, Error)]
pub enum OrderFlowError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Invalid address selected")]
    InvalidAddress,
    #[error("Item {0} not found in cart")]
    ItemNotInCart(String),
    #[error("Product {0} not found")]
    ProductNotFound(String),
    #[error("Invalid quantity for item {0}")]
    InvalidQuantity(String),
    #[error("Variant {variant} not found for {product}")]
    VariantNotFound { product: String, variant: String },
    #[error("{product} ({variant}) is out of stock")]
    InsufficientStock { product: String, variant: String },
    #[error("{product} is out of stock")]
    OutOfStock { product: String },
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),
    #[error("Order {0} is already paid")]
    AlreadyPaid(OrderId),
    #[error("Gateway order id mismatch")]
    GatewayOrderMismatch,
    #[error("Order status cannot change from {from} to {to}")]
    InvalidStatusTransition { from: FulfillmentStatus, to: FulfillmentStatus },
    #[error(transparent)]
    GatewayError(#[from] GatewayError),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<StorageError> for OrderFlowError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::OrderNotFound(id) => Self::OrderNotFound(id),
            StorageError::AlreadyPaid(id) => Self::AlreadyPaid(id),
            StorageError::InsufficientStock { product, variant } => Self::InsufficientStock { product, variant },
            StorageError::OutOfStock { product } => Self::OutOfStock { product },
            StorageError::DatabaseError(msg) => Self::DatabaseError(msg),
        }
    }
}
