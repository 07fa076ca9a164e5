//! The seams of the checkout engine.
//!
//! Storage backends implement the management traits in [`storage`]; payment providers implement
//! [`PaymentGateway`]. The engine's [`crate::OrderFlowApi`] is generic over both, which is also
//! what lets the server's endpoint tests substitute mocks for the real SQLite backend and the
//! real gateway.

mod payment_gateway;
mod storage;

pub use payment_gateway::{GatewayError, GatewayIntent, NoGateway, PaymentGateway};
pub use storage::{
    AddressBook,
    CartEntry,
    CartManagement,
    CatalogManagement,
    CheckoutDatabase,
    OrderManagement,
    StorageError,
};
