//! Checkout Engine
//!
//! The checkout engine holds the core logic for turning a buyer's cart into a priced order and
//! reconciling gateway payments against it. It is gateway-agnostic and server-agnostic.
//!
//! The library is divided into two main sections:
//! 1. Storage and gateway traits ([`mod@traits`]). Backends implement [`traits::CheckoutDatabase`]
//!    to persist orders, and payment providers implement [`traits::PaymentGateway`] to create and
//!    verify payment intents. A Sqlite backend ships behind the `sqlite` feature.
//! 2. The checkout public API ([`OrderFlowApi`]). This is the only entry point servers should use.
//!    It prices carts, places COD and online orders, verifies payment callbacks and walks orders
//!    through their fulfillment lifecycle.
mod checkout_api;

pub mod db_types;
pub mod helpers;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use checkout_api::{OrderFlowApi, OrderFlowError, SURCHARGE_PERCENT};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteCheckoutDb;
