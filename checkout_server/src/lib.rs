//! # Checkout server
//!
//! The HTTP front end for the checkout engine. It is responsible for:
//! * authenticating buyers and sellers via JWT bearer tokens,
//! * exposing the order placement, payment verification and fulfillment endpoints,
//! * bridging the engine's gateway trait to the Razorpay REST API.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
pub mod auth;
pub mod config;
pub mod data_objects;
pub mod errors;

pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
