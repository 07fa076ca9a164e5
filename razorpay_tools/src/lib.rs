//! A thin client for the parts of the Razorpay REST API that the checkout server needs: creating
//! gateway orders, re-fetching them, re-fetching payments and verifying callback signatures.

mod api;
mod config;
mod error;

mod data_objects;
pub mod helpers;

pub use api::RazorpayApi;
pub use config::RazorpayConfig;
pub use data_objects::{RazorpayOrder, RazorpayPayment};
pub use error::RazorpayApiError;
