use checkout_common::Rupees;
use serde_json::Value;
use thiserror::Error;

use crate::db_types::{Order, OrderId, PaymentClaim, PaymentRecord};

/// The gateway's own record of a payable amount, handed back to the storefront so it can open the
/// gateway's checkout flow.
#[derive(Debug, Clone)]
pub struct GatewayIntent {
    /// The gateway's id for its order/intent object.
    pub gateway_order_id: String,
    /// The public key id the storefront needs to start the gateway checkout.
    pub key_id: String,
    /// The raw gateway order object.
    pub session: Value,
}

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Amount mismatch: order total is {expected} paise but the gateway recorded {actual} paise")]
    AmountMismatch { expected: i64, actual: i64 },
    #[error("Payment not captured (gateway reports '{0}')")]
    NotCaptured(String),
    #[error("Gateway API error: {0}")]
    ApiError(String),
    #[error("{0} payments are not supported by this gateway")]
    Unsupported(String),
}

/// A payment provider capability. COD uses [`NoGateway`]; online payments use a real
/// implementation such as the Razorpay integration in the server crate.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway: Clone {
    /// Create a remote payment intent sized to `amount`, carrying the local order id as the
    /// receipt reference, before the local order is persisted.
    async fn create_intent(&self, order_id: &OrderId, amount: Rupees) -> Result<GatewayIntent, GatewayError>;

    /// Verify a claimed payment against the gateway.
    ///
    /// Implementations must check the claim's signature first, and then independently re-fetch
    /// the gateway order and payment: the gateway's recorded amount must equal the order total
    /// in minor units, and the payment status must be captured or authorized. The claimed
    /// payload is never trusted for amount or status.
    async fn verify_callback(&self, order: &Order, claim: &PaymentClaim) -> Result<PaymentRecord, GatewayError>;
}

/// The gateway variant for deployments that only take cash on delivery: there is nothing to
/// create and nothing to verify.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGateway;

impl PaymentGateway for NoGateway {
    async fn create_intent(&self, _order_id: &OrderId, _amount: Rupees) -> Result<GatewayIntent, GatewayError> {
        Err(GatewayError::Unsupported("Online".to_string()))
    }

    async fn verify_callback(&self, _order: &Order, _claim: &PaymentClaim) -> Result<PaymentRecord, GatewayError> {
        Err(GatewayError::Unsupported("Online".to_string()))
    }
}
