use std::fmt::Display;

use checkout_engine::db_types::{FulfillmentStatus, Order, OrderId, PaymentClaim};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

/// Body for both order placement endpoints. Line items and amounts are never part of it; the
/// server prices the authoritative cart itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub address_id: String,
}

/// The storefront's callback after the Razorpay checkout widget completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    pub order_id: OrderId,
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

impl From<VerifyPaymentRequest> for PaymentClaim {
    fn from(req: VerifyPaymentRequest) -> Self {
        Self {
            order_id: req.order_id,
            gateway_order_id: req.razorpay_order_id,
            gateway_payment_id: req.razorpay_payment_id,
            signature: req.razorpay_signature,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub order_id: OrderId,
    pub status: FulfillmentStatus,
}

/// Response to a successful order placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlacedResponse {
    pub success: bool,
    pub message: String,
    pub order: Order,
}

/// Response to a successful online order creation. `session` is the raw gateway order the
/// storefront hands to the Razorpay checkout widget, together with the public key id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineOrderResponse {
    pub success: bool,
    pub order_id: OrderId,
    pub key: String,
    pub session: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}
