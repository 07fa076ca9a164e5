use std::{fmt::Display, str::FromStr};

use checkout_common::Rupees;
use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;
use uuid::Uuid;

//--------------------------------------        OrderId        -------------------------------------------------------
/// The server-generated order identifier. Opaque, stable once created.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    /// Generates a fresh order id. There is exactly one id scheme: a random UUID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//--------------------------------------      PaymentType      -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    /// Cash on delivery. The order is accepted without a gateway round-trip and settled offline.
    Cod,
    /// Online payment via the configured gateway. The order stays unpaid until verification.
    Online,
}

impl Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentType::Cod => write!(f, "COD"),
            PaymentType::Online => write!(f, "Online"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid payment type: {0}")]
pub struct PaymentTypeConversionError(String);

impl FromStr for PaymentType {
    type Err = PaymentTypeConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COD" => Ok(Self::Cod),
            "Online" => Ok(Self::Online),
            s => Err(PaymentTypeConversionError(s.to_string())),
        }
    }
}

impl From<String> for PaymentType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|e| {
            error!("{e}. But this conversion cannot fail. Defaulting to COD");
            PaymentType::Cod
        })
    }
}

//--------------------------------------  FulfillmentStatus    -------------------------------------------------------
/// The seller-facing lifecycle label of an order after placement.
///
/// Transitions are driven by authenticated seller actions and are restricted to the table encoded
/// in [`FulfillmentStatus::can_transition_to`]. `Canceled` and `Refunded` are terminal; `Delivered`
/// may only move to `Refunded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FulfillmentStatus {
    Placed,
    Packing,
    Shipped,
    OutForDelivery,
    Delivered,
    Canceled,
    Refunded,
}

impl FulfillmentStatus {
    pub fn can_transition_to(&self, next: FulfillmentStatus) -> bool {
        use FulfillmentStatus::*;
        matches!(
            (self, next),
            (Placed, Packing | Shipped | Canceled) |
                (Packing, Shipped | Canceled) |
                (Shipped, OutForDelivery | Delivered) |
                (OutForDelivery, Delivered) |
                (Delivered, Refunded)
        )
    }
}

impl Display for FulfillmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FulfillmentStatus::Placed => "Placed",
            FulfillmentStatus::Packing => "Packing",
            FulfillmentStatus::Shipped => "Shipped",
            FulfillmentStatus::OutForDelivery => "OutForDelivery",
            FulfillmentStatus::Delivered => "Delivered",
            FulfillmentStatus::Canceled => "Canceled",
            FulfillmentStatus::Refunded => "Refunded",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid fulfillment status: {0}")]
pub struct StatusConversionError(pub String);

impl FromStr for FulfillmentStatus {
    type Err = StatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Placed" => Ok(Self::Placed),
            "Packing" => Ok(Self::Packing),
            "Shipped" => Ok(Self::Shipped),
            "OutForDelivery" => Ok(Self::OutForDelivery),
            "Delivered" => Ok(Self::Delivered),
            "Canceled" => Ok(Self::Canceled),
            "Refunded" => Ok(Self::Refunded),
            s => Err(StatusConversionError(s.to_string())),
        }
    }
}

//--------------------------------------       LineItem        -------------------------------------------------------
/// One product (optionally a weight variant of it) and a quantity within an order.
///
/// The unit price is resolved from the catalog at validation time and frozen onto the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub unit_price: Rupees,
}

//--------------------------------------     PaymentRecord     -------------------------------------------------------
/// The payment metadata stored on an order once the verifier has committed the paid state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
    /// The raw payment object as returned by the gateway's own API, kept for auditing.
    pub raw: serde_json::Value,
}

//--------------------------------------      PaymentClaim     -------------------------------------------------------
/// A client's claim that a gateway payment completed. Advisory until every verifier gate passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentClaim {
    pub order_id: OrderId,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
}

//--------------------------------------        Order          -------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: String,
    pub items: Vec<LineItem>,
    /// The total, computed server-side from the catalog at creation time. Never client-supplied.
    pub amount: Rupees,
    pub address_id: String,
    pub payment_type: PaymentType,
    pub paid: bool,
    pub gateway_order_id: Option<String>,
    pub payment: Option<PaymentRecord>,
    pub status: FulfillmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       NewOrder        -------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_id: OrderId,
    pub buyer_id: String,
    pub items: Vec<LineItem>,
    pub amount: Rupees,
    pub address_id: String,
    pub payment_type: PaymentType,
    /// Set for online orders once the gateway intent exists; always `None` for COD.
    pub gateway_order_id: Option<String>,
}

impl NewOrder {
    pub fn new(
        buyer_id: String,
        items: Vec<LineItem>,
        amount: Rupees,
        address_id: String,
        payment_type: PaymentType,
    ) -> Self {
        Self { order_id: OrderId::new(), buyer_id, items, amount, address_id, payment_type, gateway_order_id: None }
    }

    pub fn with_gateway_order_id(mut self, gateway_order_id: String) -> Self {
        self.gateway_order_id = Some(gateway_order_id);
        self
    }
}

//--------------------------------------       Product         -------------------------------------------------------
/// A catalog product as this core sees it. Read-only here; the catalog service owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub offer_price: Rupees,
    pub in_stock: bool,
    pub variants: Vec<WeightVariant>,
}

impl Product {
    pub fn variant(&self, weight: &str) -> Option<&WeightVariant> {
        self.variants.iter().find(|v| v.weight == weight)
    }
}

/// A weight-based sub-SKU with its own price and stock count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightVariant {
    pub weight: String,
    pub offer_price: Rupees,
    pub stock: i64,
}
