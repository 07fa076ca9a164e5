use serde::{Deserialize, Serialize};

/// A Razorpay order object. Amounts are in paise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: i64,
    #[serde(default)]
    pub amount_paid: i64,
    #[serde(default)]
    pub amount_due: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    pub status: String,
}

/// A Razorpay payment object. Amounts are in paise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RazorpayPayment {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub captured: bool,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl RazorpayPayment {
    /// Razorpay reports a usable payment as `captured`, or `authorized` when auto-capture has not
    /// settled yet. Anything else (`created`, `failed`, `refunded`) is not a completed payment.
    pub fn is_settled(&self) -> bool {
        self.status == "captured" || self.status == "authorized"
    }
}
