use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::RazorpayApiError;

type HmacSha256 = Hmac<Sha256>;

/// The hex-encoded HMAC-SHA256 signature Razorpay computes over a completed checkout:
/// `{gateway_order_id}|{gateway_payment_id}`, keyed with the API key secret.
pub fn payment_signature(order_id: &str, payment_id: &str, secret: &str) -> Result<String, RazorpayApiError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| RazorpayApiError::Initialization(e.to_string()))?;
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verifies a claimed payment signature in constant time.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> Result<(), RazorpayApiError> {
    let claimed = hex::decode(signature).map_err(|_| RazorpayApiError::InvalidSignature)?;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| RazorpayApiError::Initialization(e.to_string()))?;
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    mac.verify_slice(&claimed).map_err(|_| RazorpayApiError::InvalidSignature)
}
