use checkout_common::Rupees;
use checkout_engine::{
    db_types::{Order, OrderId, PaymentClaim, PaymentRecord},
    traits::{GatewayError, GatewayIntent, PaymentGateway},
};
use log::*;
use razorpay_tools::{helpers::verify_payment_signature, RazorpayApi, RazorpayApiError, RazorpayConfig};

/// The engine's [`PaymentGateway`] implemented against the Razorpay REST API.
#[derive(Clone)]
pub struct RazorpayGateway {
    api: RazorpayApi,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Result<Self, RazorpayApiError> {
        let api = RazorpayApi::new(config)?;
        Ok(Self { api })
    }
}

fn gateway_error(e: RazorpayApiError) -> GatewayError {
    match e {
        RazorpayApiError::InvalidSignature => GatewayError::InvalidSignature,
        e => GatewayError::ApiError(e.to_string()),
    }
}

impl PaymentGateway for RazorpayGateway {
    async fn create_intent(&self, order_id: &OrderId, amount: Rupees) -> Result<GatewayIntent, GatewayError> {
        let gateway_order =
            self.api.create_order(amount.to_paise(), order_id.as_str()).await.map_err(gateway_error)?;
        let session = serde_json::to_value(&gateway_order)
            .map_err(|e| GatewayError::ApiError(format!("Could not serialize gateway order. {e}")))?;
        Ok(GatewayIntent {
            gateway_order_id: gateway_order.id,
            key_id: self.api.key_id().to_string(),
            session,
        })
    }

    /// Signature check first, then an independent re-fetch of the gateway order and payment. The
    /// claimed payload is never trusted for amount or status.
    async fn verify_callback(&self, order: &Order, claim: &PaymentClaim) -> Result<PaymentRecord, GatewayError> {
        verify_payment_signature(
            &claim.gateway_order_id,
            &claim.gateway_payment_id,
            &claim.signature,
            self.api.key_secret(),
        )
        .map_err(gateway_error)?;
        let gateway_order = self.api.fetch_order(&claim.gateway_order_id).await.map_err(gateway_error)?;
        let expected = order.amount.to_paise();
        if gateway_order.amount != expected {
            warn!(
                "💰️ Amount mismatch on order {}: local total {expected} paise, gateway recorded {} paise",
                order.id, gateway_order.amount
            );
            return Err(GatewayError::AmountMismatch { expected, actual: gateway_order.amount });
        }
        let (payment, raw) =
            self.api.fetch_payment(&claim.gateway_payment_id).await.map_err(gateway_error)?;
        if !payment.is_settled() {
            return Err(GatewayError::NotCaptured(payment.status));
        }
        Ok(PaymentRecord {
            gateway_order_id: claim.gateway_order_id.clone(),
            gateway_payment_id: claim.gateway_payment_id.clone(),
            signature: claim.signature.clone(),
            raw,
        })
    }
}
