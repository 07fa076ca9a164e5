use std::sync::Arc;

use checkout_common::INR_CURRENCY_CODE;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{config::RazorpayConfig, RazorpayApiError, RazorpayOrder, RazorpayPayment};

/// A client for the Razorpay Orders and Payments REST endpoints, authenticated with HTTP basic
/// auth over the configured key pair.
#[derive(Clone)]
pub struct RazorpayApi {
    config: RazorpayConfig,
    client: Arc<Client>,
}

impl RazorpayApi {
    pub fn new(config: RazorpayConfig) -> Result<Self, RazorpayApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let credentials = base64::encode(format!("{}:{}", config.key_id, config.key_secret.reveal()));
        let val = HeaderValue::from_str(&format!("Basic {credentials}"))
            .map_err(|e| RazorpayApiError::Initialization(e.to_string()))?;
        headers.insert("Authorization", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RazorpayApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn key_id(&self) -> &str {
        &self.config.key_id
    }

    pub fn key_secret(&self) -> &str {
        self.config.key_secret.reveal()
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, RazorpayApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| RazorpayApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| RazorpayApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| RazorpayApiError::RestResponseError(e.to_string()))?;
            Err(RazorpayApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }

    /// Creates a gateway order for `amount` paise, with auto-capture enabled and the local order
    /// id as the receipt reference.
    pub async fn create_order(&self, amount: i64, receipt: &str) -> Result<RazorpayOrder, RazorpayApiError> {
        let body = serde_json::json!({
            "amount": amount,
            "currency": INR_CURRENCY_CODE,
            "receipt": receipt,
            "payment_capture": 1,
        });
        debug!("Creating gateway order for {amount} paise (receipt {receipt})");
        let order = self.rest_query::<RazorpayOrder, Value>(Method::POST, "/orders", Some(body)).await?;
        info!("Created gateway order {}", order.id);
        Ok(order)
    }

    pub async fn fetch_order(&self, order_id: &str) -> Result<RazorpayOrder, RazorpayApiError> {
        let path = format!("/orders/{order_id}");
        debug!("Fetching gateway order {order_id}");
        self.rest_query::<RazorpayOrder, ()>(Method::GET, &path, None).await
    }

    /// Fetches a payment, returning both the typed object and the raw JSON payload for auditing.
    pub async fn fetch_payment(&self, payment_id: &str) -> Result<(RazorpayPayment, Value), RazorpayApiError> {
        let path = format!("/payments/{payment_id}");
        debug!("Fetching gateway payment {payment_id}");
        let raw = self.rest_query::<Value, ()>(Method::GET, &path, None).await?;
        let payment =
            serde_json::from_value(raw.clone()).map_err(|e| RazorpayApiError::JsonError(e.to_string()))?;
        Ok((payment, raw))
    }
}
