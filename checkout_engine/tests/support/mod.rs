#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use checkout_common::Rupees;
use checkout_engine::{
    db_types::{Order, OrderId, PaymentClaim, PaymentRecord},
    sqlite::{create_database, run_migrations},
    traits::{GatewayError, GatewayIntent, PaymentGateway},
    SqliteCheckoutDb,
};
use hmac::{Hmac, Mac};
use log::*;
use serde_json::json;
use sha2::Sha256;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const TEST_GATEWAY_SECRET: &str = "test_webhook_secret";

/// Creates a fresh, migrated database in a temporary directory. Keep the returned guard alive for
/// the duration of the test; the database file is deleted when it drops.
pub async fn prepare_test_db() -> (SqliteCheckoutDb, TempDir) {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let dir = tempfile::tempdir().expect("Error creating temp dir");
    let url = format!("sqlite://{}/checkout_test.db", dir.path().display());
    create_database(&url).await.expect("Error creating database");
    let db = SqliteCheckoutDb::new_with_url(&url, 5).await.expect("Error connecting to database");
    run_migrations(db.pool()).await.expect("Error running migrations");
    debug!("🚀️ Test database ready at {url}");
    (db, dir)
}

pub async fn seed_product(pool: &SqlitePool, id: &str, name: &str, offer_price: i64, in_stock: bool) {
    sqlx::query("INSERT INTO products (id, name, offer_price, in_stock) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(name)
        .bind(offer_price)
        .bind(in_stock)
        .execute(pool)
        .await
        .expect("Error seeding product");
}

pub async fn seed_variant(pool: &SqlitePool, product_id: &str, weight: &str, offer_price: i64, stock: i64) {
    sqlx::query("INSERT INTO product_variants (product_id, weight, offer_price, stock) VALUES ($1, $2, $3, $4)")
        .bind(product_id)
        .bind(weight)
        .bind(offer_price)
        .bind(stock)
        .execute(pool)
        .await
        .expect("Error seeding variant");
}

pub async fn seed_address(pool: &SqlitePool, id: &str, buyer_id: &str) {
    sqlx::query("INSERT INTO addresses (id, buyer_id) VALUES ($1, $2)")
        .bind(id)
        .bind(buyer_id)
        .execute(pool)
        .await
        .expect("Error seeding address");
}

pub async fn set_cart_item(pool: &SqlitePool, buyer_id: &str, cart_key: &str, quantity: i64) {
    sqlx::query("INSERT OR REPLACE INTO carts (buyer_id, cart_key, quantity) VALUES ($1, $2, $3)")
        .bind(buyer_id)
        .bind(cart_key)
        .bind(quantity)
        .execute(pool)
        .await
        .expect("Error seeding cart item");
}

pub async fn variant_stock(pool: &SqlitePool, product_id: &str, weight: &str) -> i64 {
    sqlx::query_scalar("SELECT stock FROM product_variants WHERE product_id = $1 AND weight = $2")
        .bind(product_id)
        .bind(weight)
        .fetch_one(pool)
        .await
        .expect("Error reading variant stock")
}

/// Signs the canonical `{gateway_order_id}|{gateway_payment_id}` message with the test secret,
/// matching the signature scheme of the real gateway.
pub fn sign(gateway_order_id: &str, payment_id: &str) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(TEST_GATEWAY_SECRET.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{gateway_order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// An in-memory gateway double. It records the paise amount of every intent it creates and
/// verifies callbacks the way the real gateway does: signature first, then its own recorded
/// amount, then payment status.
#[derive(Clone)]
pub struct TestGateway {
    next_id: Arc<AtomicU64>,
    amounts: Arc<Mutex<HashMap<String, i64>>>,
    payment_status: Arc<Mutex<String>>,
}

impl Default for TestGateway {
    fn default() -> Self {
        Self {
            next_id: Arc::new(AtomicU64::new(1)),
            amounts: Arc::new(Mutex::new(HashMap::new())),
            payment_status: Arc::new(Mutex::new("captured".to_string())),
        }
    }
}

impl TestGateway {
    pub fn set_recorded_amount(&self, gateway_order_id: &str, paise: i64) {
        self.amounts.lock().unwrap().insert(gateway_order_id.to_string(), paise);
    }

    pub fn set_payment_status(&self, status: &str) {
        *self.payment_status.lock().unwrap() = status.to_string();
    }

    pub fn valid_claim(&self, order: &Order, payment_id: &str) -> PaymentClaim {
        let gateway_order_id = order.gateway_order_id.clone().expect("Order has no gateway reference");
        let signature = sign(&gateway_order_id, payment_id);
        PaymentClaim {
            order_id: order.id.clone(),
            gateway_order_id,
            gateway_payment_id: payment_id.to_string(),
            signature,
        }
    }
}

impl PaymentGateway for TestGateway {
    async fn create_intent(&self, order_id: &OrderId, amount: Rupees) -> Result<GatewayIntent, GatewayError> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let gateway_order_id = format!("order_TEST{n:04}");
        let paise = amount.to_paise();
        self.amounts.lock().unwrap().insert(gateway_order_id.clone(), paise);
        let session = json!({
            "id": gateway_order_id,
            "amount": paise,
            "currency": "INR",
            "receipt": order_id.as_str(),
        });
        Ok(GatewayIntent { gateway_order_id, key_id: "rzp_test_key".to_string(), session })
    }

    async fn verify_callback(&self, order: &Order, claim: &PaymentClaim) -> Result<PaymentRecord, GatewayError> {
        if claim.signature != sign(&claim.gateway_order_id, &claim.gateway_payment_id) {
            return Err(GatewayError::InvalidSignature);
        }
        let recorded = self
            .amounts
            .lock()
            .unwrap()
            .get(&claim.gateway_order_id)
            .copied()
            .ok_or_else(|| GatewayError::ApiError(format!("Unknown gateway order {}", claim.gateway_order_id)))?;
        let expected = order.amount.to_paise();
        if recorded != expected {
            return Err(GatewayError::AmountMismatch { expected, actual: recorded });
        }
        let status = self.payment_status.lock().unwrap().clone();
        if status != "captured" && status != "authorized" {
            return Err(GatewayError::NotCaptured(status));
        }
        Ok(PaymentRecord {
            gateway_order_id: claim.gateway_order_id.clone(),
            gateway_payment_id: claim.gateway_payment_id.clone(),
            signature: claim.signature.clone(),
            raw: json!({"id": claim.gateway_payment_id, "order_id": claim.gateway_order_id, "status": status}),
        })
    }
}
