use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use checkout_common::{Rupees, Secret};
use checkout_engine::db_types::{FulfillmentStatus, LineItem, NewOrder, Order, PaymentType};
use chrono::{TimeZone, Utc};

use crate::{
    auth::{Role, TokenIssuer, TokenVerifier},
    config::AuthConfig,
};

// Test-only signing config. DO NOT re-use this secret anywhere.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: Secret::new("endpoint-test-secret-do-not-reuse".to_string()) }
}

pub fn issue_token(sub: &str, roles: Vec<Role>) -> String {
    TokenIssuer::new(&test_auth_config()).issue_token(sub.to_string(), roles).expect("Failed to sign token")
}

pub async fn get_request(token: &str, path: &str, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let mut req = TestRequest::get().uri(path);
    if !token.is_empty() {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    call(req, configure).await
}

pub async fn post_request(
    token: &str,
    path: &str,
    body: serde_json::Value,
    configure: fn(&mut ServiceConfig),
) -> (StatusCode, String) {
    let mut req = TestRequest::post().uri(path).set_json(body);
    if !token.is_empty() {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    call(req, configure).await
}

async fn call(req: TestRequest, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let verifier = TokenVerifier::new(&test_auth_config());
    let app = App::new().app_data(web::Data::new(verifier)).configure(configure);
    let service = test::init_service(app).await;
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_parts().1.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

/// The order a mocked `insert_order` would hand back, with fixed timestamps so bodies are
/// predictable.
pub fn order_from(new_order: NewOrder) -> Order {
    let ts = Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap();
    Order {
        id: new_order.order_id,
        buyer_id: new_order.buyer_id,
        items: new_order.items,
        amount: new_order.amount,
        address_id: new_order.address_id,
        payment_type: new_order.payment_type,
        paid: false,
        gateway_order_id: new_order.gateway_order_id,
        payment: None,
        status: FulfillmentStatus::Placed,
        created_at: ts,
        updated_at: ts,
    }
}

pub fn sample_order(buyer_id: &str, payment_type: PaymentType) -> Order {
    let items = vec![LineItem {
        product_id: "atta".to_string(),
        quantity: 2,
        variant: None,
        unit_price: Rupees::from(100),
    }];
    let new_order =
        NewOrder::new(buyer_id.to_string(), items, Rupees::from(204), "addr-1".to_string(), payment_type);
    order_from(new_order)
}
