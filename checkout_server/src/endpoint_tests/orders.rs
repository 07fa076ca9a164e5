use actix_web::{http::StatusCode, web, web::ServiceConfig};
use checkout_common::Rupees;
use checkout_engine::{
    db_types::{PaymentType, Product},
    traits::CartEntry,
    OrderFlowApi,
};
use serde_json::json;

use super::{
    helpers::{get_request, issue_token, order_from, post_request, sample_order},
    mocks::{MockCheckoutManager, MockGateway},
};
use crate::{
    auth::Role,
    routes::{AllOrdersRoute, CodOrderRoute, MyOrdersRoute, UpdateStatusRoute},
};

fn atta() -> Product {
    Product {
        id: "atta".to_string(),
        name: "Whole Wheat Atta".to_string(),
        offer_price: Rupees::from(100),
        in_stock: true,
        variants: vec![],
    }
}

fn register(cfg: &mut ServiceConfig, db: MockCheckoutManager, gateway: MockGateway) {
    let api = OrderFlowApi::new(db, gateway);
    cfg.service(CodOrderRoute::<MockCheckoutManager, MockGateway>::new())
        .service(MyOrdersRoute::<MockCheckoutManager, MockGateway>::new())
        .service(AllOrdersRoute::<MockCheckoutManager, MockGateway>::new())
        .service(UpdateStatusRoute::<MockCheckoutManager, MockGateway>::new())
        .app_data(web::Data::new(api));
}

#[actix_web::test]
async fn cod_order_happy_path() {
    let _ = env_logger::try_init().ok();
    let token = issue_token("buyer-1", vec![Role::Buyer]);
    let (status, body) =
        post_request(&token, "/cod", json!({"address_id": "addr-1"}), configure_happy_cod).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#), "unexpected body: {body}");
    assert!(body.contains("Order placed"), "unexpected body: {body}");
    assert!(body.contains(r#""amount":204"#), "unexpected body: {body}");
}

fn configure_happy_cod(cfg: &mut ServiceConfig) {
    let mut db = MockCheckoutManager::new();
    db.expect_fetch_cart().returning(|_| Ok(vec![CartEntry { key: "atta".to_string(), quantity: 2 }]));
    db.expect_address_belongs_to().returning(|_, _| Ok(true));
    db.expect_fetch_product().returning(|_| Ok(Some(atta())));
    db.expect_insert_order().returning(|o| Ok(order_from(o)));
    db.expect_clear_cart().returning(|_| Ok(()));
    register(cfg, db, MockGateway::new());
}

#[actix_web::test]
async fn cod_order_requires_a_token() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request("", "/cod", json!({"address_id": "addr-1"}), configure_happy_cod).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains(r#""success":false"#), "unexpected body: {body}");
}

#[actix_web::test]
async fn cod_order_requires_the_buyer_role() {
    let _ = env_logger::try_init().ok();
    let token = issue_token("seller-1", vec![Role::Seller]);
    let (status, body) = post_request(&token, "/cod", json!({"address_id": "addr-1"}), configure_happy_cod).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("Buyer role required"), "unexpected body: {body}");
}

#[actix_web::test]
async fn an_empty_cart_is_a_bad_request() {
    let _ = env_logger::try_init().ok();
    let token = issue_token("buyer-1", vec![Role::Buyer]);
    let (status, body) = post_request(&token, "/cod", json!({"address_id": "addr-1"}), configure_empty_cart).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"success":false,"message":"Cart is empty"}"#);
}

fn configure_empty_cart(cfg: &mut ServiceConfig) {
    let mut db = MockCheckoutManager::new();
    db.expect_fetch_cart().returning(|_| Ok(vec![]));
    register(cfg, db, MockGateway::new());
}

#[actix_web::test]
async fn buyers_see_their_own_orders() {
    let _ = env_logger::try_init().ok();
    let token = issue_token("buyer-1", vec![Role::Buyer]);
    let (status, body) = get_request(&token, "/mine", configure_listings).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#), "unexpected body: {body}");
    assert!(body.contains(r#""buyer_id":"buyer-1""#), "unexpected body: {body}");
}

#[actix_web::test]
async fn the_all_orders_listing_is_seller_only() {
    let _ = env_logger::try_init().ok();
    let token = issue_token("buyer-1", vec![Role::Buyer]);
    let (status, _body) = get_request(&token, "/all", configure_listings).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let token = issue_token("seller-1", vec![Role::Seller]);
    let (status, body) = get_request(&token, "/all", configure_listings).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#), "unexpected body: {body}");
}

fn configure_listings(cfg: &mut ServiceConfig) {
    let mut db = MockCheckoutManager::new();
    db.expect_fetch_orders_for_buyer().returning(|buyer| Ok(vec![sample_order(buyer, PaymentType::Cod)]));
    db.expect_fetch_all_orders().returning(|| Ok(vec![sample_order("buyer-1", PaymentType::Cod)]));
    register(cfg, db, MockGateway::new());
}

#[actix_web::test]
async fn status_updates_respect_the_transition_table() {
    let _ = env_logger::try_init().ok();
    let token = issue_token("seller-1", vec![Role::Seller]);
    let order = sample_order("buyer-1", PaymentType::Cod);
    let body = json!({"order_id": order.id.as_str(), "status": "Packing"});
    let (status, response) = post_request(&token, "/status", body, configure_status_updates).await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.contains("Status updated"), "unexpected body: {response}");

    let body = json!({"order_id": order.id.as_str(), "status": "Refunded"});
    let (status, response) = post_request(&token, "/status", body, configure_status_updates).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response, r#"{"success":false,"message":"Order status cannot change from Placed to Refunded"}"#);
}

fn configure_status_updates(cfg: &mut ServiceConfig) {
    let mut db = MockCheckoutManager::new();
    db.expect_fetch_order_by_id().returning(|id| {
        let mut order = sample_order("buyer-1", PaymentType::Cod);
        order.id = id.clone();
        Ok(Some(order))
    });
    db.expect_update_order_status().returning(|id, status| {
        let mut order = sample_order("buyer-1", PaymentType::Cod);
        order.id = id.clone();
        order.status = status;
        Ok(order)
    });
    register(cfg, db, MockGateway::new());
}

#[actix_web::test]
async fn backend_failures_are_server_errors() {
    let _ = env_logger::try_init().ok();
    let token = issue_token("buyer-1", vec![Role::Buyer]);
    let (status, body) = get_request(&token, "/mine", configure_backend_failure).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains(r#""success":false"#), "unexpected body: {body}");
}

fn configure_backend_failure(cfg: &mut ServiceConfig) {
    use checkout_engine::traits::StorageError;
    let mut db = MockCheckoutManager::new();
    db.expect_fetch_orders_for_buyer()
        .returning(|_| Err(StorageError::DatabaseError("connection lost".to_string())));
    register(cfg, db, MockGateway::new());
}

#[actix_web::test]
async fn unknown_statuses_are_rejected_at_the_boundary() {
    let _ = env_logger::try_init().ok();
    let token = issue_token("seller-1", vec![Role::Seller]);
    let body = json!({"order_id": "some-order", "status": "Teleported"});
    let (status, _body) = post_request(&token, "/status", body, configure_status_updates).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
