use checkout_common::Rupees;
use checkout_engine::{
    db_types::{FulfillmentStatus, NewOrder, Order, OrderId, PaymentClaim, PaymentRecord, Product},
    traits::{
        AddressBook,
        CartEntry,
        CartManagement,
        CatalogManagement,
        CheckoutDatabase,
        GatewayError,
        GatewayIntent,
        OrderManagement,
        PaymentGateway,
        StorageError,
    },
};
use mockall::mock;

mock! {
    pub CheckoutManager {}
    impl OrderManagement for CheckoutManager {
        async fn insert_order(&self, order: NewOrder) -> Result<Order, StorageError>;
        async fn fetch_order_by_id(&self, id: &OrderId) -> Result<Option<Order>, StorageError>;
        async fn fetch_orders_for_buyer(&self, buyer_id: &str) -> Result<Vec<Order>, StorageError>;
        async fn fetch_all_orders(&self) -> Result<Vec<Order>, StorageError>;
        async fn mark_order_paid(&self, id: &OrderId, payment: PaymentRecord) -> Result<Order, StorageError>;
        async fn update_order_status(&self, id: &OrderId, status: FulfillmentStatus) -> Result<Order, StorageError>;
    }
    impl CatalogManagement for CheckoutManager {
        async fn fetch_product(&self, product_id: &str) -> Result<Option<Product>, StorageError>;
    }
    impl CartManagement for CheckoutManager {
        async fn fetch_cart(&self, buyer_id: &str) -> Result<Vec<CartEntry>, StorageError>;
        async fn clear_cart(&self, buyer_id: &str) -> Result<(), StorageError>;
    }
    impl AddressBook for CheckoutManager {
        async fn address_belongs_to(&self, address_id: &str, buyer_id: &str) -> Result<bool, StorageError>;
    }
    impl CheckoutDatabase for CheckoutManager {
        fn url(&self) -> &str;
    }
    impl Clone for CheckoutManager {
        fn clone(&self) -> Self;
    }
}

mock! {
    pub Gateway {}
    impl PaymentGateway for Gateway {
        async fn create_intent(&self, order_id: &OrderId, amount: Rupees) -> Result<GatewayIntent, GatewayError>;
        async fn verify_callback(&self, order: &Order, claim: &PaymentClaim) -> Result<PaymentRecord, GatewayError>;
    }
    impl Clone for Gateway {
        fn clone(&self) -> Self;
    }
}
