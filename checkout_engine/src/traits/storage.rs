use thiserror::Error;

use crate::db_types::{FulfillmentStatus, NewOrder, Order, OrderId, PaymentRecord, Product};

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),
    #[error("Order {0} is already paid")]
    AlreadyPaid(OrderId),
    /// The conditional stock decrement at commit time found fewer units than the order needs.
    #[error("{product} ({variant}) is out of stock")]
    InsufficientStock { product: String, variant: String },
    #[error("{product} is out of stock")]
    OutOfStock { product: String },
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Order ledger operations. The ledger owns the order record, its `paid` flag and its
/// fulfillment status.
#[allow(async_fn_in_trait)]
pub trait OrderManagement: Clone {
    /// Persist a new order in a single atomic transaction.
    ///
    /// The transaction re-applies the stock checks as conditional writes: variant stock is
    /// decremented with `stock >= quantity` as a guard, and the in-stock flag of plain products
    /// is re-read. If any line loses that race the entire insert rolls back with
    /// [`StorageError::InsufficientStock`] or [`StorageError::OutOfStock`].
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StorageError>;

    async fn fetch_order_by_id(&self, id: &OrderId) -> Result<Option<Order>, StorageError>;

    /// The buyer's orders: COD orders and paid online orders, newest first.
    async fn fetch_orders_for_buyer(&self, buyer_id: &str) -> Result<Vec<Order>, StorageError>;

    /// All orders visible to sellers: COD orders and paid online orders, newest first.
    async fn fetch_all_orders(&self) -> Result<Vec<Order>, StorageError>;

    /// Flip `paid` from false to true and store the payment metadata, as one conditional update
    /// keyed on `paid = false`. A second confirmation, even a concurrent one, fails with
    /// [`StorageError::AlreadyPaid`].
    async fn mark_order_paid(&self, id: &OrderId, payment: PaymentRecord) -> Result<Order, StorageError>;

    /// Overwrite the fulfillment status. Transition legality is checked by the caller.
    async fn update_order_status(&self, id: &OrderId, status: FulfillmentStatus) -> Result<Order, StorageError>;
}

/// Read access to the product catalog. The catalog is owned elsewhere; this core never writes it
/// outside the stock decrement that accompanies an order insert.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement: Clone {
    async fn fetch_product(&self, product_id: &str) -> Result<Option<Product>, StorageError>;
}

/// One entry of a buyer's cart mapping: a composite cart key and a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    pub key: String,
    pub quantity: i64,
}

/// Access to the buyer's server-side cart. The cart is authoritative for quantities; this core
/// reads it and clears it exactly once per successful placement or payment confirmation.
#[allow(async_fn_in_trait)]
pub trait CartManagement: Clone {
    async fn fetch_cart(&self, buyer_id: &str) -> Result<Vec<CartEntry>, StorageError>;

    async fn clear_cart(&self, buyer_id: &str) -> Result<(), StorageError>;
}

/// Ownership checks against the address book.
#[allow(async_fn_in_trait)]
pub trait AddressBook: Clone {
    async fn address_belongs_to(&self, address_id: &str, buyer_id: &str) -> Result<bool, StorageError>;
}

/// The full set of storage capabilities a checkout backend must provide.
#[allow(async_fn_in_trait)]
pub trait CheckoutDatabase: Clone + OrderManagement + CatalogManagement + CartManagement + AddressBook {
    /// The URL of the database
    fn url(&self) -> &str;
}
