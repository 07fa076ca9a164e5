use log::{debug, error};
use sqlx::SqlitePool;

use crate::{
    db_types::{FulfillmentStatus, NewOrder, Order, OrderId, PaymentRecord, Product},
    sqlite::{addresses, carts, catalog, new_pool, orders, SqliteDatabaseError},
    traits::{AddressBook, CartEntry, CartManagement, CatalogManagement, CheckoutDatabase, OrderManagement, StorageError},
};

/// The Sqlite-backed checkout store. Cloning is cheap; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct SqliteCheckoutDb {
    url: String,
    pool: SqlitePool,
}

impl SqliteCheckoutDb {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn insert_order_inner(&self, order: &NewOrder) -> Result<Order, SqliteDatabaseError> {
        let mut tx = self.pool.begin().await?;
        for item in &order.items {
            match &item.variant {
                Some(weight) => {
                    let taken =
                        catalog::take_variant_stock(&item.product_id, weight, item.quantity, &mut tx).await?;
                    if !taken {
                        let product = catalog::product_availability(&item.product_id, &mut tx)
                            .await?
                            .map(|(name, _)| name)
                            .unwrap_or_else(|| item.product_id.clone());
                        tx.rollback().await?;
                        return Err(SqliteDatabaseError::InsufficientStock { product, variant: weight.clone() });
                    }
                },
                None => {
                    let availability = catalog::product_availability(&item.product_id, &mut tx).await?;
                    let (product, in_stock) = match availability {
                        Some(a) => a,
                        None => (item.product_id.clone(), false),
                    };
                    if !in_stock {
                        tx.rollback().await?;
                        return Err(SqliteDatabaseError::OutOfStock { product });
                    }
                },
            }
        }
        orders::insert_order(order, &mut tx).await?;
        let inserted = orders::fetch_order_by_id(&order.order_id, &mut tx)
            .await?
            .ok_or_else(|| SqliteDatabaseError::OrderNotFound(order.order_id.clone()))?;
        tx.commit().await?;
        debug!("🗃️ Order {} inserted for buyer {}", inserted.id, inserted.buyer_id);
        Ok(inserted)
    }

    async fn fetch_order_by_id_inner(&self, id: &OrderId) -> Result<Option<Order>, SqliteDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_by_id(id, &mut conn).await
    }

    async fn mark_order_paid_inner(&self, id: &OrderId, payment: &PaymentRecord) -> Result<Order, SqliteDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        orders::mark_order_paid(id, payment, &mut conn).await?;
        orders::fetch_order_by_id(id, &mut conn)
            .await?
            .ok_or_else(|| SqliteDatabaseError::OrderNotFound(id.clone()))
    }

    async fn update_order_status_inner(
        &self,
        id: &OrderId,
        status: FulfillmentStatus,
    ) -> Result<Order, SqliteDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        orders::update_order_status(id, status, &mut conn).await?;
        orders::fetch_order_by_id(id, &mut conn)
            .await?
            .ok_or_else(|| SqliteDatabaseError::OrderNotFound(id.clone()))
    }
}

impl OrderManagement for SqliteCheckoutDb {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StorageError> {
        self.insert_order_inner(&order).await.map_err(|e| {
            error!("Could not insert order {}. {e}", order.order_id);
            StorageError::from(e)
        })
    }

    async fn fetch_order_by_id(&self, id: &OrderId) -> Result<Option<Order>, StorageError> {
        self.fetch_order_by_id_inner(id).await.map_err(StorageError::from)
    }

    async fn fetch_orders_for_buyer(&self, buyer_id: &str) -> Result<Vec<Order>, StorageError> {
        let mut conn = self.pool.acquire().await.map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        orders::fetch_orders_for_buyer(buyer_id, &mut conn).await.map_err(StorageError::from)
    }

    async fn fetch_all_orders(&self) -> Result<Vec<Order>, StorageError> {
        let mut conn = self.pool.acquire().await.map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        orders::fetch_all_orders(&mut conn).await.map_err(StorageError::from)
    }

    async fn mark_order_paid(&self, id: &OrderId, payment: PaymentRecord) -> Result<Order, StorageError> {
        self.mark_order_paid_inner(id, &payment).await.map_err(StorageError::from)
    }

    async fn update_order_status(&self, id: &OrderId, status: FulfillmentStatus) -> Result<Order, StorageError> {
        self.update_order_status_inner(id, status).await.map_err(StorageError::from)
    }
}

impl CatalogManagement for SqliteCheckoutDb {
    async fn fetch_product(&self, product_id: &str) -> Result<Option<Product>, StorageError> {
        let mut conn = self.pool.acquire().await.map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        catalog::fetch_product(product_id, &mut conn).await.map_err(StorageError::from)
    }
}

impl CartManagement for SqliteCheckoutDb {
    async fn fetch_cart(&self, buyer_id: &str) -> Result<Vec<CartEntry>, StorageError> {
        let mut conn = self.pool.acquire().await.map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        carts::fetch_cart(buyer_id, &mut conn).await.map_err(StorageError::from)
    }

    async fn clear_cart(&self, buyer_id: &str) -> Result<(), StorageError> {
        let mut conn = self.pool.acquire().await.map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        carts::clear_cart(buyer_id, &mut conn).await.map_err(StorageError::from)
    }
}

impl AddressBook for SqliteCheckoutDb {
    async fn address_belongs_to(&self, address_id: &str, buyer_id: &str) -> Result<bool, StorageError> {
        let mut conn = self.pool.acquire().await.map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        addresses::address_belongs_to(address_id, buyer_id, &mut conn).await.map_err(StorageError::from)
    }
}

impl CheckoutDatabase for SqliteCheckoutDb {
    fn url(&self) -> &str {
        self.url.as_str()
    }
}
