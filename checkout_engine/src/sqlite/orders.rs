use checkout_common::Rupees;
use chrono::{DateTime, Utc};
use log::trace;
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db_types::{FulfillmentStatus, LineItem, NewOrder, Order, OrderId, PaymentRecord, PaymentType},
    sqlite::SqliteDatabaseError,
};

const ORDER_COLUMNS: &str =
    "id, buyer_id, items, amount, address_id, payment_type, paid, gateway_order_id, payment, status, created_at, \
     updated_at";

/// The raw orders row. Line items and payment metadata are JSON columns; they are decoded when
/// converting into [`Order`].
#[derive(Debug, FromRow)]
struct OrderRow {
    id: String,
    buyer_id: String,
    items: String,
    amount: i64,
    address_id: String,
    payment_type: String,
    paid: bool,
    gateway_order_id: Option<String>,
    payment: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = SqliteDatabaseError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items: Vec<LineItem> = serde_json::from_str(&row.items)?;
        let payment = row.payment.as_deref().map(serde_json::from_str).transpose()?;
        let status = row
            .status
            .parse::<FulfillmentStatus>()
            .map_err(|e| SqliteDatabaseError::ConversionError(e.to_string()))?;
        Ok(Order {
            id: OrderId(row.id),
            buyer_id: row.buyer_id,
            items,
            amount: Rupees::from(row.amount),
            address_id: row.address_id,
            payment_type: PaymentType::from(row.payment_type),
            paid: row.paid,
            gateway_order_id: row.gateway_order_id,
            payment,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Inserts a new order using the given connection. This is not atomic on its own; embed the call
/// in a transaction together with the stock decrements and pass `&mut *tx` as the connection.
pub async fn insert_order(order: &NewOrder, conn: &mut SqliteConnection) -> Result<(), SqliteDatabaseError> {
    let items = serde_json::to_string(&order.items)?;
    sqlx::query(
        "INSERT INTO orders (id, buyer_id, items, amount, address_id, payment_type, gateway_order_id) VALUES ($1, \
         $2, $3, $4, $5, $6, $7)",
    )
    .bind(order.order_id.as_str())
    .bind(&order.buyer_id)
    .bind(items)
    .bind(order.amount.value())
    .bind(&order.address_id)
    .bind(order.payment_type.to_string())
    .bind(&order.gateway_order_id)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn fetch_order_by_id(
    id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, SqliteDatabaseError> {
    let row = sqlx::query_as::<_, OrderRow>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
        .bind(id.as_str())
        .fetch_optional(conn)
        .await?;
    row.map(Order::try_from).transpose()
}

/// A buyer sees their COD orders and their paid online orders, newest first. Unpaid online orders
/// are pending gateway confirmation and stay hidden.
pub async fn fetch_orders_for_buyer(
    buyer_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, SqliteDatabaseError> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE buyer_id = $1 AND (payment_type = 'COD' OR paid = 1) ORDER BY \
         created_at DESC"
    ))
    .bind(buyer_id)
    .fetch_all(conn)
    .await?;
    trace!("🗃️ fetch_orders_for_buyer returned {} rows", rows.len());
    rows.into_iter().map(Order::try_from).collect()
}

pub async fn fetch_all_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, SqliteDatabaseError> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE payment_type = 'COD' OR paid = 1 ORDER BY created_at DESC"
    ))
    .fetch_all(conn)
    .await?;
    rows.into_iter().map(Order::try_from).collect()
}

/// The paid-state commit. A single conditional update keyed on `paid = 0`, so that of two racing
/// confirmations exactly one wins; the loser sees [`SqliteDatabaseError::AlreadyPaid`].
pub async fn mark_order_paid(
    id: &OrderId,
    payment: &PaymentRecord,
    conn: &mut SqliteConnection,
) -> Result<(), SqliteDatabaseError> {
    let payment_json = serde_json::to_string(payment)?;
    let res = sqlx::query(
        "UPDATE orders SET paid = 1, payment = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 AND paid = 0",
    )
    .bind(payment_json)
    .bind(id.as_str())
    .execute(&mut *conn)
    .await?;
    if res.rows_affected() == 0 {
        return match fetch_order_by_id(id, conn).await? {
            Some(_) => Err(SqliteDatabaseError::AlreadyPaid(id.clone())),
            None => Err(SqliteDatabaseError::OrderNotFound(id.clone())),
        };
    }
    Ok(())
}

pub async fn update_order_status(
    id: &OrderId,
    status: FulfillmentStatus,
    conn: &mut SqliteConnection,
) -> Result<(), SqliteDatabaseError> {
    let res = sqlx::query("UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2")
        .bind(status.to_string())
        .bind(id.as_str())
        .execute(conn)
        .await?;
    if res.rows_affected() == 0 {
        return Err(SqliteDatabaseError::OrderNotFound(id.clone()));
    }
    Ok(())
}
