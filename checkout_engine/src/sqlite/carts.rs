use log::trace;
use sqlx::SqliteConnection;

use crate::{sqlite::SqliteDatabaseError, traits::CartEntry};

/// The buyer's cart mapping, in stable (key-sorted) order.
pub async fn fetch_cart(buyer_id: &str, conn: &mut SqliteConnection) -> Result<Vec<CartEntry>, SqliteDatabaseError> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT cart_key, quantity FROM carts WHERE buyer_id = $1 ORDER BY cart_key",
    )
    .bind(buyer_id)
    .fetch_all(conn)
    .await?;
    Ok(rows.into_iter().map(|(key, quantity)| CartEntry { key, quantity }).collect())
}

pub async fn clear_cart(buyer_id: &str, conn: &mut SqliteConnection) -> Result<(), SqliteDatabaseError> {
    let res = sqlx::query("DELETE FROM carts WHERE buyer_id = $1").bind(buyer_id).execute(conn).await?;
    trace!("🗃️ Cleared {} cart entries for buyer {buyer_id}", res.rows_affected());
    Ok(())
}
