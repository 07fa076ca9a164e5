use sqlx::SqliteConnection;

use crate::sqlite::SqliteDatabaseError;

pub async fn address_belongs_to(
    address_id: &str,
    buyer_id: &str,
    conn: &mut SqliteConnection,
) -> Result<bool, SqliteDatabaseError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM addresses WHERE id = $1 AND buyer_id = $2")
            .bind(address_id)
            .bind(buyer_id)
            .fetch_one(conn)
            .await?;
    Ok(count > 0)
}
