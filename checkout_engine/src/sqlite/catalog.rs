use checkout_common::Rupees;
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db_types::{Product, WeightVariant},
    sqlite::SqliteDatabaseError,
};

#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name: String,
    offer_price: i64,
    in_stock: bool,
}

#[derive(Debug, FromRow)]
struct VariantRow {
    weight: String,
    offer_price: i64,
    stock: i64,
}

pub async fn fetch_product(
    product_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Product>, SqliteDatabaseError> {
    let row = sqlx::query_as::<_, ProductRow>("SELECT id, name, offer_price, in_stock FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    let variants = sqlx::query_as::<_, VariantRow>(
        "SELECT weight, offer_price, stock FROM product_variants WHERE product_id = $1 ORDER BY weight",
    )
    .bind(product_id)
    .fetch_all(conn)
    .await?
    .into_iter()
    .map(|v| WeightVariant { weight: v.weight, offer_price: Rupees::from(v.offer_price), stock: v.stock })
    .collect();
    Ok(Some(Product {
        id: row.id,
        name: row.name,
        offer_price: Rupees::from(row.offer_price),
        in_stock: row.in_stock,
        variants,
    }))
}

/// Conditionally takes `quantity` units off a variant's stock. Returns false if the guard
/// `stock >= quantity` does not hold (or the variant no longer exists), in which case the caller
/// must roll the surrounding transaction back.
pub async fn take_variant_stock(
    product_id: &str,
    weight: &str,
    quantity: i64,
    conn: &mut SqliteConnection,
) -> Result<bool, SqliteDatabaseError> {
    let res = sqlx::query(
        "UPDATE product_variants SET stock = stock - $1 WHERE product_id = $2 AND weight = $3 AND stock >= $1",
    )
    .bind(quantity)
    .bind(product_id)
    .bind(weight)
    .execute(conn)
    .await?;
    Ok(res.rows_affected() > 0)
}

/// The product's display name and in-stock flag, if it exists.
pub async fn product_availability(
    product_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<(String, bool)>, SqliteDatabaseError> {
    let row = sqlx::query_as::<_, (String, bool)>("SELECT name, in_stock FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}
