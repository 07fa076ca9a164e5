//! Small helpers for working with cart keys.
//!
//! The cart service stores a buyer's cart as a mapping from a composite key to a quantity. A key
//! is either a bare product id, or `"{product_id}-{variant}"` for a weight variant. Product ids
//! never contain `-`, so splitting on the first separator is unambiguous.

/// Decompose a composite cart key into its product id and optional variant selector.
///
/// A key without a separator (or with an empty selector) has no variant.
pub fn split_cart_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once('-') {
        Some((product_id, variant)) if !variant.is_empty() => (product_id, Some(variant)),
        Some((product_id, _)) => (product_id, None),
        None => (key, None),
    }
}

/// The inverse of [`split_cart_key`].
pub fn cart_key(product_id: &str, variant: Option<&str>) -> String {
    match variant {
        Some(v) => format!("{product_id}-{v}"),
        None => product_id.to_string(),
    }
}
