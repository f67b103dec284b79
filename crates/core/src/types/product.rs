//! Catalog product snapshot.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// A point-in-time snapshot of a catalog product.
///
/// The cart engine never fetches catalog data itself; callers pass in a
/// snapshot sourced from whatever backend owns the catalog. The price,
/// image, and stock values are captured here as of the moment the caller
/// fetched them and are not live-updated afterwards. In particular
/// `stock_quantity` is only a client-side upper bound for quantity
/// validation; the catalog remains the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Opaque catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price as of the snapshot.
    pub price: Price,
    /// Display image URL, if the catalog has one.
    pub image: Option<String>,
    /// Available stock as of the snapshot.
    pub stock_quantity: u32,
}
