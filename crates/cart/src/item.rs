//! Line-item types stored in the cart and wishlist lists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pomelo_core::{Price, ProductId, ProductSnapshot};

/// A single cart entry.
///
/// Price, image, and stock are snapshots taken from the product at the last
/// successful add/update; they are not live-updated from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog identifier, unique within the cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price snapshot.
    pub price: Price,
    /// Display image URL, if any.
    pub image: Option<String>,
    /// Units in the cart. Always at least 1; a line that would drop to 0
    /// is removed instead.
    pub quantity: u32,
    /// Stock snapshot used for the quantity upper bound.
    pub stock_quantity: u32,
}

impl CartLine {
    /// Create a line from a product snapshot with the given quantity.
    #[must_use]
    pub fn from_snapshot(product: &ProductSnapshot, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
            stock_quantity: product.stock_quantity,
        }
    }

    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.amount() * Decimal::from(self.quantity)
    }
}

/// A single wishlist entry. No quantity; a product is either wished for
/// or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    /// Catalog identifier, unique within the wishlist.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price snapshot.
    pub price: Price,
    /// Display image URL, if any.
    pub image: Option<String>,
}

impl From<&ProductSnapshot> for WishlistEntry {
    fn from(product: &ProductSnapshot) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}
