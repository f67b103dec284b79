//! Wishlist subcommands.
//!
//! # Usage
//!
//! ```bash
//! pomelo wishlist add --id p1 --name "Pomelo" --price 3.50 --stock 12
//! pomelo wishlist remove --id p1
//! pomelo wishlist list
//! ```

use pomelo_cart::WishlistAdd;
use pomelo_core::{ProductId, ProductSnapshot};

use super::{CliService, CommandError};

/// Add a product to the wishlist. Re-adding is a reported no-op.
pub async fn add(service: &CliService, product: &ProductSnapshot) -> Result<(), CommandError> {
    match service.add_to_wishlist(product).await? {
        WishlistAdd::Added => tracing::info!(product = %product.id, "added to wishlist"),
        WishlistAdd::AlreadyPresent => {
            tracing::info!(product = %product.id, "already in wishlist");
        }
    }
    Ok(())
}

/// Remove a product from the wishlist. Absent ids are a no-op.
pub fn remove(service: &CliService, id: &str) -> Result<(), CommandError> {
    service.remove_from_wishlist(&ProductId::new(id))?;
    tracing::info!(product = id, "removed from wishlist");
    Ok(())
}

/// Show the wishlist, one line per product.
pub fn list(service: &CliService) {
    let entries = service.wishlist();
    if entries.is_empty() {
        tracing::info!("wishlist is empty");
        return;
    }
    for entry in &entries {
        tracing::info!(
            product = %entry.id,
            name = %entry.name,
            unit = %entry.price,
            "wishlist entry"
        );
    }
}
