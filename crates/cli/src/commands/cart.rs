//! Cart subcommands.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of a product (snapshot supplied on the command line)
//! pomelo cart add --id p1 --name "Pomelo" --price 3.50 --stock 12 --qty 2
//!
//! # Adjust a line by a signed delta; dropping to zero removes the line
//! pomelo cart set-qty --id p1 --delta -2
//!
//! # Remove a line, show the cart
//! pomelo cart remove --id p1
//! pomelo cart list
//! ```

use pomelo_cart::QuantityChange;
use pomelo_core::{ProductId, ProductSnapshot};

use super::{CliService, CommandError};

/// Add a product to the cart.
pub async fn add(
    service: &CliService,
    product: &ProductSnapshot,
    quantity: u32,
) -> Result<(), CommandError> {
    let total = service.add_to_cart(product, quantity).await?;
    tracing::info!(product = %product.id, quantity = total, "added to cart");
    Ok(())
}

/// Remove a product from the cart. Absent ids are a no-op.
pub fn remove(service: &CliService, id: &str) -> Result<(), CommandError> {
    service.remove_from_cart(&ProductId::new(id))?;
    tracing::info!(product = id, "removed from cart");
    Ok(())
}

/// Adjust a cart line's quantity by a signed delta.
pub fn set_qty(service: &CliService, id: &str, delta: i64) -> Result<(), CommandError> {
    match service.update_quantity(&ProductId::new(id), delta)? {
        None => tracing::warn!(product = id, "not in cart"),
        Some(QuantityChange::Set(quantity)) => {
            tracing::info!(product = id, quantity, "quantity updated");
        }
        Some(QuantityChange::Removed) => {
            tracing::info!(product = id, "quantity dropped to zero, line removed");
        }
    }
    Ok(())
}

/// Show the cart, one line per product.
pub fn list(service: &CliService) {
    let lines = service.cart();
    if lines.is_empty() {
        tracing::info!("cart is empty");
        return;
    }
    for line in &lines {
        tracing::info!(
            product = %line.id,
            name = %line.name,
            quantity = line.quantity,
            unit = %line.price,
            total = %format!("{:.2}", line.line_total()),
            stock = line.stock_quantity,
            "cart line"
        );
    }
}
