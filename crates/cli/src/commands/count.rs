//! Badge count subcommand.

use super::CliService;

/// Show aggregate counts: cart units (sum of quantities) and wishlist
/// entries.
pub fn run(service: &CliService) {
    let counts = service.counts();
    tracing::info!(
        cart_units = counts.cart_units,
        wishlist_entries = counts.wishlist_entries,
        "badge counts"
    );
}
