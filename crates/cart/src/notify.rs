//! Change notifications for badge rendering.
//!
//! Every successful persisted mutation fires one event carrying the new
//! list snapshot. Delivery is synchronous and in subscription order; there
//! is no queue and no backpressure. Subscribers must not mutate the same
//! service from inside a callback - the write that triggered the event has
//! completed, but re-entrant writes would interleave with the remaining
//! deliveries in unspecified order.

use crate::item::{CartLine, WishlistEntry};

/// A list-changed event with the new snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// The cart list was persisted; payload is the full new cart.
    CartChanged(Vec<CartLine>),
    /// The wishlist was persisted; payload is the full new wishlist.
    WishlistChanged(Vec<WishlistEntry>),
}

/// A registered change listener.
pub(crate) type Subscriber = Box<dyn Fn(&ListEvent) + Send>;
