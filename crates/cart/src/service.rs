//! The cart/wishlist engine.
//!
//! [`CartService`] is an explicit service object constructed once per
//! process with its dependencies injected: a [`KeyValueStore`] for
//! persistence, a [`SessionProvider`] for the auth gate, and a subscriber
//! list for change notifications. Operations follow a strict
//! validate-then-write sequence; a rejected operation performs no write, so
//! there is never anything to roll back.
//!
//! Within one process, operations on the same service are ordered by call
//! order - the store is touched synchronously, with session resolution as
//! the only await point. Across processes sharing a [`FileStore`]
//! directory, writes are last-writer-wins with no coordination.
//!
//! [`FileStore`]: crate::store::FileStore

use tracing::instrument;

use pomelo_core::{ProductId, ProductSnapshot};

use crate::error::CartError;
use crate::item::{CartLine, WishlistEntry};
use crate::notify::{ListEvent, Subscriber};
use crate::session::{SessionInfo, SessionProvider};
use crate::store::{self, KeyValueStore, keys};

/// Outcome of [`CartService::add_to_wishlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistAdd {
    /// The product was appended to the wishlist.
    Added,
    /// The product was already wished for; nothing was persisted.
    AlreadyPresent,
}

/// Outcome of [`CartService::update_quantity`] for a present line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line's quantity is now this value.
    Set(u32),
    /// The quantity dropped to zero or below and the line was removed.
    Removed,
}

/// Aggregate badge counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    /// Sum of quantities across all cart lines (units, not lines).
    pub cart_units: u64,
    /// Number of wishlist entries.
    pub wishlist_entries: usize,
}

/// Stock-aware, session-gated cart and wishlist over a local store.
pub struct CartService<S, G> {
    store: S,
    sessions: G,
    subscribers: Vec<Subscriber>,
}

impl<S: KeyValueStore, G: SessionProvider> CartService<S, G> {
    /// Create a service over the given store and session provider.
    pub const fn new(store: S, sessions: G) -> Self {
        Self {
            store,
            sessions,
            subscribers: Vec::new(),
        }
    }

    /// Register a change listener.
    ///
    /// Listeners run synchronously after every persisted write, in
    /// subscription order, and receive the new list snapshot. They must
    /// not mutate this service from inside the callback.
    pub fn subscribe(&mut self, listener: impl Fn(&ListEvent) + Send + 'static) {
        self.subscribers.push(Box::new(listener));
    }

    /// Direct access to the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Add `quantity` units of a product to the cart (minimum 1).
    ///
    /// Merges into an existing line for the same product id, refreshing its
    /// stock snapshot. Returns the line's resulting quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotAuthenticated`] with no current session; the
    ///   stored list is untouched.
    /// - [`CartError::StockExceeded`] if the merged quantity would exceed
    ///   the product's stock snapshot; the stored list is untouched.
    /// - [`CartError::Store`] if persisting the updated list fails.
    #[instrument(skip(self, product), fields(product = %product.id))]
    pub async fn add_to_cart(
        &self,
        product: &ProductSnapshot,
        quantity: u32,
    ) -> Result<u32, CartError> {
        self.require_session().await?;
        let quantity = quantity.max(1);

        let mut lines: Vec<CartLine> = store::read_list(&self.store, keys::CART);
        let current = lines
            .iter()
            .find(|line| line.id == product.id)
            .map_or(0, |line| line.quantity);

        let requested = u64::from(current) + u64::from(quantity);
        if requested > u64::from(product.stock_quantity) {
            return Err(CartError::StockExceeded {
                available: product.stock_quantity.saturating_sub(current),
            });
        }

        // requested <= stock_quantity (a u32), so this cannot overflow
        let new_quantity = current + quantity;
        match lines.iter_mut().find(|line| line.id == product.id) {
            Some(line) => {
                line.quantity = new_quantity;
                line.stock_quantity = product.stock_quantity;
            }
            None => lines.push(CartLine::from_snapshot(product, new_quantity)),
        }

        self.persist_cart(lines)?;
        tracing::debug!(quantity = new_quantity, "cart line updated");
        Ok(new_quantity)
    }

    /// Add a product to the wishlist.
    ///
    /// Idempotent: a product already wished for is reported as
    /// [`WishlistAdd::AlreadyPresent`] and nothing is persisted or
    /// notified.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotAuthenticated`] with no current session.
    /// - [`CartError::Store`] if persisting the updated list fails.
    #[instrument(skip(self, product), fields(product = %product.id))]
    pub async fn add_to_wishlist(
        &self,
        product: &ProductSnapshot,
    ) -> Result<WishlistAdd, CartError> {
        self.require_session().await?;

        let mut entries: Vec<WishlistEntry> = store::read_list(&self.store, keys::WISHLIST);
        if entries.iter().any(|entry| entry.id == product.id) {
            return Ok(WishlistAdd::AlreadyPresent);
        }

        entries.push(WishlistEntry::from(product));
        self.persist_wishlist(entries)?;
        Ok(WishlistAdd::Added)
    }

    /// Remove a product from the cart.
    ///
    /// An absent id is a no-op, not an error; the list is persisted (and
    /// listeners notified) either way.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] if persisting fails.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&self, id: &ProductId) -> Result<(), CartError> {
        let mut lines: Vec<CartLine> = store::read_list(&self.store, keys::CART);
        lines.retain(|line| &line.id != id);
        self.persist_cart(lines)?;
        Ok(())
    }

    /// Remove a product from the wishlist.
    ///
    /// Same contract as [`Self::remove_from_cart`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] if persisting fails.
    #[instrument(skip(self))]
    pub fn remove_from_wishlist(&self, id: &ProductId) -> Result<(), CartError> {
        let mut entries: Vec<WishlistEntry> = store::read_list(&self.store, keys::WISHLIST);
        entries.retain(|entry| &entry.id != id);
        self.persist_wishlist(entries)?;
        Ok(())
    }

    /// Adjust a cart line's quantity by `delta`.
    ///
    /// Returns `Ok(None)` if no line has this id. A resulting quantity of
    /// zero or below removes the line entirely. Increments are held to the
    /// line's stock snapshot (not re-read from the catalog); decrements are
    /// always allowed.
    ///
    /// # Errors
    ///
    /// - [`CartError::StockExceeded`] for an increment beyond the stock
    ///   snapshot; the stored list is untouched.
    /// - [`CartError::Store`] if persisting fails.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &self,
        id: &ProductId,
        delta: i64,
    ) -> Result<Option<QuantityChange>, CartError> {
        let mut lines: Vec<CartLine> = store::read_list(&self.store, keys::CART);
        let Some((pos, line)) = lines
            .iter_mut()
            .enumerate()
            .find(|(_, line)| &line.id == id)
        else {
            return Ok(None);
        };

        let new_quantity = i64::from(line.quantity).saturating_add(delta);
        if delta > 0 && new_quantity > i64::from(line.stock_quantity) {
            return Err(CartError::StockExceeded {
                available: line.stock_quantity.saturating_sub(line.quantity),
            });
        }

        if new_quantity <= 0 {
            lines.remove(pos);
            self.persist_cart(lines)?;
            return Ok(Some(QuantityChange::Removed));
        }

        // Bounded above by the stock snapshot, so the cast is lossless
        line.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        let set = line.quantity;
        self.persist_cart(lines)?;
        Ok(Some(QuantityChange::Set(set)))
    }

    /// Current badge counts, recomputed from the stored lists.
    #[must_use]
    pub fn counts(&self) -> Counts {
        let cart: Vec<CartLine> = store::read_list(&self.store, keys::CART);
        let wishlist: Vec<WishlistEntry> = store::read_list(&self.store, keys::WISHLIST);
        Counts {
            cart_units: cart.iter().map(|line| u64::from(line.quantity)).sum(),
            wishlist_entries: wishlist.len(),
        }
    }

    /// Current cart snapshot, in insertion order.
    #[must_use]
    pub fn cart(&self) -> Vec<CartLine> {
        store::read_list(&self.store, keys::CART)
    }

    /// Current wishlist snapshot, in insertion order.
    #[must_use]
    pub fn wishlist(&self) -> Vec<WishlistEntry> {
        store::read_list(&self.store, keys::WISHLIST)
    }

    async fn require_session(&self) -> Result<SessionInfo, CartError> {
        self.sessions
            .current_session()
            .await
            .ok_or(CartError::NotAuthenticated)
    }

    fn persist_cart(&self, lines: Vec<CartLine>) -> Result<(), CartError> {
        store::write_list(&self.store, keys::CART, &lines)?;
        self.notify(&ListEvent::CartChanged(lines));
        Ok(())
    }

    fn persist_wishlist(&self, entries: Vec<WishlistEntry>) -> Result<(), CartError> {
        store::write_list(&self.store, keys::WISHLIST, &entries)?;
        self.notify(&ListEvent::WishlistChanged(entries));
        Ok(())
    }

    fn notify(&self, event: &ListEvent) {
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rust_decimal::Decimal;

    use pomelo_core::{CurrencyCode, Price, ProductId, UserId};

    use super::*;
    use crate::session::StaticSessionProvider;
    use crate::store::MemoryStore;

    fn product(id: &str, stock: u32) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::new(Decimal::new(999, 2), CurrencyCode::USD).unwrap(),
            image: Some("https://cdn.example/placeholder.png".to_owned()),
            stock_quantity: stock,
        }
    }

    fn logged_in_service() -> CartService<MemoryStore, StaticSessionProvider> {
        let session = SessionInfo {
            user_id: UserId::new("u1"),
            email: Some("u1@example.com".to_owned()),
        };
        CartService::new(MemoryStore::new(), StaticSessionProvider::logged_in(session))
    }

    #[tokio::test]
    async fn test_add_merges_duplicate_ids() {
        let service = logged_in_service();
        let p = product("p1", 10);

        assert_eq!(service.add_to_cart(&p, 2).await.unwrap(), 2);
        assert_eq!(service.add_to_cart(&p, 3).await.unwrap(), 5);

        let cart = service.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.first().unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn test_add_preserves_insertion_order() {
        let service = logged_in_service();
        service.add_to_cart(&product("a", 5), 1).await.unwrap();
        service.add_to_cart(&product("b", 5), 1).await.unwrap();
        service.add_to_cart(&product("a", 5), 1).await.unwrap();

        let cart = service.cart();
        let ids: Vec<&str> = cart.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_add_rejects_beyond_stock_with_quantified_message() {
        let service = logged_in_service();
        let p = product("p1", 5);

        service.add_to_cart(&p, 3).await.unwrap();
        let err = service.add_to_cart(&p, 4).await.unwrap_err();
        assert!(matches!(err, CartError::StockExceeded { available: 2 }));
        assert_eq!(err.to_string(), "only 2 more available");

        // Rejection did not mutate the cart
        assert_eq!(service.cart().first().unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_add_at_exact_stock_reports_none_available() {
        let service = logged_in_service();
        let p = product("p1", 3);

        service.add_to_cart(&p, 3).await.unwrap();
        let err = service.add_to_cart(&p, 1).await.unwrap_err();
        assert!(matches!(err, CartError::StockExceeded { available: 0 }));
        assert_eq!(err.to_string(), "no more stock available");
    }

    #[tokio::test]
    async fn test_add_refreshes_stock_snapshot() {
        let service = logged_in_service();
        service.add_to_cart(&product("p1", 5), 2).await.unwrap();
        // Catalog stock changed between page loads
        service.add_to_cart(&product("p1", 8), 1).await.unwrap();
        assert_eq!(service.cart().first().unwrap().stock_quantity, 8);
    }

    #[tokio::test]
    async fn test_add_zero_quantity_is_treated_as_one() {
        let service = logged_in_service();
        assert_eq!(service.add_to_cart(&product("p1", 5), 0).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_wishlist_add_is_idempotent() {
        let service = logged_in_service();
        let p = product("p1", 5);

        assert_eq!(service.add_to_wishlist(&p).await.unwrap(), WishlistAdd::Added);
        assert_eq!(
            service.add_to_wishlist(&p).await.unwrap(),
            WishlistAdd::AlreadyPresent
        );
        assert_eq!(service.wishlist().len(), 1);
    }

    #[tokio::test]
    async fn test_same_id_allowed_in_both_lists() {
        let service = logged_in_service();
        let p = product("p1", 5);

        service.add_to_cart(&p, 1).await.unwrap();
        assert_eq!(service.add_to_wishlist(&p).await.unwrap(), WishlistAdd::Added);

        let counts = service.counts();
        assert_eq!(counts.cart_units, 1);
        assert_eq!(counts.wishlist_entries, 1);
    }

    #[tokio::test]
    async fn test_decrement_to_zero_removes_line() {
        let service = logged_in_service();
        let p = product("p1", 5);
        service.add_to_cart(&p, 2).await.unwrap();

        let change = service.update_quantity(&p.id, -2).unwrap();
        assert_eq!(change, Some(QuantityChange::Removed));
        assert!(service.cart().is_empty());
        assert_eq!(service.counts().cart_units, 0);
    }

    #[tokio::test]
    async fn test_increment_beyond_snapshot_rejected() {
        let service = logged_in_service();
        let p = product("p1", 5);
        service.add_to_cart(&p, 4).await.unwrap();

        let err = service.update_quantity(&p.id, 2).unwrap_err();
        assert!(matches!(err, CartError::StockExceeded { available: 1 }));
        assert_eq!(service.cart().first().unwrap().quantity, 4);
    }

    #[tokio::test]
    async fn test_decrement_never_checks_stock() {
        let service = logged_in_service();
        let p = product("p1", 5);
        service.add_to_cart(&p, 5).await.unwrap();

        let change = service.update_quantity(&p.id, -3).unwrap();
        assert_eq!(change, Some(QuantityChange::Set(2)));
    }

    #[tokio::test]
    async fn test_update_missing_id_returns_none() {
        let service = logged_in_service();
        let missing = ProductId::new("ghost");
        assert_eq!(service.update_quantity(&missing, 1).unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_absent_id_is_noop_but_persists() {
        let service = logged_in_service();
        service.add_to_cart(&product("p1", 5), 1).await.unwrap();

        service.remove_from_cart(&ProductId::new("ghost")).unwrap();
        assert_eq!(service.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_counts_sum_unit_quantities() {
        let service = logged_in_service();
        service.add_to_cart(&product("a", 10), 3).await.unwrap();
        service.add_to_cart(&product("b", 10), 4).await.unwrap();
        service.add_to_wishlist(&product("c", 10)).await.unwrap();

        let counts = service.counts();
        assert_eq!(counts.cart_units, 7);
        assert_eq!(counts.wishlist_entries, 1);
    }

    #[tokio::test]
    async fn test_anonymous_add_leaves_store_byte_identical() {
        let store = MemoryStore::new();
        let seeded = r#"[{"id":"p0","name":"Seeded","price":{"amount":"1.00","currency_code":"USD"},"image":null,"quantity":1,"stock_quantity":9}]"#;
        store.put(keys::CART, seeded).unwrap();

        let service = CartService::new(store, StaticSessionProvider::anonymous());
        let err = service.add_to_cart(&product("p1", 5), 1).await.unwrap_err();
        assert!(matches!(err, CartError::NotAuthenticated));

        let err = service.add_to_wishlist(&product("p1", 5)).await.unwrap_err();
        assert!(matches!(err, CartError::NotAuthenticated));

        assert_eq!(
            service.store().get(keys::CART).unwrap().as_deref(),
            Some(seeded)
        );
        assert!(service.store().get(keys::WISHLIST).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_cart_reads_as_empty() {
        let store = MemoryStore::new();
        store.put(keys::CART, "definitely not json").unwrap();
        let session = SessionInfo {
            user_id: UserId::new("u1"),
            email: None,
        };
        let service = CartService::new(store, StaticSessionProvider::logged_in(session));

        assert!(service.cart().is_empty());
        assert_eq!(service.counts().cart_units, 0);

        // A successful add replaces the corrupt value with a fresh list
        service.add_to_cart(&product("p1", 5), 2).await.unwrap();
        assert_eq!(service.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_notifications_carry_new_snapshot() {
        let mut service = logged_in_service();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        service.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        let p = product("p1", 5);
        service.add_to_cart(&p, 2).await.unwrap();
        service.add_to_wishlist(&p).await.unwrap();
        // Idempotent wishlist re-add fires nothing
        service.add_to_wishlist(&p).await.unwrap();
        service.remove_from_cart(&p.id).unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        match events.first().unwrap() {
            ListEvent::CartChanged(lines) => {
                assert_eq!(lines.len(), 1);
                assert_eq!(lines.first().unwrap().quantity, 2);
            }
            other => panic!("expected CartChanged, got {other:?}"),
        }
        match events.get(1).unwrap() {
            ListEvent::WishlistChanged(entries) => assert_eq!(entries.len(), 1),
            other => panic!("expected WishlistChanged, got {other:?}"),
        }
        match events.get(2).unwrap() {
            ListEvent::CartChanged(lines) => assert!(lines.is_empty()),
            other => panic!("expected CartChanged, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejected_operations_fire_no_notification() {
        let mut service = logged_in_service();
        let fired = Arc::new(Mutex::new(0_u32));
        let sink = Arc::clone(&fired);
        service.subscribe(move |_| *sink.lock().unwrap() += 1);

        let p = product("p1", 2);
        service.add_to_cart(&p, 2).await.unwrap();
        assert!(service.add_to_cart(&p, 1).await.is_err());
        assert!(service.update_quantity(&p.id, 5).is_err());

        assert_eq!(*fired.lock().unwrap(), 1);
    }
}
