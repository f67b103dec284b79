//! Pomelo Cart - Local cart/wishlist engine.
//!
//! This crate implements the client-side cart and wishlist state for Pomelo
//! Market: a stock-aware, session-gated line-item list persisted under fixed
//! keys in a local key-value store, with synchronous change notifications
//! for badge rendering.
//!
//! # Architecture
//!
//! - [`CartService`] - The engine. One explicit service object per process
//!   with injected dependencies; no global state.
//! - [`store`] - The persistence seam. [`store::KeyValueStore`] is the
//!   local-storage analogue; [`store::MemoryStore`] for tests,
//!   [`store::FileStore`] for durable use. Last-writer-wins, no cross-process
//!   coordination.
//! - [`session`] - The gate. [`session::SessionProvider`] resolves the
//!   current session; add operations refuse to mutate without one.
//! - [`notify`] - Change events carrying the new list snapshot, delivered
//!   synchronously to subscribers registered on the service.
//!
//! # Guarantees and their limits
//!
//! Stock validation is advisory: it holds quantities to the stock snapshot
//! captured at the last successful add/update, nothing more. The catalog is
//! the authority and the real check happens at checkout. Likewise the store
//! offers no mutual exclusion across processes sharing a data directory;
//! concurrent writers are last-writer-wins by contract.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod item;
pub mod notify;
pub mod service;
pub mod session;
pub mod store;

pub use error::{CartError, StoreError};
pub use item::{CartLine, WishlistEntry};
pub use notify::ListEvent;
pub use service::{CartService, Counts, QuantityChange, WishlistAdd};
pub use session::{SessionInfo, SessionProvider, StaticSessionProvider};
