//! Pomelo Core - Shared types library.
//!
//! This crate provides common types used across all Pomelo Market components:
//! - `cart` - Local cart/wishlist engine
//! - `cli` - Command-line tool for driving a cart against a local store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! session handling. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   catalog product snapshot

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
