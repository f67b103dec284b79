//! CLI command implementations.

pub mod cart;
pub mod count;
pub mod wishlist;

use thiserror::Error;

use pomelo_cart::store::FileStore;
use pomelo_cart::{CartError, CartService, StaticSessionProvider};
use pomelo_core::PriceError;

/// The concrete service the CLI drives: file-backed store, session fixed
/// at startup from the environment.
pub type CliService = CartService<FileStore, StaticSessionProvider>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The supplied price was invalid.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// The engine rejected or failed the operation.
    #[error(transparent)]
    Cart(#[from] CartError),
}
