//! Error types for the cart engine.
//!
//! Validation failures (`NotAuthenticated`, `StockExceeded`) are resolved
//! before any write happens, so a rejected operation leaves the stored lists
//! untouched. Storage failures propagate to the caller; corrupt stored data
//! is not an error at all (reads fail open to the empty list, see
//! [`crate::store::read_list`]).

use thiserror::Error;

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a list for storage failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from cart/wishlist operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Mutation attempted with no current session.
    #[error("please log in to continue")]
    NotAuthenticated,

    /// Requested quantity exceeds the stock snapshot.
    ///
    /// `available` is how many more units the snapshot allows on top of
    /// what is already in the cart.
    #[error("{}", stock_message(*available))]
    StockExceeded {
        /// Units still available above the current cart quantity.
        available: u32,
    },

    /// The persistence layer failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

fn stock_message(available: u32) -> String {
    if available == 0 {
        "no more stock available".to_owned()
    } else {
        format!("only {available} more available")
    }
}
