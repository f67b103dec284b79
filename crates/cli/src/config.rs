//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `POMELO_DATA_DIR` - Directory holding the persisted lists
//!   (default: `.pomelo`)
//! - `POMELO_USER` - Email of the "logged in" user; when unset the CLI is
//!   anonymous and add operations are refused by the session gate
//! - `RUST_LOG` - Tracing filter (default: `pomelo=info`)

use std::env;
use std::path::PathBuf;

/// Default data directory when `POMELO_DATA_DIR` is unset.
const DEFAULT_DATA_DIR: &str = ".pomelo";

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding the persisted cart/wishlist files.
    pub data_dir: PathBuf,
    /// Email of the current user, if any. `None` means anonymous.
    pub user: Option<String>,
}

impl CliConfig {
    /// Load configuration from the environment.
    ///
    /// `data_dir_override` (from the `--data-dir` flag) wins over the
    /// environment. A blank `POMELO_USER` is treated as unset.
    #[must_use]
    pub fn from_env(data_dir_override: Option<PathBuf>) -> Self {
        let data_dir = data_dir_override.unwrap_or_else(|| {
            env::var("POMELO_DATA_DIR")
                .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from)
        });

        let user = env::var("POMELO_USER")
            .ok()
            .map(|u| u.trim().to_owned())
            .filter(|u| !u.is_empty());

        Self { data_dir, user }
    }
}
