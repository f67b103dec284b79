//! Session gate for cart mutations.
//!
//! Adding to the cart or wishlist requires a logged-in user. The engine
//! does not own authentication; it asks an injected [`SessionProvider`]
//! for the current session and refuses the mutation when there is none.
//! Session resolution is the single async suspension point in the engine -
//! everything else, including persistence, is synchronous.

use serde::{Deserialize, Serialize};

use pomelo_core::UserId;

/// Minimal identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// User identifier from the auth provider.
    pub user_id: UserId,
    /// User's email address, when the provider exposes one.
    pub email: Option<String>,
}

/// Source of the current session.
///
/// Implementations wrap whatever auth collaborator the host application
/// uses. Returning `None` means "not logged in" and blocks add operations.
pub trait SessionProvider: Send + Sync {
    /// Resolve the current session, if any.
    fn current_session(&self) -> impl Future<Output = Option<SessionInfo>> + Send;
}

/// A provider with a fixed answer: always the given session, or always
/// anonymous.
///
/// Used by the CLI (which derives its user from the environment once at
/// startup) and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    session: Option<SessionInfo>,
}

impl StaticSessionProvider {
    /// A provider that always reports the given user as logged in.
    #[must_use]
    pub const fn logged_in(session: SessionInfo) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// A provider that always reports no session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { session: None }
    }
}

impl SessionProvider for StaticSessionProvider {
    async fn current_session(&self) -> Option<SessionInfo> {
        self.session.clone()
    }
}
