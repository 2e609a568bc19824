//! Process-wide authentication session
//!
//! Holds at most one authenticated user profile plus the authenticated flag,
//! mirroring the lifecycle of the original back office: initialized once at
//! startup from persisted tokens, set by login, cleared by logout or a
//! terminal refresh failure.

use crate::client::AdminClient;
use crate::endpoints::users::User;
use crate::error::{ApiError, ApiResult};
use crate::store::TokenPair;
use std::sync::RwLock;
use tracing::{debug, instrument};
use velora_core::validation::{validate_email, Validator};

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    authenticated: bool,
}

/// Authentication state holder
///
/// Construct one per process via [`AdminClient::session`] and keep it for the
/// lifetime of the application.
pub struct AuthSession {
    client: AdminClient,
    state: RwLock<SessionState>,
}

impl AuthSession {
    /// Create a session holder bound to a client
    #[must_use]
    pub fn new(client: AdminClient) -> Self {
        Self {
            client,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Restore the session from persisted tokens, if any
    ///
    /// Fetches the current profile when a token pair is stored. A terminal
    /// authentication failure leaves the session unauthenticated (the store
    /// has already been cleared by the refresh flow); transport errors are
    /// surfaced so the caller can distinguish "offline" from "signed out".
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> ApiResult<()> {
        if self.client.store().load()?.is_none() {
            debug!("No persisted tokens, starting unauthenticated");
            return Ok(());
        }

        match self.client.auth().me().await {
            Ok(user) => {
                self.set_authenticated(user)?;
                Ok(())
            }
            Err(e) if e.is_terminal_auth() => {
                debug!(error = %e, "Persisted session is no longer valid");
                self.reset_state()?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Sign in with email and password
    ///
    /// Validates the credentials shape locally, exchanges them for a token
    /// pair, persists the pair, and records the returned profile.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let mut validation = validate_email("email", email);
        validation.merge(Validator::new().required("password", password).validate());
        if !validation.is_valid() {
            return Err(validation.into());
        }

        let login = self.client.auth().login(email, password).await?;
        self.client
            .store()
            .save(&TokenPair::new(login.access_token, login.refresh_token))?;
        self.set_authenticated(login.user.clone())?;
        Ok(login.user)
    }

    /// Sign out: clear persisted tokens and in-memory state
    ///
    /// The backend has no logout endpoint; the session ends client-side.
    #[instrument(skip(self))]
    pub fn logout(&self) -> ApiResult<()> {
        self.client.store().clear()?;
        self.reset_state()
    }

    /// Current profile, if authenticated
    pub fn current_user(&self) -> Option<User> {
        self.state.read().ok().and_then(|s| s.user.clone())
    }

    /// Whether a user is signed in
    pub fn is_authenticated(&self) -> bool {
        self.state.read().map(|s| s.authenticated).unwrap_or(false)
    }

    /// Gate for operations that need a session
    ///
    /// Returns the current user or an authentication-required error.
    pub fn require_authenticated(&self) -> ApiResult<User> {
        self.current_user().ok_or(ApiError::NotAuthenticated)
    }

    fn set_authenticated(&self, user: User) -> ApiResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| ApiError::storage("Session lock poisoned"))?;
        state.user = Some(user);
        state.authenticated = true;
        Ok(())
    }

    fn reset_state(&self) -> ApiResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| ApiError::storage("Session lock poisoned"))?;
        state.user = None;
        state.authenticated = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::store::{MemoryTokenStore, TokenStore};
    use std::sync::Arc;

    fn session_with_store(store: Arc<dyn TokenStore>) -> AuthSession {
        AdminClient::with_store(ClientConfig::development(), store)
            .unwrap()
            .session()
    }

    #[tokio::test]
    async fn test_initialize_without_tokens_stays_unauthenticated() {
        let session = session_with_store(Arc::new(MemoryTokenStore::new()));
        session.initialize().await.unwrap();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_email_before_any_request() {
        let session = session_with_store(Arc::new(MemoryTokenStore::new()));
        let err = session.login("not-an-email", "secret").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_login_rejects_empty_password_before_any_request() {
        let session = session_with_store(Arc::new(MemoryTokenStore::new()));
        let err = session.login("ops@velora.shop", "").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn test_logout_clears_store_and_state() {
        let store = Arc::new(MemoryTokenStore::with_tokens(TokenPair::new("a", "r")));
        let session = session_with_store(store.clone());

        session.logout().unwrap();

        assert!(!session.is_authenticated());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_require_authenticated_without_session() {
        let session = session_with_store(Arc::new(MemoryTokenStore::new()));
        let err = session.require_authenticated().unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));
    }
}
