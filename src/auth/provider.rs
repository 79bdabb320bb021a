// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Token provider capability and an in-memory session

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Source of access tokens for outgoing requests
///
/// Both methods are called synchronously from inside interceptor handlers,
/// so they must not block on I/O. The token is queried again for every
/// request; implementations own all caching.
pub trait TokenProvider: Send + Sync {
    /// Current access token, or `None` when no usable credential exists
    fn access_token(&self) -> Option<String>;

    /// Terminate the session
    fn logout(&self);
}

impl<T: TokenProvider + ?Sized> TokenProvider for Arc<T> {
    fn access_token(&self) -> Option<String> {
        (**self).access_token()
    }

    fn logout(&self) {
        (**self).logout()
    }
}

/// Why the pipeline ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// No token was available for an outgoing request
    MissingCredential,
    /// The server answered 401 Unauthorized
    Unauthorized,
}

impl fmt::Display for LogoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogoutReason::MissingCredential => write!(f, "missing credential"),
            LogoutReason::Unauthorized => write!(f, "unauthorized response"),
        }
    }
}

/// Logout callback type
pub type LogoutCallback = Arc<dyn Fn() + Send + Sync>;

/// In-memory token provider
///
/// `logout` clears the stored token and fires the optional callback, which is
/// where an application hooks its "back to the login screen" behaviour.
#[derive(Clone, Default)]
pub struct SessionTokenProvider {
    token: Arc<RwLock<Option<String>>>,
    logouts: Arc<AtomicUsize>,
    on_logout: Option<LogoutCallback>,
}

impl SessionTokenProvider {
    /// Create a session holding `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
            ..Self::default()
        }
    }

    /// Create a session with no token
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set logout callback
    pub fn on_logout(mut self, callback: LogoutCallback) -> Self {
        self.on_logout = Some(callback);
        self
    }

    /// Replace the stored token
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    /// Whether a token is currently stored
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Number of times `logout` has been called
    pub fn logout_count(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }
}

impl TokenProvider for SessionTokenProvider {
    fn access_token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn logout(&self) {
        self.token.write().take();
        self.logouts.fetch_add(1, Ordering::SeqCst);
        if let Some(ref callback) = self.on_logout {
            callback();
        }
    }
}

impl fmt::Debug for SessionTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokenProvider")
            .field("authenticated", &self.is_authenticated())
            .field("logouts", &self.logout_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token() {
        let session = SessionTokenProvider::new("GOOD_TOKEN");
        assert_eq!(session.access_token().as_deref(), Some("GOOD_TOKEN"));
        assert!(session.is_authenticated());
        assert_eq!(session.logout_count(), 0);
    }

    #[test]
    fn test_logout_clears_token() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let session = SessionTokenProvider::new("GOOD_TOKEN").on_logout(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        session.logout();

        assert!(session.access_token().is_none());
        assert_eq!(session.logout_count(), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionTokenProvider::empty();
        let shared: Arc<dyn TokenProvider> = Arc::new(session.clone());

        session.set_token(Some("late".into()));
        assert_eq!(shared.access_token().as_deref(), Some("late"));

        shared.logout();
        assert_eq!(session.logout_count(), 1);
    }

    #[test]
    fn test_debug_hides_token() {
        let session = SessionTokenProvider::new("secret-value");
        assert!(!format!("{:?}", session).contains("secret-value"));
    }
}
