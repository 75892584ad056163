//! Sign-in gate.
//!
//! The gate compares a presented identity and secret with the configured
//! pair and tracks whether a session is active. It is a view switch, not a
//! security boundary.

use crate::config::Credentials;

/// Whether a user is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No active session.
    #[default]
    Unauthenticated,
    /// A user is signed in.
    Authenticated {
        /// The identity that signed in.
        identity: String,
    },
}

/// Holds the accepted credentials and the current session state.
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    credentials: Option<Credentials>,
    state: SessionState,
}

impl AuthGate {
    /// Create a gate in the unauthenticated state.
    pub fn new(credentials: Option<Credentials>) -> Self {
        if credentials.is_none() {
            tracing::warn!("no credentials configured; sign-in will always fail");
        }
        Self {
            credentials,
            state: SessionState::Unauthenticated,
        }
    }

    /// Check the presented pair and start a session on an exact match.
    ///
    /// A failed attempt leaves the current state untouched.
    pub fn authenticate(&mut self, identity: &str, secret: &str) -> bool {
        let matched = self
            .credentials
            .as_ref()
            .is_some_and(|c| c.username == identity && c.password == secret);

        if matched {
            tracing::info!(identity, "session started");
            self.state = SessionState::Authenticated {
                identity: identity.to_string(),
            };
        } else {
            tracing::info!(identity, "sign-in rejected");
        }
        matched
    }

    /// End the current session, if any.
    pub fn end_session(&mut self) {
        if self.is_active() {
            tracing::info!("session ended");
        }
        self.state = SessionState::Unauthenticated;
    }

    /// Whether a session is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// The signed-in identity.
    pub fn identity(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { identity } => Some(identity),
            SessionState::Unauthenticated => None,
        }
    }

    /// The current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AuthGate {
        AuthGate::new(Some(Credentials {
            username: "admin".into(),
            password: "secret123".into(),
        }))
    }

    #[test]
    fn test_starts_unauthenticated() {
        let gate = gate();
        assert!(!gate.is_active());
        assert_eq!(gate.state(), &SessionState::Unauthenticated);
        assert!(gate.identity().is_none());
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let mut gate = gate();
        assert!(!gate.authenticate("admin", "wrongpass"));
        assert_eq!(gate.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn test_match_is_exact() {
        let mut gate = gate();
        assert!(!gate.authenticate("Admin", "secret123"));
        assert!(!gate.authenticate("admin ", "secret123"));
        assert!(!gate.is_active());
    }

    #[test]
    fn test_session_lifecycle() {
        let mut gate = gate();
        assert!(gate.authenticate("admin", "secret123"));
        assert!(gate.is_active());
        assert_eq!(gate.identity(), Some("admin"));

        // A later failed attempt does not end the session.
        assert!(!gate.authenticate("admin", "nope"));
        assert!(gate.is_active());

        gate.end_session();
        assert!(!gate.is_active());
        gate.end_session();
        assert_eq!(gate.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn test_no_credentials_never_authenticates() {
        let mut gate = AuthGate::new(None);
        assert!(!gate.authenticate("", ""));
        assert!(!gate.authenticate("admin", "secret123"));
    }
}
