//! Explicit session context (login → logout lifecycle).

use chrono::{DateTime, Utc};

use storefront_core::Money;

/// Opaque bearer credential issued at login.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// An authenticated user session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: BearerToken,
    username: String,
    /// Wallet balance reported at login, if any.
    balance: Option<Money>,
    established_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        token: BearerToken,
        username: impl Into<String>,
        balance: Option<Money>,
        established_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            username: username.into(),
            balance,
            established_at,
        }
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn balance(&self) -> Option<Money> {
        self.balance
    }

    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }
}

/// Who the client is acting as: a logged-in user or a guest.
///
/// Passed explicitly to the collaborators that need a credential. `login`
/// initializes it, `logout` tears it down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    current: Option<Session>,
}

impl SessionContext {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn authenticated(session: Session) -> Self {
        Self {
            current: Some(session),
        }
    }

    /// Establish `session`, replacing any previous one.
    pub fn login(&mut self, session: Session) {
        if let Some(previous) = &self.current {
            tracing::info!(previous = %previous.username(), "replacing existing session");
        }
        tracing::info!(username = %session.username(), "session established");
        self.current = Some(session);
    }

    /// Clear the session; returns the one that was active.
    pub fn logout(&mut self) -> Option<Session> {
        let previous = self.current.take();
        if let Some(session) = &previous {
            tracing::info!(username = %session.username(), "session cleared");
        }
        previous
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn bearer(&self) -> Option<&BearerToken> {
        self.current.as_ref().map(Session::token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.current.as_ref().map(Session::username)
    }

    pub fn balance(&self) -> Option<Money> {
        self.current.as_ref().and_then(Session::balance)
    }
}
