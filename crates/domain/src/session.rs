//! Authentication session state.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Phase of the session state machine.
///
/// `Bootstrapping` resolves to either `Authenticated` or `Anonymous`;
/// login and registration move `Anonymous` to `Authenticated`; logout
/// and token invalidation move back to `Anonymous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// The stored token has not been verified yet.
    Bootstrapping,
    /// A user is signed in.
    Authenticated,
    /// Nobody is signed in.
    Anonymous,
}

/// Current authentication state of the running client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The signed-in user, if any.
    pub user: Option<User>,
    /// True until the start-up check has resolved.
    pub loading: bool,
}

impl Session {
    /// Initial state: loading, no user.
    #[must_use]
    pub const fn bootstrapping() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// Resolved state without a user.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    /// Resolved state bound to `user`.
    #[must_use]
    pub const fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    /// Derives the state machine phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        match (&self.user, self.loading) {
            (_, true) => SessionPhase::Bootstrapping,
            (Some(_), false) => SessionPhase::Authenticated,
            (None, false) => SessionPhase::Anonymous,
        }
    }

    /// Returns true when a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::bootstrapping()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        assert_eq!(Session::default().phase(), SessionPhase::Bootstrapping);
        assert_eq!(Session::anonymous().phase(), SessionPhase::Anonymous);
        assert_eq!(
            Session::authenticated(User::new(1, "a")).phase(),
            SessionPhase::Authenticated
        );
    }
}
