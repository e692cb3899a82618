//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat panel consults this before sending a conversational turn; the
//! stateless code tools work signed out.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user), loading: false }
    }

    /// True once a session user is known. A session still loading counts as
    /// signed out.
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}
