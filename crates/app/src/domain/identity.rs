//! Shopper Identity
//!
//! A cart belongs to exactly one of an authenticated user or an anonymous
//! guest session.

use std::fmt;

use thiserror::Error;

use crate::domain::users::records::UserUuid;

/// Longest accepted guest session identifier.
pub const SESSION_ID_MAX_LEN: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionIdError {
    #[error("session id must not be empty")]
    Empty,

    #[error("session id must be at most {SESSION_ID_MAX_LEN} characters")]
    TooLong,

    #[error("session id must contain only visible ASCII characters")]
    InvalidCharacter,
}

/// Opaque guest session identifier supplied by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Validate and wrap a raw session identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is empty, too long, or contains
    /// whitespace or non-ASCII characters.
    pub fn parse(raw: impl Into<String>) -> Result<Self, SessionIdError> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(SessionIdError::Empty);
        }

        if raw.len() > SESSION_ID_MAX_LEN {
            return Err(SessionIdError::TooLong);
        }

        if !raw.bytes().all(|byte| byte.is_ascii_graphic()) {
            return Err(SessionIdError::InvalidCharacter);
        }

        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who is making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    User(UserUuid),
    GuestSession(SessionId),
}

impl Identity {
    /// The authenticated user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<UserUuid> {
        match self {
            Self::User(user) => Some(*user),
            Self::GuestSession(_) => None,
        }
    }

    pub(crate) fn owner_columns(&self) -> (Option<uuid::Uuid>, Option<&str>) {
        match self {
            Self::User(user) => (Some(user.into_uuid()), None),
            Self::GuestSession(session) => (None, Some(session.as_str())),
        }
    }
}
