//! Session and role models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Portal roles.
///
/// Deserialization is strict (config files, API payloads); stored session
/// records go through [`Role::parse`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    /// Student - rides portal under /user
    Student,
    /// College administrator - portal under /college
    College,
    /// Driver - portal under /driver
    Driver,
    /// Any role string the portals do not recognize
    Unknown,
}

impl Role {
    /// Parse a stored role string. Never fails: unrecognized values become `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Role::Student,
            "college" => Role::College,
            "driver" => Role::Driver,
            _ => Role::Unknown,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::College => write!(f, "college"),
            Role::Driver => write!(f, "driver"),
            Role::Unknown => write!(f, "unknown"),
        }
    }
}

/// Strict parsing for operator input, where a typo should be rejected
impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Role::parse(s) {
            Role::Unknown => Err(Error::InvalidRole(s.to_string())),
            role => Ok(role),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The currently authenticated principal, as far as the client knows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer credential
    pub token: Option<String>,
    /// Portal role; only ever present together with a token
    pub role: Option<Role>,
}

impl Session {
    /// The unauthenticated session
    pub fn absent() -> Self {
        Self::default()
    }

    /// Build a session, refusing to carry a role without a token
    pub fn new(token: Option<String>, role: Option<Role>) -> Self {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => Self {
                token: Some(token),
                role,
            },
            None => Self::absent(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }
}

/// Persisted session record as written by the login flow.
///
/// Unknown fields (name, email, college id, ...) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SessionRecord {
    /// Create a record for a freshly logged-in principal
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: Some(token.into()),
            role: Some(role.to_string()),
            issued_at: Some(chrono::Utc::now()),
        }
    }

    /// The token, if the record carries a non-empty one
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Classify this record. Empty role strings count as absent.
    pub fn to_session(&self) -> Session {
        let role = self
            .role
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .map(Role::parse);
        Session::new(self.token().map(str::to_string), role)
    }
}
