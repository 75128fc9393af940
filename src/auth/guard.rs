//! Route authorization decisions

use crate::auth::models::{Role, Session};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const LOGIN_PATH: &str = "/login";

/// Authorization requirement attached to a protected route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequirement {
    /// Empty means any authenticated role
    #[serde(default)]
    pub allowed_roles: BTreeSet<Role>,
}

impl RouteRequirement {
    /// Any authenticated session passes
    pub fn any_role() -> Self {
        Self::default()
    }

    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed_roles: roles.into_iter().collect(),
        }
    }

    /// `Unknown` is never a member, even if a caller put it in the set
    pub fn permits(&self, role: Role) -> bool {
        if self.allowed_roles.is_empty() {
            return true;
        }
        role != Role::Unknown && self.allowed_roles.contains(&role)
    }
}

/// Outcome of a guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "path", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    RedirectTo(&'static str),
}

/// Home path of a role's portal
pub fn redirect_target(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Student) => "/user",
        Some(Role::College) => "/college",
        Some(Role::Driver) => "/driver",
        Some(Role::Unknown) | None => "/",
    }
}

/// Guard for routes that require a session.
///
/// A session with the wrong role goes to its own portal home, not to login,
/// so an authenticated user never bounces between login and a portal.
pub fn authorize_protected(session: &Session, requirement: &RouteRequirement) -> Decision {
    let Some(role) = session.role else {
        return Decision::RedirectTo(LOGIN_PATH);
    };

    if requirement.permits(role) {
        Decision::Allow
    } else {
        Decision::RedirectTo(redirect_target(Some(role)))
    }
}

/// Guard for guest-only routes such as login and registration
pub fn authorize_public(session: &Session) -> Decision {
    match session.role {
        Some(role) => Decision::RedirectTo(redirect_target(Some(role))),
        None => Decision::Allow,
    }
}
