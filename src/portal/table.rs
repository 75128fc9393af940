//! Portal route table: route lookup plus guard evaluation

use serde::Serialize;
use std::collections::BTreeMap;

use crate::auth::{authorize_protected, authorize_public, Decision, Role, RouteRequirement, Session};
use crate::config::{AccessKind, RouteConfig};

use super::pattern::PathPattern;

/// Where unmatched paths are sent
pub const FALLBACK_PATH: &str = "/";

/// Route category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RouteAccess {
    /// Reachable by everyone
    Open,
    /// Guests only; authenticated users are sent to their portal
    Public,
    /// Requires a session, optionally of specific roles
    Protected(RouteRequirement),
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteEntry {
    pub pattern: PathPattern,
    pub access: RouteAccess,
}

/// Result of navigating to a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Navigation {
    /// Render the page for `pattern`
    Render {
        pattern: String,
        params: BTreeMap<String, String>,
    },
    /// Replace the current history entry with `to`
    Replace { to: &'static str },
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table for the student, college and driver portals
    pub fn portal() -> Self {
        let mut table = Self::new();

        for path in [
            "/", "/about", "/careers", "/blog", "/faqs", "/support", "/contact", "/terms",
            "/privacy", "/cookies", "/driver/login",
        ] {
            table.insert(path, RouteAccess::Open);
        }

        for path in ["/login", "/register"] {
            table.insert(path, RouteAccess::Public);
        }

        let college = [
            "/college",
            "/college/services",
            "/college/students",
            "/college/settings",
            "/college/select-services",
            "/college/payment-success",
            "/college/marketing-insights",
            "/college/services/shuttle",
            "/college/services/cab",
            "/college/services/bike",
        ];
        let student = [
            "/user",
            "/user/book",
            "/user/schedule",
            "/user/scheduled-details",
            "/user/rides",
            "/user/payments",
            "/user/settings",
            "/user/awaiting-driver/:rideId",
            "/user/ride-completed/:rideId",
            "/user/manage-scheduled",
        ];
        let driver = [
            "/driver",
            "/driver/rides",
            "/driver/earnings",
            "/driver/settings",
            "/driver/ride/:rideId",
        ];

        for (role, paths) in [
            (Role::College, &college[..]),
            (Role::Student, &student[..]),
            (Role::Driver, &driver[..]),
        ] {
            for path in paths {
                table.insert(path, RouteAccess::Protected(RouteRequirement::roles([role])));
            }
        }

        table
    }

    /// Portal table with configured routes layered on top
    pub fn with_overrides(routes: &[RouteConfig]) -> Self {
        let mut table = Self::portal();
        for route in routes {
            let access = match route.access {
                AccessKind::Open => RouteAccess::Open,
                AccessKind::Public => RouteAccess::Public,
                AccessKind::Protected => {
                    RouteAccess::Protected(RouteRequirement::roles(route.roles.iter().copied()))
                }
            };
            table.insert(&route.path, access);
        }
        table
    }

    /// Add a route, replacing any entry with the same pattern
    pub fn insert(&mut self, path: &str, access: RouteAccess) {
        let pattern = PathPattern::parse(path);
        match self.entries.iter_mut().find(|e| e.pattern == pattern) {
            Some(entry) => entry.access = access,
            None => self.entries.push(RouteEntry { pattern, access }),
        }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the most specific route matching `path`
    pub fn lookup(&self, path: &str) -> Option<(&RouteEntry, BTreeMap<String, String>)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.pattern.matches(path).map(|params| (entry, params)))
            .max_by_key(|(entry, _)| entry.pattern.specificity())
    }

    /// Decide what happens when `session` navigates to `path`
    pub fn navigate(&self, path: &str, session: &Session) -> Navigation {
        let Some((entry, params)) = self.lookup(path) else {
            tracing::debug!("No route for {}, replacing with {}", path, FALLBACK_PATH);
            return Navigation::Replace { to: FALLBACK_PATH };
        };

        let decision = match &entry.access {
            RouteAccess::Open => Decision::Allow,
            RouteAccess::Public => authorize_public(session),
            RouteAccess::Protected(requirement) => authorize_protected(session, requirement),
        };

        tracing::debug!(
            "Navigate {} (route {}, role {:?}): {:?}",
            path,
            entry.pattern,
            session.role,
            decision
        );

        match decision {
            Decision::Allow => Navigation::Render {
                pattern: entry.pattern.to_string(),
                params,
            },
            Decision::RedirectTo(to) => Navigation::Replace { to },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Session {
        Session::new(Some("t1".to_string()), Some(Role::Student))
    }

    #[test]
    fn test_portal_table_has_all_sections() {
        let table = RouteTable::portal();
        assert_eq!(table.len(), 11 + 2 + 10 + 10 + 5);
    }

    #[test]
    fn test_open_route_renders_for_anyone() {
        let table = RouteTable::portal();
        for session in [Session::absent(), student()] {
            assert!(matches!(
                table.navigate("/privacy", &session),
                Navigation::Render { .. }
            ));
        }
    }

    #[test]
    fn test_unknown_path_replaces_home() {
        let table = RouteTable::portal();
        assert_eq!(
            table.navigate("/nowhere/at/all", &student()),
            Navigation::Replace { to: "/" }
        );
    }

    #[test]
    fn test_param_route_renders_with_params() {
        let table = RouteTable::portal();
        match table.navigate("/user/awaiting-driver/r-17", &student()) {
            Navigation::Render { pattern, params } => {
                assert_eq!(pattern, "/user/awaiting-driver/:rideId");
                assert_eq!(params.get("rideId").map(String::as_str), Some("r-17"));
            }
            other => panic!("expected render, got {:?}", other),
        }
    }

    #[test]
    fn test_driver_login_is_open_not_protected() {
        let table = RouteTable::portal();
        assert!(matches!(
            table.navigate("/driver/login", &Session::absent()),
            Navigation::Render { .. }
        ));
    }

    #[test]
    fn test_override_replaces_existing_route() {
        let routes = vec![RouteConfig {
            path: "/blog".to_string(),
            access: AccessKind::Protected,
            roles: vec![],
        }];
        let table = RouteTable::with_overrides(&routes);
        assert_eq!(table.len(), RouteTable::portal().len());
        assert_eq!(
            table.navigate("/blog", &Session::absent()),
            Navigation::Replace { to: "/login" }
        );
        assert!(matches!(
            table.navigate("/blog", &student()),
            Navigation::Render { .. }
        ));
    }
}
