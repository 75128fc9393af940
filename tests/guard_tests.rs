//! Route guard tests
//! Properties of the protected and public guards plus end-to-end scenarios
//! from a stored record to a navigation decision.

use ridegate::auth::{
    authorize_protected, authorize_public, redirect_target, Decision, MemoryStore, Role,
    RouteRequirement, Session, SessionKeys, SessionResolver,
};
use ridegate::portal::{Navigation, RouteTable};

const ALL_ROLES: [Role; 4] = [Role::Student, Role::College, Role::Driver, Role::Unknown];

fn session(role: Role) -> Session {
    Session::new(Some(format!("token-{}", role)), Some(role))
}

/// Every non-empty subset of the portal roles
fn requirements() -> Vec<RouteRequirement> {
    let known = [Role::Student, Role::College, Role::Driver];
    let mut out = vec![RouteRequirement::any_role()];
    for mask in 1u8..8 {
        out.push(RouteRequirement::roles(
            known
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .map(|(_, r)| *r),
        ));
    }
    out
}

fn resolve(entries: Vec<(&str, &str)>) -> Session {
    SessionResolver::new(MemoryStore::with_entries(entries), SessionKeys::default()).resolve()
}

// ============================================================================
// Guard properties
// ============================================================================

#[test]
fn test_absent_session_always_goes_to_login() {
    for req in requirements() {
        assert_eq!(
            authorize_protected(&Session::absent(), &req),
            Decision::RedirectTo("/login")
        );
    }
}

#[test]
fn test_member_role_is_allowed() {
    for req in requirements() {
        for role in ALL_ROLES {
            if req.allowed_roles.contains(&role) {
                assert_eq!(authorize_protected(&session(role), &req), Decision::Allow);
            }
        }
    }
}

#[test]
fn test_non_member_role_goes_home_never_login() {
    for req in requirements() {
        if req.allowed_roles.is_empty() {
            continue;
        }
        for role in ALL_ROLES {
            if req.allowed_roles.contains(&role) {
                continue;
            }
            let decision = authorize_protected(&session(role), &req);
            assert_eq!(decision, Decision::RedirectTo(redirect_target(Some(role))));
            assert_ne!(decision, Decision::RedirectTo("/login"));
        }
    }
}

#[test]
fn test_public_allows_only_guests() {
    assert_eq!(authorize_public(&Session::absent()), Decision::Allow);
    for role in ALL_ROLES {
        assert_ne!(authorize_public(&session(role)), Decision::Allow);
    }
}

#[test]
fn test_redirect_target_is_total() {
    assert_eq!(redirect_target(Some(Role::Student)), "/user");
    assert_eq!(redirect_target(Some(Role::College)), "/college");
    assert_eq!(redirect_target(Some(Role::Driver)), "/driver");
    assert_eq!(redirect_target(Some(Role::parse("registrar"))), "/");
    assert_eq!(redirect_target(None), "/");
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_student_on_college_route() {
    let session = resolve(vec![("user", r#"{"token":"t1","role":"student"}"#)]);
    let req = RouteRequirement::roles([Role::College]);
    assert_eq!(authorize_protected(&session, &req), Decision::RedirectTo("/user"));
}

#[test]
fn test_scenario_corrupted_record_on_driver_route() {
    let req = RouteRequirement::roles([Role::Driver]);
    for entries in [vec![], vec![("user", "{\"token\":")], vec![("user", "null")]] {
        let session = resolve(entries);
        assert_eq!(authorize_protected(&session, &req), Decision::RedirectTo("/login"));
    }
}

#[test]
fn test_scenario_driver_on_public_route() {
    let session = resolve(vec![("user", r#"{"token":"t2","role":"driver"}"#)]);
    assert_eq!(authorize_public(&session), Decision::RedirectTo("/driver"));
}

#[test]
fn test_scenario_guest_on_public_route() {
    let session = resolve(vec![]);
    assert_eq!(authorize_public(&session), Decision::Allow);
}

// ============================================================================
// Route table end to end
// ============================================================================

#[test]
fn test_student_navigates_own_portal() {
    let table = RouteTable::portal();
    let session = resolve(vec![("user", r#"{"token":"t1","role":"student"}"#)]);

    assert!(matches!(
        table.navigate("/user/schedule", &session),
        Navigation::Render { .. }
    ));
    assert_eq!(
        table.navigate("/driver/earnings", &session),
        Navigation::Replace { to: "/user" }
    );
    assert_eq!(
        table.navigate("/login", &session),
        Navigation::Replace { to: "/user" }
    );
}

#[test]
fn test_guest_is_sent_to_login_from_every_portal() {
    let table = RouteTable::portal();
    for path in ["/user", "/college/students", "/driver/ride/abc"] {
        assert_eq!(
            table.navigate(path, &Session::absent()),
            Navigation::Replace { to: "/login" }
        );
    }
    assert!(matches!(
        table.navigate("/register", &Session::absent()),
        Navigation::Render { .. }
    ));
}

#[test]
fn test_unknown_role_lands_on_home() {
    let table = RouteTable::portal();
    let session = resolve(vec![("user", r#"{"token":"t3","role":"admin"}"#)]);

    assert_eq!(session.role, Some(Role::Unknown));
    assert_eq!(
        table.navigate("/college", &session),
        Navigation::Replace { to: "/" }
    );
    assert_eq!(
        table.navigate("/login", &session),
        Navigation::Replace { to: "/" }
    );
    assert!(matches!(table.navigate("/", &session), Navigation::Render { .. }));
}
