//! Storing a freshly issued session

use crate::auth::models::{Role, SessionRecord};
use crate::auth::session::SessionKeys;
use crate::auth::store::SessionStore;
use crate::error::Result;

/// Persist a login the way the portal login forms do.
///
/// Artifacts of the previous principal (driver profile, cached ids) are
/// removed first, since the resolver gives the driver profile precedence.
pub fn store_login<S: SessionStore>(
    store: &S,
    keys: &SessionKeys,
    token: &str,
    role: Role,
) -> Result<SessionRecord> {
    store.remove(&keys.driver)?;
    for key in &keys.cache {
        store.remove(key)?;
    }

    let record = SessionRecord::new(token, role);
    let serialized = serde_json::to_string(&record)?;
    store.set(&keys.session, &serialized)?;
    store.set(&keys.token, token)?;
    if role == Role::Driver {
        store.set(&keys.driver, &serialized)?;
    }

    tracing::debug!("Stored {} session", role);
    Ok(record)
}
