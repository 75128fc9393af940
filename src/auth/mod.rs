//! Session resolution, route guards, login and logout

pub mod guard;
pub mod login;
pub mod logout;
pub mod models;
pub mod session;
pub mod store;

pub use guard::{authorize_protected, authorize_public, redirect_target, Decision, RouteRequirement};
pub use login::store_login;
pub use logout::{LogoutFlow, LogoutOutcome, PendingLogout, RemoteLogout};
pub use models::{Role, Session, SessionRecord};
pub use session::{SessionKeys, SessionResolver};
pub use store::{FileStore, MemoryStore, SessionStore};
