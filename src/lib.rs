//! ridegate - session resolution and route guarding for the campus ride portals
//!
//! The library resolves the persisted client session into a typed identity,
//! decides whether a navigation renders or redirects, and runs the logout and
//! fare preview calls against the backend API.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod fare;
pub mod portal;
pub mod scope;

pub use auth::{Decision, Role, RouteRequirement, Session, SessionResolver};
pub use config::Config;
pub use error::Error;
pub use portal::{Navigation, RouteTable};
