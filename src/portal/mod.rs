//! Portal routing: which page a navigation renders or where it is sent

pub mod pattern;
pub mod table;

pub use pattern::PathPattern;
pub use table::{Navigation, RouteAccess, RouteEntry, RouteTable, FALLBACK_PATH};
