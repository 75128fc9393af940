//! HTTP decision service

pub mod routes;
pub mod server;

pub use server::*;
