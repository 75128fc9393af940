//! Fare previews for one-off and scheduled rides

pub mod client;
pub mod period;

pub use client::{BaseFare, FareClient, FareQuote};
pub use period::SchedulePeriod;
