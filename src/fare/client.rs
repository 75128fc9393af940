//! Fare preview lookups against the backend

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{Error, Result};

use super::period::SchedulePeriod;

/// Per-vehicle single-ride fares as returned by `/rides/get-fare`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BaseFare {
    #[serde(default)]
    pub auto: f64,
    #[serde(default)]
    pub car: f64,
    #[serde(default)]
    pub moto: f64,
}

#[derive(Debug, Default, Deserialize)]
struct FareResponse {
    #[serde(default)]
    fare: Option<BaseFare>,
}

/// Estimated fare per vehicle type for a whole schedule period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FareQuote {
    pub auto: u64,
    pub car: u64,
    pub moto: u64,
}

impl FareQuote {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale a base fare over a period. A client-side preview, not the billed amount.
    pub fn for_period(base: BaseFare, period: SchedulePeriod) -> Self {
        Self {
            auto: period.apply(base.auto),
            car: period.apply(base.car),
            moto: period.apply(base.moto),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FareClient {
    client: reqwest::Client,
    endpoint: String,
}

impl FareClient {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: api.endpoint("/rides/get-fare"),
        })
    }

    /// Fetch the base fare between two places
    pub async fn base_fare(&self, pickup: &str, destination: &str) -> Result<BaseFare> {
        let url = reqwest::Url::parse_with_params(
            &self.endpoint,
            &[("pickup", pickup), ("destination", destination)],
        )
        .map_err(|e| Error::Config(format!("Invalid fare endpoint {}: {}", self.endpoint, e)))?;

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body: FareResponse = response.json().await?;
        Ok(body.fare.unwrap_or_default())
    }

    /// Estimate the fare for a period. Never fails: any error yields a zero quote.
    pub async fn estimate(&self, pickup: &str, destination: &str, period: SchedulePeriod) -> FareQuote {
        match self.base_fare(pickup, destination).await {
            Ok(base) => FareQuote::for_period(base, period),
            Err(e) => {
                tracing::warn!("Fare lookup {} -> {} failed: {}", pickup, destination, e);
                FareQuote::zero()
            }
        }
    }
}
