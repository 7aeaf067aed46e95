//! Run configuration with environment overrides.
//!
//! Environment variables:
//! - `SEATING_TABLES`: number of tables (0 or negative means no capacity)
//! - `SEATING_MIN_SECS` / `SEATING_MAX_SECS`: service-time range
//! - `SEATING_POLL_MS`: delay between reclamation passes
//! - `SEATING_SEED`: seed for service-time draws

use std::str::FromStr;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cafe::DEFAULT_POLL_INTERVAL;
use crate::error::{Result, SeatingError};
use crate::guest::Guest;
use crate::service_time::ServiceTime;

pub const DEFAULT_TABLES: usize = 5;

pub const DEFAULT_GUESTS: [&str; 12] = [
    "Maria",
    "Oleg",
    "Vakhtang",
    "Sergey",
    "Darya",
    "Arman",
    "Vitoria",
    "Nikita",
    "Galina",
    "Pavel",
    "Ilya",
    "Alexandra",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeConfig {
    pub tables: usize,
    /// Guest names, in arrival order.
    pub guests: Vec<String>,
    pub service_time: ServiceTime,
    pub poll_interval: Duration,
    /// Fixed seed for reproducible runs; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for CafeConfig {
    fn default() -> Self {
        Self {
            tables: DEFAULT_TABLES,
            guests: DEFAULT_GUESTS.iter().map(|s| s.to_string()).collect(),
            service_time: ServiceTime::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            seed: None,
        }
    }
}

impl CafeConfig {
    /// Defaults overridden by `SEATING_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (an environment-like key/value source).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(count) = parse_var(&lookup, "SEATING_TABLES")? {
            self.tables = table_count(count);
        }

        let min = parse_var(&lookup, "SEATING_MIN_SECS")?;
        let max = parse_var(&lookup, "SEATING_MAX_SECS")?;
        if min.is_some() || max.is_some() {
            self.service_time = ServiceTime::new(
                min.unwrap_or(self.service_time.min_secs()),
                max.unwrap_or(self.service_time.max_secs()),
            )?;
        }

        if let Some(ms) = parse_var::<u64, _>(&lookup, "SEATING_POLL_MS")? {
            self.poll_interval = Duration::from_millis(ms);
        }

        if let Some(seed) = parse_var(&lookup, "SEATING_SEED")? {
            self.seed = Some(seed);
        }

        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(SeatingError::ZeroPollInterval);
        }
        Ok(())
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Build the guests, drawing each stay from the service-time range.
    pub fn build_guests(&self, rng: &mut StdRng) -> Vec<Guest> {
        self.guests
            .iter()
            .map(|name| Guest::new(name.as_str(), &self.service_time, rng))
            .collect()
    }
}

/// Table count from a signed value; zero or negative means no capacity.
pub fn table_count(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| SeatingError::InvalidConfig {
            key: key.to_string(),
            value: raw.clone(),
        })
}
