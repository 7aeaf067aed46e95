//! Uniform service-time range for guests.

use std::time::Duration;

use rand::Rng;

use crate::error::{Result, SeatingError};

/// Shortest visit, in seconds.
pub const DEFAULT_MIN_SECS: u64 = 3;
/// Longest visit, in seconds.
pub const DEFAULT_MAX_SECS: u64 = 10;

/// Inclusive range of whole seconds a guest stays seated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTime {
    min_secs: u64,
    max_secs: u64,
}

impl Default for ServiceTime {
    fn default() -> Self {
        Self {
            min_secs: DEFAULT_MIN_SECS,
            max_secs: DEFAULT_MAX_SECS,
        }
    }
}

impl ServiceTime {
    pub fn new(min_secs: u64, max_secs: u64) -> Result<Self> {
        if min_secs > max_secs {
            return Err(SeatingError::InvalidServiceTime {
                min: min_secs,
                max: max_secs,
            });
        }
        Ok(Self { min_secs, max_secs })
    }

    pub fn min_secs(&self) -> u64 {
        self.min_secs
    }

    pub fn max_secs(&self) -> u64 {
        self.max_secs
    }

    /// Draw a duration uniformly from `[min_secs, max_secs]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_secs(rng.gen_range(self.min_secs..=self.max_secs))
    }
}
