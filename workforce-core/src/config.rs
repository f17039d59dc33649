//! Run configuration: no environment
//! variables affect the algorithm, so everything the engine needs for one
//! run is bundled here and passed in explicitly.

use std::str::FromStr;

use crate::demand::Period;
use crate::types::ServiceKey;

/// Which service(s) to process, derived from the raw service selector
/// string: one of the seven real keys, or any other string
/// meaning "all services".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceSelection {
    Single(ServiceKey),
    All,
}

impl ServiceSelection {
    pub fn parse(raw: &str) -> ServiceSelection {
        match ServiceKey::from_str(raw) {
            Ok(key) => ServiceSelection::Single(key),
            Err(()) => ServiceSelection::All,
        }
    }
}

/// Bundles the per-run parameters the engine needs: which service(s),
/// which period, and the break-picker's PRNG seed (default `0`).
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub service: ServiceSelection,
    pub period: Period,
    pub seed: u64,
}

impl RunConfig {
    pub fn new(service: ServiceSelection, period: Period) -> Self {
        Self { service, period, seed: 0 }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
