//! Time-ordered unique identifiers (ULID): 48-bit millisecond timestamp plus 80 random bits,
//! rendered as 26 Crockford base32 characters.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use ulid::Ulid;

/// Mints identifiers. Safe to share between threads; the entropy source sits behind a mutex.
#[derive(Debug)]
pub struct IdGenerator {
    entropy: Mutex<StdRng>,
    fixed_time: Option<DateTime<Utc>>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            entropy: Mutex::new(StdRng::from_entropy()),
            fixed_time: None,
        }
    }

    /// Deterministic entropy, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            entropy: Mutex::new(StdRng::seed_from_u64(seed)),
            fixed_time: None,
        }
    }

    /// Stamps every id with `time` instead of the current time.
    pub fn with_fixed_time(mut self, time: DateTime<Utc>) -> Self {
        self.fixed_time = Some(time);
        self
    }

    fn now_millis(&self) -> u64 {
        let now = self.fixed_time.unwrap_or_else(Utc::now);
        u64::try_from(now.timestamp_millis()).unwrap_or(0)
    }

    pub fn new_id(&self) -> Ulid {
        let ms = self.now_millis();
        let random: u128 = {
            let mut rng = self.entropy.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            rng.gen()
        };
        Ulid::from_parts(ms, random)
    }

    pub fn new_string(&self) -> String {
        self.new_id().to_string()
    }
}
