//! Deterministic source rotation.
//!
//! The day's lineup is a pure function of the UTC date: SHA-256 of the ISO
//! date string seeds a deterministic shuffle of the pool, truncated to at
//! most five sources. The hour picks a starting slot so scheduled runs at
//! different hours begin at different sources while sharing the same
//! shuffle, with no state persisted between runs.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

/// Lineup cap per day.
const MAX_LINEUP: usize = 5;

/// Fixed hour-of-day to starting-slot table. Hours not listed start at
/// slot 0.
fn slot_for_hour(hour: u32) -> usize {
    match hour {
        9 => 0,
        12 => 1,
        15 => 2,
        18 => 3,
        21 => 4,
        _ => 0,
    }
}

/// Compute the ordered sources to try for a run at `date`/`hour` (UTC).
pub fn lineup_for(pool: &[String], date: NaiveDate, hour: u32) -> Vec<String> {
    if pool.is_empty() {
        return Vec::new();
    }

    let seed: [u8; 32] = Sha256::digest(date.format("%Y-%m-%d").to_string().as_bytes()).into();
    let mut rng = StdRng::from_seed(seed);

    let mut lineup: Vec<String> = pool.to_vec();
    lineup.shuffle(&mut rng);
    lineup.truncate(MAX_LINEUP);

    // Slot indices wrap when the pool is smaller than the slot table.
    let slot = slot_for_hour(hour) % lineup.len();
    lineup.rotate_left(slot);
    lineup
}
