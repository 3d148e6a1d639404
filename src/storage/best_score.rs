//! Monotonic best-score records, one per tier plus a global best.

use super::KeyValueStore;

pub const BEST_KEY: &str = "quizBest";
const BEST_KEY_PREFIX: &str = "quizBest_";

/// Storage key of the best score for a tier (question count).
pub fn tier_key(tier: usize) -> String {
    format!("{}{}", BEST_KEY_PREFIX, tier)
}

/// Reads the numeric value under `key`; 0 when absent, non-numeric or the
/// store is unreachable.
pub fn load_best<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> usize {
    match store.get(key) {
        Ok(Some(raw)) => parse_score(&raw),
        Ok(None) => 0,
        Err(e) => {
            log::debug!("load_best({}) skipped: {}", key, e);
            0
        }
    }
}

pub fn load_best_for<S: KeyValueStore + ?Sized>(store: &S, tier: usize) -> usize {
    load_best(store, &tier_key(tier))
}

pub fn load_global_best<S: KeyValueStore + ?Sized>(store: &S) -> usize {
    load_best(store, BEST_KEY)
}

/// Stores `score` for `tier` if it beats the stored value, then applies the
/// same rule to the global best.
pub fn save_best_if_higher<S: KeyValueStore + ?Sized>(store: &mut S, tier: usize, score: usize) {
    write_if_higher(store, &tier_key(tier), score);
    write_if_higher(store, BEST_KEY, score);
}

fn write_if_higher<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, score: usize) {
    if score <= load_best(store, key) {
        return;
    }
    match store.set(key, &score.to_string()) {
        Ok(()) => log::info!("new best {} = {}", key, score),
        Err(e) => log::debug!("save_best({}) skipped: {}", key, e),
    }
}

fn parse_score(raw: &str) -> usize {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n as usize,
        _ => 0,
    }
}
