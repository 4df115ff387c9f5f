//! Sliding-window rate ledger keyed by submission source.

use dashmap::DashMap;

use crate::config::RateLimitConfig;

/// How many attempts a source gets and over what trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePolicy {
    pub max_attempts: usize,
    pub window_ms: u64,
}

impl RatePolicy {
    /// A timestamp exactly `window_ms` old is already expired.
    pub fn is_live(&self, stamp_ms: u64, now_ms: u64) -> bool {
        now_ms.saturating_sub(stamp_ms) < self.window_ms
    }
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self::from(&RateLimitConfig::default())
    }
}

impl From<&RateLimitConfig> for RatePolicy {
    fn from(config: &RateLimitConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            window_ms: config.window_ms,
        }
    }
}

/// Result of asking the ledger to admit one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Attempt recorded; `recent` includes it.
    Admitted { recent: usize },
    /// Quota used up; nothing was recorded.
    Limited { recent: usize },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

/// Storage for recent attempt timestamps.
///
/// `try_admit` must run its prune, count and append as one step per key:
/// two concurrent callers on the same key may never both take the last slot.
/// Distinct keys must not serialize behind each other.
pub trait RateLedger: Send + Sync {
    fn try_admit(&self, key: &str, now_ms: u64, policy: &RatePolicy) -> Admission;

    /// Drop every key whose timestamps have all expired. Returns how many were dropped.
    fn sweep(&self, now_ms: u64, policy: &RatePolicy) -> usize;

    /// Number of source keys currently held.
    fn tracked_keys(&self) -> usize;
}

/// In-process ledger. History is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: DashMap<String, Vec<u64>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamps currently kept for `key`, oldest first.
    pub fn history(&self, key: &str) -> Vec<u64> {
        self.entries
            .get(key)
            .map(|stamps| stamps.value().clone())
            .unwrap_or_default()
    }
}

impl RateLedger for MemoryLedger {
    fn try_admit(&self, key: &str, now_ms: u64, policy: &RatePolicy) -> Admission {
        // The entry guard holds the shard lock until it drops.
        let mut stamps = self.entries.entry(key.to_string()).or_default();
        stamps.retain(|&stamp| policy.is_live(stamp, now_ms));

        if stamps.len() >= policy.max_attempts {
            return Admission::Limited {
                recent: stamps.len(),
            };
        }

        stamps.push(now_ms);
        Admission::Admitted {
            recent: stamps.len(),
        }
    }

    fn sweep(&self, now_ms: u64, policy: &RatePolicy) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, stamps| {
            stamps.retain(|&stamp| policy.is_live(stamp, now_ms));
            if stamps.is_empty() {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    fn tracked_keys(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: u64 = 3_600_000;
    const T0: u64 = 1_700_000_000_000;

    fn policy() -> RatePolicy {
        RatePolicy {
            max_attempts: 5,
            window_ms: HOUR,
        }
    }

    #[test]
    fn test_five_per_window() {
        let ledger = MemoryLedger::new();
        for i in 1..=5 {
            assert_eq!(
                ledger.try_admit("1.2.3.4", T0 + i, &policy()),
                Admission::Admitted { recent: i as usize }
            );
        }
        assert_eq!(
            ledger.try_admit("1.2.3.4", T0 + 10_000, &policy()),
            Admission::Limited { recent: 5 }
        );
        // The rejected attempt left no trace.
        assert_eq!(ledger.history("1.2.3.4").len(), 5);
    }

    #[test]
    fn test_window_rolls_over() {
        let ledger = MemoryLedger::new();
        for _ in 0..5 {
            assert!(ledger.try_admit("k", T0, &policy()).is_admitted());
        }
        assert!(!ledger.try_admit("k", T0 + HOUR - 1, &policy()).is_admitted());
        assert_eq!(
            ledger.try_admit("k", T0 + HOUR + 1, &policy()),
            Admission::Admitted { recent: 1 }
        );
    }

    #[test]
    fn test_exact_window_age_is_expired() {
        let ledger = MemoryLedger::new();
        for _ in 0..5 {
            ledger.try_admit("k", T0, &policy());
        }
        assert!(ledger.try_admit("k", T0 + HOUR, &policy()).is_admitted());
        assert_eq!(ledger.history("k"), vec![T0 + HOUR]);
    }

    #[test]
    fn test_keys_are_independent() {
        let ledger = MemoryLedger::new();
        for _ in 0..5 {
            ledger.try_admit("a", T0, &policy());
        }
        assert!(!ledger.try_admit("a", T0, &policy()).is_admitted());
        assert!(ledger.try_admit("b", T0, &policy()).is_admitted());
    }

    #[test]
    fn test_sweep_drops_only_idle_keys() {
        let ledger = MemoryLedger::new();
        ledger.try_admit("old", T0, &policy());
        ledger.try_admit("mixed", T0, &policy());
        ledger.try_admit("mixed", T0 + HOUR / 2, &policy());
        ledger.try_admit("fresh", T0 + HOUR, &policy());
        assert_eq!(ledger.tracked_keys(), 3);

        let removed = ledger.sweep(T0 + HOUR + 1, &policy());
        assert_eq!(removed, 1);
        assert_eq!(ledger.tracked_keys(), 2);
        assert_eq!(ledger.history("mixed"), vec![T0 + HOUR / 2]);
        assert!(ledger.history("old").is_empty());
    }
}
