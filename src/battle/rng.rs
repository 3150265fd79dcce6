use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of every random decision made during a battle.
///
/// In play it wraps a seedable `StdRng`. Tests script the exact rolls instead,
/// so each outcome (hit, critical, damage roll, status chance) is pinned.
/// Every draw is a unit roll in `[0, 1)`; scripted rolls may also be exactly
/// `1.0` to pin the top of a range.
#[derive(Debug, Clone)]
pub struct BattleRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Std(StdRng),
    Scripted { rolls: Vec<f64>, index: usize },
}

impl BattleRng {
    pub fn from_os_rng() -> Self {
        Self {
            source: RngSource::Std(StdRng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Std(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_for_test(rolls: Vec<f64>) -> Self {
        Self {
            source: RngSource::Scripted { rolls, index: 0 },
        }
    }

    /// Draw the next unit roll. `reason` only feeds the trace log and the
    /// exhaustion message.
    pub fn next_roll(&mut self, reason: &str) -> f64 {
        let roll = match &mut self.source {
            RngSource::Std(rng) => rng.random::<f64>(),
            RngSource::Scripted { rolls, index } => {
                let Some(roll) = rolls.get(*index).copied() else {
                    panic!(
                        "BattleRng exhausted! Tried to get a value for: '{}'. Need more scripted rolls.",
                        reason
                    );
                };
                *index += 1;
                roll.clamp(0.0, 1.0)
            }
        };
        tracing::debug!(roll, reason, "rng draw");
        roll
    }

    /// A roll in `1..=100`.
    pub fn percent(&mut self, reason: &str) -> u8 {
        let roll = self.next_roll(reason);
        ((roll * 100.0) as u8 + 1).min(100)
    }

    /// True with `percent` percent probability.
    pub fn chance(&mut self, percent: u8, reason: &str) -> bool {
        self.percent(reason) <= percent
    }

    /// A value in `low..=high`.
    pub fn range_inclusive(&mut self, low: u8, high: u8, reason: &str) -> u8 {
        if high <= low {
            return low;
        }
        let span = (high - low) as f64 + 1.0;
        let offset = (self.next_roll(reason) * span) as u8;
        (low + offset).min(high)
    }

    /// An index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize, reason: &str) -> usize {
        assert!(len > 0, "cannot pick an index from an empty range ({reason})");
        let picked = (self.next_roll(reason) * len as f64) as usize;
        picked.min(len - 1)
    }

    /// A value in `[low, high]`.
    pub fn uniform(&mut self, low: f32, high: f32, reason: &str) -> f32 {
        low + (self.next_roll(reason) as f32) * (high - low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1)]
    #[case(0.249, 25)]
    #[case(0.25, 26)]
    #[case(0.999, 100)]
    #[case(1.0, 100)]
    fn test_percent_mapping(#[case] roll: f64, #[case] expected: u8) {
        let mut rng = BattleRng::new_for_test(vec![roll]);
        assert_eq!(rng.percent("test"), expected);
    }

    #[test]
    fn test_range_and_index_stay_in_bounds() {
        let mut rng = BattleRng::new_for_test(vec![0.0, 1.0, 0.0, 1.0, 0.5]);
        assert_eq!(rng.range_inclusive(1, 3, "low"), 1);
        assert_eq!(rng.range_inclusive(1, 3, "high"), 3);
        assert_eq!(rng.index(4, "first"), 0);
        assert_eq!(rng.index(4, "last"), 3);
        assert!((rng.uniform(0.85, 1.0, "mid") - 0.925).abs() < 1e-6);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = BattleRng::seeded(42);
        let mut b = BattleRng::seeded(42);
        for _ in 0..16 {
            assert_eq!(a.percent("a"), b.percent("b"));
        }
    }

    #[test]
    #[should_panic(expected = "BattleRng exhausted")]
    fn test_scripted_rng_panics_when_exhausted() {
        let mut rng = BattleRng::new_for_test(vec![]);
        rng.next_roll("nothing left");
    }
}
