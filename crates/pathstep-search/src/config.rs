//! Run pacing and cost settings.

use std::time::Duration;

use crate::cost::{DEFAULT_HEURISTIC_WEIGHT, MAX_HEURISTIC_WEIGHT};

/// Settings for a [`RunController`](crate::RunController).
///
/// Delays are in milliseconds so the struct stays readable when loaded
/// from JSON. None of them affect which route is found; they only pace the
/// visualization and may all be zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchConfig {
    /// Initial pause after each expansion.
    pub step_delay_ms: u64,
    /// Chance that an expansion moving away from the goal shortens the
    /// step delay by one millisecond.
    pub delay_decay_chance: f64,
    /// Pause between route cells while the route is being marked.
    pub route_delay_ms: u64,
    /// Duration of each on/off phase of the failure flash.
    pub flash_delay_ms: u64,
    /// Number of on/off cycles in the failure flash.
    pub flash_count: u32,
    /// Heuristic weight `W` in `path_length + W * heuristic`. Must be > 1;
    /// values above [`MAX_HEURISTIC_WEIGHT`] are capped.
    pub heuristic_weight: i64,
    /// Seed for the pacing jitter; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 75,
            delay_decay_chance: 0.35,
            route_delay_ms: 60,
            flash_delay_ms: 150,
            flash_count: 2,
            heuristic_weight: DEFAULT_HEURISTIC_WEIGHT,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Every delay zero: runs complete as fast as the host allows.
    pub fn instant() -> Self {
        Self {
            step_delay_ms: 0,
            route_delay_ms: 0,
            flash_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Same settings with a fixed jitter seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[inline]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    #[inline]
    pub fn route_delay(&self) -> Duration {
        Duration::from_millis(self.route_delay_ms)
    }

    #[inline]
    pub fn flash_delay(&self) -> Duration {
        Duration::from_millis(self.flash_delay_ms)
    }

    /// The configured weight: the default when it is not above 1, capped
    /// at [`MAX_HEURISTIC_WEIGHT`].
    pub fn effective_weight(&self) -> i64 {
        match self.heuristic_weight {
            w if w <= 1 => {
                log::warn!("heuristic weight {w} is not above 1, using {DEFAULT_HEURISTIC_WEIGHT}");
                DEFAULT_HEURISTIC_WEIGHT
            }
            w if w > MAX_HEURISTIC_WEIGHT => {
                log::warn!("heuristic weight {w} is too large, using {MAX_HEURISTIC_WEIGHT}");
                MAX_HEURISTIC_WEIGHT
            }
            w => w,
        }
    }

    /// The decay chance clamped to a valid probability.
    #[inline]
    pub fn decay_chance(&self) -> f64 {
        if self.delay_decay_chance.is_nan() {
            0.0
        } else {
            self.delay_decay_chance.clamp(0.0, 1.0)
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let c: SearchConfig =
            serde_json::from_str(r#"{ "step_delay_ms": 10, "seed": 9 }"#).unwrap();
        assert_eq!(c.step_delay_ms, 10);
        assert_eq!(c.seed, Some(9));
        assert_eq!(c.route_delay_ms, 60);
    }

    #[test]
    fn config_round_trip() {
        let c = SearchConfig::instant().with_seed(3);
        let json = serde_json::to_string(&c).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
