//! Tunable battle constants and presentation timing.
//!
//! Everything here has a default matching the classic handheld values, so a
//! config file only needs to list the fields it changes:
//!
//! ```ron
//! (
//!     paralysis_skip_chance: 50,
//!     timing: (letters_per_second: 60),
//! )
//! ```

use crate::errors::{DataError, DataResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Percent chance for a damaging hit to be critical.
    pub critical_hit_chance: f32,
    pub critical_multiplier: f32,
    /// Lower bound of the random damage roll; the upper bound is always 1.0.
    pub damage_roll_min: f32,

    /// Poison deals max HP / divisor at the end of each turn.
    pub poison_damage_divisor: u16,
    pub burn_damage_divisor: u16,
    pub confusion_damage_divisor: u16,
    pub paralysis_skip_chance: u8,
    pub freeze_thaw_chance: u8,
    pub confusion_self_hit_chance: u8,
    /// Inclusive range of turns a Pokemon stays asleep.
    pub sleep_turns: (u8, u8),
    pub confusion_turns: (u8, u8),

    pub timing: TimingConfig,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            critical_hit_chance: 6.25,
            critical_multiplier: 2.0,
            damage_roll_min: 0.85,
            poison_damage_divisor: 8,
            burn_damage_divisor: 16,
            confusion_damage_divisor: 8,
            paralysis_skip_chance: 25,
            freeze_thaw_chance: 25,
            confusion_self_hit_chance: 50,
            sleep_turns: (1, 3),
            confusion_turns: (1, 4),
            timing: TimingConfig::default(),
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(source_name: &str, text: &str) -> DataResult<Self> {
        ron::from_str(text).map_err(|error| DataError::Parse {
            source_name: source_name.to_string(),
            error,
        })
    }

    /// Load a config file, falling back to defaults for any missing field
    pub fn load(path: &Path) -> DataResult<Self> {
        let text = fs::read_to_string(path).map_err(|error| DataError::Io {
            path: path.display().to_string(),
            error,
        })?;
        Self::from_ron_str(&path.display().to_string(), &text)
    }
}

/// How long the presentation layer is given for each kind of step. The runner
/// sleeps for these durations before computing the next step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Narration reveal speed. Zero disables the reveal delay.
    pub letters_per_second: u32,
    /// Pause after a line has been fully revealed.
    pub message_pause_ms: u64,
    pub enter_animation_ms: u64,
    pub attack_animation_ms: u64,
    pub hit_animation_ms: u64,
    pub faint_animation_ms: u64,
    pub return_animation_ms: u64,
    pub hp_bar_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            letters_per_second: 30,
            message_pause_ms: 1000,
            enter_animation_ms: 1000,
            attack_animation_ms: 1000,
            hit_animation_ms: 0,
            faint_animation_ms: 2000,
            return_animation_ms: 2000,
            hp_bar_ms: 500,
        }
    }
}

impl TimingConfig {
    /// No pacing at all. Used by tests and headless simulations.
    pub fn instant() -> Self {
        Self {
            letters_per_second: 0,
            message_pause_ms: 0,
            enter_animation_ms: 0,
            attack_animation_ms: 0,
            hit_animation_ms: 0,
            faint_animation_ms: 0,
            return_animation_ms: 0,
            hp_bar_ms: 0,
        }
    }

    /// Time needed to type out `text` and hold it on screen
    pub fn message_duration(&self, text: &str) -> Duration {
        let reveal = if self.letters_per_second == 0 {
            Duration::ZERO
        } else {
            let letters = text.chars().count() as u64;
            Duration::from_millis(letters * 1000 / self.letters_per_second as u64)
        };
        reveal + Duration::from_millis(self.message_pause_ms)
    }
}
