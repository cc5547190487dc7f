use crate::model::rules::RuleVariant;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BOT_TURN_MS: u64 = 1_000;
const DEFAULT_TRICK_DISPLAY_MS: u64 = 2_000;
const DEFAULT_NEXT_ROUND_MS: u64 = 3_000;
const DEFAULT_RESUME_MS: u64 = 1_000;

/// Rule set plus pacing. There is deliberately no default variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: RuleVariant,
    #[serde(default)]
    pub delays: Delays,
}

impl GameConfig {
    pub const fn new(variant: RuleVariant) -> Self {
        Self {
            variant,
            delays: Delays::standard(),
        }
    }

    pub const fn with_delays(mut self, delays: Delays) -> Self {
        self.delays = delays;
        self
    }
}

/// Waits between scheduled actions, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delays {
    /// Bot "thinking time" before a declaration or a play.
    pub bot_turn_ms: u64,
    /// How long a resolved trick stays on the table.
    pub trick_display_ms: u64,
    /// Pause on the scoring screen before the next deal.
    pub next_round_ms: u64,
    /// Wait before a restored game hands the turn back to a bot.
    pub resume_ms: u64,
}

impl Delays {
    pub const fn standard() -> Self {
        Self {
            bot_turn_ms: DEFAULT_BOT_TURN_MS,
            trick_display_ms: DEFAULT_TRICK_DISPLAY_MS,
            next_round_ms: DEFAULT_NEXT_ROUND_MS,
            resume_ms: DEFAULT_RESUME_MS,
        }
    }

    pub const fn immediate() -> Self {
        Self {
            bot_turn_ms: 0,
            trick_display_ms: 0,
            next_round_ms: 0,
            resume_ms: 0,
        }
    }

    pub const fn bot_turn(&self) -> Duration {
        Duration::from_millis(self.bot_turn_ms)
    }

    pub const fn trick_display(&self) -> Duration {
        Duration::from_millis(self.trick_display_ms)
    }

    pub const fn next_round(&self) -> Duration {
        Duration::from_millis(self.next_round_ms)
    }

    pub const fn resume(&self) -> Duration {
        Duration::from_millis(self.resume_ms)
    }
}

impl Default for Delays {
    fn default() -> Self {
        Self::standard()
    }
}
