use ai_core::DAY_LENGTH_TICKS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    /// Minimum ticks between two schedule-driven activity refreshes.
    ///
    /// A refresh happens only when strictly more than this many ticks have passed.
    pub activity_refresh_cooldown_ticks: u64,
    /// Day time is reduced modulo this before the schedule is consulted.
    pub day_length_ticks: u32,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            activity_refresh_cooldown_ticks: 20,
            day_length_ticks: DAY_LENGTH_TICKS,
        }
    }
}

impl BrainConfig {
    pub fn time_of_day(&self, day_time: u64) -> u32 {
        let day = u64::from(self.day_length_ticks.max(1));
        (day_time % day) as u32
    }

    pub fn refresh_due(&self, last_refresh: Option<u64>, now: u64) -> bool {
        match last_refresh {
            None => true,
            Some(last) => now.saturating_sub(last) > self.activity_refresh_cooldown_ticks,
        }
    }
}
