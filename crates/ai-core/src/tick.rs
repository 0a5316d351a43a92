use crate::{rng, AgentId, SplitMix64};

/// Per-step inputs handed to every brain, sensor and task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    /// Monotonic simulation tick ("now"); drives memory expiry and refresh cooldowns.
    pub tick: u64,
    pub dt_seconds: f32,
    pub seed: u64,
    /// Absolute time of day in ticks. Reduced modulo the day length before schedule lookups.
    pub day_time: u64,
}

impl TickContext {
    pub fn new(tick: u64, day_time: u64) -> Self {
        Self {
            tick,
            dt_seconds: 0.05,
            seed: 0,
            day_time,
        }
    }

    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed ^ self.tick, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}
