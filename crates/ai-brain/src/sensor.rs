use ai_core::rng::{self, DeterministicRng};
use ai_core::{AgentId, Blackboard, MemorySlot, SplitMix64, TickContext, WorldView};

/// A perception routine that writes an agent's memory.
///
/// Sensors only read the world. They are trusted to write only the slots listed in `requires`;
/// those slots are declared on every brain whose profile includes the sensor.
pub trait Sensor<W>: 'static
where
    W: WorldView + 'static,
{
    fn requires(&self) -> Vec<MemorySlot>;

    /// Sense every `scan_rate` brain ticks.
    fn scan_rate(&self) -> u32 {
        1
    }

    fn sense(&mut self, ctx: &TickContext, agent: W::Agent, world: &W, blackboard: &mut Blackboard);
}

/// Registration entry for a sensor kind in a `BrainProfile`.
pub struct SensorType<W>
where
    W: WorldView + 'static,
{
    name: &'static str,
    make: fn() -> Box<dyn Sensor<W>>,
}

impl<W> SensorType<W>
where
    W: WorldView + 'static,
{
    pub const fn new(name: &'static str, make: fn() -> Box<dyn Sensor<W>>) -> Self {
        Self { name, make }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn create(&self) -> Box<dyn Sensor<W>> {
        (self.make)()
    }
}

impl<W> Clone for SensorType<W>
where
    W: WorldView + 'static,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            make: self.make,
        }
    }
}

impl<W> std::fmt::Debug for SensorType<W>
where
    W: WorldView + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SensorType").field(&self.name).finish()
    }
}

/// One attached sensor plus its scan countdown.
pub(crate) struct SensorRunner<W>
where
    W: WorldView + 'static,
{
    name: &'static str,
    sensor: Box<dyn Sensor<W>>,
    countdown: i64,
}

impl<W> SensorRunner<W>
where
    W: WorldView + 'static,
{
    /// The first scan lands at a per-agent offset in `0..scan_rate` so that agents created on
    /// the same tick do not all scan together.
    pub(crate) fn new(index: usize, sensor_type: &SensorType<W>, agent: W::Agent) -> Self {
        let sensor = sensor_type.create();
        let seed = rng::derive_seed(0, agent.stable_id(), index as u64);
        let countdown = SplitMix64::new(seed).next_below(u64::from(sensor.scan_rate())) as i64;
        Self {
            name: sensor_type.name(),
            sensor,
            countdown,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &W,
        blackboard: &mut Blackboard,
    ) {
        self.countdown -= 1;
        if self.countdown <= 0 {
            self.countdown = i64::from(self.sensor.scan_rate().max(1));
            self.sensor.sense(ctx, agent, world, blackboard);
        }
    }
}
