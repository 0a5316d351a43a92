use std::collections::BTreeSet;

use ai_core::{MemorySlot, WorldView};

use crate::activities::ACTIVITY_REQUEST;
use crate::SensorType;

/// Everything an agent kind may ever store or run: its memory slots and sensor kinds.
///
/// Build one profile per agent kind at start-up and share it (`Arc`) between all brains of that
/// kind. The declared slot set is the union of `memories`, every sensor's `requires()` and the
/// brain's internal `ACTIVITY_REQUEST` slot.
pub struct BrainProfile<W>
where
    W: WorldView + 'static,
{
    memories: Vec<MemorySlot>,
    sensors: Vec<SensorType<W>>,
    declared: BTreeSet<MemorySlot>,
}

impl<W> BrainProfile<W>
where
    W: WorldView + 'static,
{
    pub fn new(
        memories: impl IntoIterator<Item = MemorySlot>,
        sensors: impl IntoIterator<Item = SensorType<W>>,
    ) -> Self {
        let memories: Vec<MemorySlot> = memories.into_iter().collect();
        let sensors: Vec<SensorType<W>> = sensors.into_iter().collect();

        let mut declared: BTreeSet<MemorySlot> = memories.iter().copied().collect();
        for sensor_type in &sensors {
            declared.extend(sensor_type.create().requires());
        }
        declared.insert(ACTIVITY_REQUEST.slot());

        Self {
            memories,
            sensors,
            declared,
        }
    }

    /// Slots listed explicitly at construction.
    pub fn memories(&self) -> &[MemorySlot] {
        &self.memories
    }

    pub fn sensors(&self) -> &[SensorType<W>] {
        &self.sensors
    }

    /// Every slot a brain built from this profile declares.
    pub fn declared_slots(&self) -> impl Iterator<Item = MemorySlot> + '_ {
        self.declared.iter().copied()
    }

    pub fn declares(&self, slot: impl Into<MemorySlot>) -> bool {
        self.declared.contains(&slot.into())
    }
}

impl<W> std::fmt::Debug for BrainProfile<W>
where
    W: WorldView + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrainProfile")
            .field("declared", &self.declared)
            .field("sensors", &self.sensors)
            .finish()
    }
}
