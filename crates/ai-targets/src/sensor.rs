use std::marker::PhantomData;

use ai_brain::{Sensor, SensorType};
use ai_core::{Blackboard, MemorySlot, TickContext};

use crate::{nearest_living_entities, visible_living_entities, LivingTargetCache, TargetWorldView};

/// Scans for living agents around the owner.
///
/// Each scan writes the living agents within `range` ordered by distance (ties by agent id) to
/// `nearest_living_entities`, and a fresh `LivingTargetCache` over the same list, valid for
/// agents the owner can see, to `visible_living_entities`.
pub struct NearestLivingEntitySensor<W> {
    range: f64,
    scan_rate: u32,
    _world: PhantomData<fn(&W)>,
}

impl<W> NearestLivingEntitySensor<W>
where
    W: TargetWorldView + 'static,
{
    pub const DEFAULT_RANGE: f64 = 16.0;
    pub const DEFAULT_SCAN_RATE: u32 = 20;

    pub fn new(range: f64) -> Self {
        Self {
            range,
            scan_rate: Self::DEFAULT_SCAN_RATE,
            _world: PhantomData,
        }
    }

    pub fn with_scan_rate(mut self, scan_rate: u32) -> Self {
        self.scan_rate = scan_rate.max(1);
        self
    }

    /// Profile registration entry using the default range and scan rate.
    pub fn sensor_type() -> SensorType<W> {
        SensorType::new("ai_targets:nearest_living_entities", make_default::<W>)
    }

    fn nearest(&self, agent: W::Agent, world: &W) -> Vec<W::Agent> {
        let Some(origin) = world.position(agent) else {
            return Vec::new();
        };
        let range_sq = self.range * self.range;

        let mut found: Vec<(f64, W::Agent)> = world
            .nearby_agents(origin, self.range)
            .into_iter()
            .filter(|other| *other != agent && world.is_alive(*other))
            .filter_map(|other| {
                let dist_sq = world.position(other)?.distance_squared(origin);
                (dist_sq <= range_sq).then_some((dist_sq, other))
            })
            .collect();
        found.sort_by(|(da, a), (db, b)| da.total_cmp(db).then_with(|| a.cmp(b)));
        found.into_iter().map(|(_, other)| other).collect()
    }
}

impl<W> Default for NearestLivingEntitySensor<W>
where
    W: TargetWorldView + 'static,
{
    fn default() -> Self {
        Self::new(Self::DEFAULT_RANGE)
    }
}

fn make_default<W>() -> Box<dyn Sensor<W>>
where
    W: TargetWorldView + 'static,
{
    Box::new(NearestLivingEntitySensor::<W>::default())
}

impl<W> Sensor<W> for NearestLivingEntitySensor<W>
where
    W: TargetWorldView + 'static,
{
    fn requires(&self) -> Vec<MemorySlot> {
        vec![
            nearest_living_entities::<W::Agent>().slot(),
            visible_living_entities::<W>().slot(),
        ]
    }

    fn scan_rate(&self) -> u32 {
        self.scan_rate
    }

    fn sense(&mut self, ctx: &TickContext, agent: W::Agent, world: &W, blackboard: &mut Blackboard) {
        let nearest = self.nearest(agent, world);
        tracing::trace!(agent = ?agent, tick = ctx.tick, found = nearest.len(), "scanned for living agents");

        let cache = LivingTargetCache::new(nearest.iter().copied(), move |world: &W, target| {
            world.can_see(agent, target)
        });
        blackboard.set(nearest_living_entities::<W::Agent>(), nearest);
        blackboard.set(visible_living_entities::<W>(), cache);
    }
}
