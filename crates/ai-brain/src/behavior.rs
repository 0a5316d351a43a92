use ai_core::rng::DeterministicRng;
use ai_core::{Blackboard, MemorySlot, MemoryStatus, TickContext, WorldMut};

use crate::{Task, TaskStatus};

const DURATION_STREAM: u64 = 0xB3_4A_71_0D;

/// Hooks for a memory-gated, time-limited task. Wrap it in a `BehaviorTask` to register it.
///
/// Every hook has a default, so one-shot behaviors typically implement only `start`.
pub trait Behavior<W>: 'static
where
    W: WorldMut + 'static,
{
    fn check_extra_start_conditions(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &W,
        _blackboard: &Blackboard,
    ) -> bool {
        true
    }

    fn start(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
    }

    fn tick(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
    }

    /// Keep running until the run duration elapses. The default stops on the first tick.
    fn can_still_use(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &W,
        _blackboard: &Blackboard,
    ) -> bool {
        false
    }

    fn stop(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
    }
}

/// Adapts a `Behavior` into a `Task`.
///
/// Starting requires every entry condition to hold and the behavior's extra check to pass. On
/// start a run duration is drawn from `min_duration..=max_duration` (deterministic per agent and
/// tick); the task stops once the tick passes `start + duration` or `can_still_use` fails.
pub struct BehaviorTask<B> {
    name: &'static str,
    behavior: B,
    entry_conditions: Vec<(MemorySlot, MemoryStatus)>,
    min_duration: u64,
    max_duration: u64,
    end_tick: u64,
}

impl<B> BehaviorTask<B> {
    pub fn new(name: &'static str, behavior: B) -> Self {
        Self {
            name,
            behavior,
            entry_conditions: Vec::new(),
            min_duration: 60,
            max_duration: 60,
            end_tick: 0,
        }
    }

    pub fn with_entry_condition(mut self, slot: impl Into<MemorySlot>, status: MemoryStatus) -> Self {
        self.entry_conditions.push((slot.into(), status));
        self
    }

    pub fn with_duration(mut self, min_duration: u64, max_duration: u64) -> Self {
        self.min_duration = min_duration;
        self.max_duration = max_duration;
        self
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn entry_conditions(&self) -> &[(MemorySlot, MemoryStatus)] {
        &self.entry_conditions
    }

    pub fn end_tick(&self) -> u64 {
        self.end_tick
    }

    fn has_required_memories(&self, blackboard: &Blackboard) -> bool {
        self.entry_conditions
            .iter()
            .all(|(slot, status)| blackboard.check_status(*slot, *status))
    }
}

impl<W, B> Task<W> for BehaviorTask<B>
where
    W: WorldMut + 'static,
    B: Behavior<W>,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn try_start(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> bool {
        if !self.has_required_memories(blackboard) {
            return false;
        }
        if !self
            .behavior
            .check_extra_start_conditions(ctx, agent, world, blackboard)
        {
            return false;
        }

        let duration = ctx
            .rng_for_agent(agent, DURATION_STREAM)
            .next_in_range(self.min_duration, self.max_duration);
        self.end_tick = ctx.tick.saturating_add(duration);
        self.behavior.start(ctx, agent, world, blackboard);
        true
    }

    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> TaskStatus {
        let timed_out = ctx.tick > self.end_tick;
        if timed_out || !self.behavior.can_still_use(ctx, agent, world, blackboard) {
            return TaskStatus::Stopped;
        }
        self.behavior.tick(ctx, agent, world, blackboard);
        TaskStatus::Running
    }

    fn stop(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        self.behavior.stop(ctx, agent, world, blackboard);
    }
}
