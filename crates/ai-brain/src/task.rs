use ai_core::{Blackboard, TickContext, WorldMut};

/// Run state of a task as tracked by the brain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Stopped,
    Running,
}

/// A behavior routine gated by an activity.
///
/// The brain owns each task's `TaskStatus` and drives the transitions:
/// - `try_start` is offered to stopped tasks of active activities; returning `false` is an
///   ordinary outcome and the task is offered again on a later tick.
/// - `tick` is called once per brain tick while running; returning `TaskStatus::Stopped` makes
///   the brain call `stop` right away.
/// - `stop` is also called when the brain force-stops everything.
pub trait Task<W>: 'static
where
    W: WorldMut + 'static,
{
    fn name(&self) -> &'static str;

    fn try_start(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> bool;

    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> TaskStatus;

    fn stop(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
    }
}
