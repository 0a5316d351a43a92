use std::sync::Arc;

use ai_brain::{Behavior, BehaviorTask, Brain, BrainProfile, Task};
use ai_core::{Activity, Blackboard, MemoryModuleType, MemoryStatus, TickContext, WorldMut, WorldView};

const TARGET: MemoryModuleType<u64> = MemoryModuleType::new("target");
const TIRED: MemoryModuleType<bool> = MemoryModuleType::new("tired");

#[derive(Debug, Default)]
struct World {
    log: Vec<String>,
    refuse: bool,
}

impl WorldView for World {
    type Agent = u64;
}

impl WorldMut for World {}

/// Runs while `TIRED` is absent.
struct Stroll;

impl Behavior<World> for Stroll {
    fn check_extra_start_conditions(&mut self, _ctx: &TickContext, _agent: u64, world: &World, _bb: &Blackboard) -> bool {
        !world.refuse
    }

    fn start(&mut self, ctx: &TickContext, _agent: u64, world: &mut World, _bb: &mut Blackboard) {
        world.log.push(format!("start@{}", ctx.tick));
    }

    fn tick(&mut self, ctx: &TickContext, _agent: u64, world: &mut World, _bb: &mut Blackboard) {
        world.log.push(format!("tick@{}", ctx.tick));
    }

    fn can_still_use(&mut self, _ctx: &TickContext, _agent: u64, _world: &World, bb: &Blackboard) -> bool {
        !bb.has_value(TIRED)
    }

    fn stop(&mut self, ctx: &TickContext, _agent: u64, world: &mut World, _bb: &mut Blackboard) {
        world.log.push(format!("stop@{}", ctx.tick));
    }
}

/// Only overrides `start`.
struct Wave;

impl Behavior<World> for Wave {
    fn start(&mut self, _ctx: &TickContext, _agent: u64, world: &mut World, _bb: &mut Blackboard) {
        world.log.push("wave".to_string());
    }
}

fn brain() -> Brain<World> {
    Brain::new(1, Arc::new(BrainProfile::new([TARGET.slot(), TIRED.slot()], Vec::new())))
}

fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0)
}

#[test]
fn behavior_runs_until_its_duration_elapses() {
    let mut brain = brain();
    brain.add_activity(
        Activity::IDLE,
        0,
        vec![Box::new(BehaviorTask::new("stroll", Stroll).with_duration(3, 3)) as Box<dyn Task<World>>],
    );
    let mut world = World::default();

    for tick in 10..=13 {
        brain.tick(&ctx(tick), &mut world);
        assert!(brain.is_task_running("stroll"), "tick {tick}");
    }
    brain.tick(&ctx(14), &mut world);
    assert!(!brain.is_task_running("stroll"));

    assert_eq!(
        world.log,
        vec!["start@10", "tick@10", "tick@11", "tick@12", "tick@13", "stop@14"]
    );
}

#[test]
fn behavior_stops_when_it_can_no_longer_be_used() {
    let mut brain = brain();
    brain.add_activity(
        Activity::IDLE,
        0,
        vec![Box::new(BehaviorTask::new("stroll", Stroll).with_duration(100, 100)) as Box<dyn Task<World>>],
    );
    let mut world = World::default();

    brain.tick(&ctx(1), &mut world);
    brain.blackboard.set(TIRED, true);
    brain.tick(&ctx(2), &mut world);

    assert!(!brain.is_task_running("stroll"));
    assert_eq!(world.log, vec!["start@1", "tick@1", "stop@2"]);
}

#[test]
fn default_behavior_is_one_shot() {
    let mut brain = brain();
    brain.add_activity(
        Activity::IDLE,
        0,
        vec![Box::new(BehaviorTask::new("wave", Wave)) as Box<dyn Task<World>>],
    );
    let mut world = World::default();

    brain.tick(&ctx(1), &mut world);
    assert_eq!(world.log, vec!["wave"]);
    assert!(brain.running_tasks().is_empty());
}

#[test]
fn entry_conditions_gate_the_start() {
    let mut brain = brain();
    brain.add_activity(
        Activity::IDLE,
        0,
        vec![Box::new(
            BehaviorTask::new("stroll", Stroll)
                .with_entry_condition(TARGET, MemoryStatus::ValuePresent)
                .with_entry_condition(TIRED, MemoryStatus::ValueAbsent),
        ) as Box<dyn Task<World>>],
    );
    let mut world = World::default();

    brain.tick(&ctx(1), &mut world);
    assert!(world.log.is_empty());

    brain.blackboard.set(TARGET, 42);
    brain.blackboard.set(TIRED, true);
    brain.tick(&ctx(2), &mut world);
    assert!(world.log.is_empty());

    brain.blackboard.erase(TIRED);
    brain.tick(&ctx(3), &mut world);
    assert_eq!(world.log.first().map(String::as_str), Some("start@3"));
}

#[test]
fn extra_start_check_can_refuse() {
    let mut task = BehaviorTask::new("stroll", Stroll);
    let mut world = World {
        refuse: true,
        ..World::default()
    };
    let mut bb = Blackboard::new();

    assert!(!task.try_start(&ctx(1), 1, &mut world, &mut bb));
    world.refuse = false;
    assert!(task.try_start(&ctx(1), 1, &mut world, &mut bb));
}

#[test]
fn run_duration_is_deterministic_and_within_bounds() {
    let mut world = World::default();
    let mut bb = Blackboard::new();

    for agent in 0..32u64 {
        let mut task = BehaviorTask::new("stroll", Stroll).with_duration(5, 10);
        assert!(task.try_start(&ctx(100), agent, &mut world, &mut bb));
        let first = task.end_tick();
        assert!((105..=110).contains(&first), "agent {agent}: {first}");

        assert!(task.try_start(&ctx(100), agent, &mut world, &mut bb));
        assert_eq!(task.end_tick(), first);
    }
}

#[test]
fn unbounded_duration_does_not_overflow() {
    let mut world = World::default();
    let mut bb = Blackboard::new();

    let mut task = BehaviorTask::new("stroll", Stroll).with_duration(0, u64::MAX);
    assert!(task.try_start(&ctx(100), 3, &mut world, &mut bb));
    assert!(task.end_tick() >= 100);
}
