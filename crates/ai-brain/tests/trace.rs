use std::sync::Arc;

use ai_brain::{Brain, BrainProfile, Task, TaskStatus};
use ai_core::{Activity, Blackboard, MemoryModuleType, TickContext, WorldMut, WorldView};
use ai_tools::{TraceLog, TRACE_LOG};

const FLAG: MemoryModuleType<bool> = MemoryModuleType::new("flag");

#[derive(Debug, Default)]
struct World;

impl WorldView for World {
    type Agent = u64;
}

impl WorldMut for World {}

struct Blink;

impl Task<World> for Blink {
    fn name(&self) -> &'static str {
        "blink"
    }

    fn try_start(&mut self, _ctx: &TickContext, _agent: u64, _world: &mut World, _bb: &mut Blackboard) -> bool {
        true
    }

    fn tick(&mut self, _ctx: &TickContext, _agent: u64, _world: &mut World, _bb: &mut Blackboard) -> TaskStatus {
        TaskStatus::Stopped
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("ai_brain=trace")
        .with_test_writer()
        .try_init();
}

#[test]
fn brain_records_decisions_in_the_trace_log() {
    init_logging();
    let profile = Arc::new(BrainProfile::new([TRACE_LOG.slot(), FLAG.slot()], Vec::new()));
    let mut brain = Brain::new(5, profile);
    brain.add_activity(Activity::IDLE, 4, vec![Box::new(Blink) as Box<dyn Task<World>>]);
    brain.add_activity(Activity::WORK, 0, Vec::new());
    brain.blackboard.set(TRACE_LOG, TraceLog::default());
    brain.blackboard.set_with_expiry(FLAG, true, 0);

    let mut world = World;
    brain.tick(&TickContext::new(3, 0), &mut world);
    brain.do_exclusively(Activity::WORK);

    let log = brain.blackboard.get(TRACE_LOG).cloned().unwrap_or_default();
    let tags: Vec<&str> = log.events.iter().map(|e| &*e.tag).collect();
    assert_eq!(
        tags,
        vec![
            "brain.memory.expired",
            "brain.task.start",
            "brain.task.stop",
            "brain.activity",
        ]
    );

    let start = &log.events[1];
    assert_eq!(start.tick, 3);
    assert_eq!(start.detail, "blink");
    assert_eq!(start.a, 5);
    assert_eq!(start.b, 4);
    assert_eq!(log.events[0].detail, "flag");
    assert_eq!(log.events[3].detail, "work");
}

#[test]
fn brain_without_trace_slot_runs_untraced() {
    let profile = Arc::new(BrainProfile::new([FLAG.slot()], Vec::new()));
    let mut brain = Brain::new(5, profile);
    brain.add_activity(Activity::IDLE, 0, vec![Box::new(Blink) as Box<dyn Task<World>>]);

    let mut world = World;
    brain.tick(&TickContext::new(1, 0), &mut world);
    assert!(!brain.blackboard.is_registered(TRACE_LOG));
}

#[test]
fn negative_priorities_are_traced_losslessly() {
    let profile = Arc::new(BrainProfile::new([TRACE_LOG.slot()], Vec::new()));
    let mut brain = Brain::new(5, profile);
    brain.add_activity(Activity::IDLE, -3, vec![Box::new(Blink) as Box<dyn Task<World>>]);
    brain.blackboard.set(TRACE_LOG, TraceLog::default());

    let mut world = World;
    brain.tick(&TickContext::new(1, 0), &mut world);

    let log = brain.blackboard.get(TRACE_LOG).cloned().unwrap_or_default();
    let start = log.tagged("brain.task.start").next().cloned();
    assert_eq!(start.map(|e| e.b_signed()), Some(-3));
}
