#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use ai_core::{Blackboard, MemoryModuleType, MemoryValue};

/// A small, allocation-friendly trace event.
///
/// Plain data so it can be recorded during simulation and rendered later by tooling. `a` and `b`
/// carry event-specific numbers (agent ids, task priorities, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub detail: Cow<'static, str>,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            detail: Cow::Borrowed(""),
            a: 0,
            b: 0,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Cow<'static, str>>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }

    /// Store a signed number (such as a task priority) in `b` as its two's-complement bits.
    pub fn with_b_signed(mut self, b: i64) -> Self {
        self.b = b as u64;
        self
    }

    /// `b` read back as written by `with_b_signed`.
    pub fn b_signed(&self) -> i64 {
        self.b as i64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }
}

// An empty log is still a log: recording must not be switched off by clearing it.
impl MemoryValue for TraceLog {}

/// Memory slot collecting trace events in-memory.
///
/// Add it to a brain profile and store a `TraceLog::default()` to start recording.
pub const TRACE_LOG: MemoryModuleType<TraceLog> = MemoryModuleType::new("ai_tools:trace_log");

/// `true` if `blackboard` is currently recording.
pub fn is_tracing(blackboard: &Blackboard) -> bool {
    blackboard.has_value(TRACE_LOG)
}

/// Append `event` to the agent's trace log. No-op if the slot is undeclared or empty.
pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if !is_tracing(blackboard) {
        return;
    }
    if let Some(log) = blackboard.get_mut(TRACE_LOG) {
        log.push(event);
    }
}
