//! Deterministic, engine-agnostic decision kernel primitives.
//!
//! This crate holds the data side of an agent's decision cycle: the typed, expiring memory
//! store (`Blackboard`), activity tags and the time-of-day `Schedule`. The runtime that ticks
//! sensors and tasks against them lives in `ai-brain`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod activity;
pub mod agent;
pub mod blackboard;
pub mod codec;
pub mod memory;
pub mod rng;
pub mod schedule;
pub mod tick;
pub mod world;

pub use activity::Activity;
pub use agent::AgentId;
pub use blackboard::{Blackboard, MemoryLookup};
pub use codec::{CodecError, DecodeReport};
pub use memory::{Memory, MemoryModuleType, MemorySlot, MemoryStatus, MemoryValue};
pub use rng::{DeterministicRng, SplitMix64};
pub use schedule::{Schedule, ScheduleBuilder, ScheduleRule, ScheduleRuleEntry, DAY_LENGTH_TICKS};
pub use tick::TickContext;
pub use world::{WorldMut, WorldView};
