//! Memory slots for target data.
//!
//! The value types are generic over the agent id (or the world), so the slots are `const fn`s
//! rather than constants. Every call returns the same slot.

use ai_core::{AgentId, MemoryModuleType};

use crate::{LivingTargetCache, LookTarget, TargetWorldView, WalkTarget};

pub const fn look_target<A: AgentId>() -> MemoryModuleType<LookTarget<A>> {
    MemoryModuleType::new("ai_targets:look_target")
}

pub const fn walk_target<A: AgentId>() -> MemoryModuleType<WalkTarget<A>> {
    MemoryModuleType::new("ai_targets:walk_target")
}

/// Living agents in range, nearest first. Absent when nothing is in range.
pub const fn nearest_living_entities<A: AgentId>() -> MemoryModuleType<Vec<A>> {
    MemoryModuleType::new("ai_targets:nearest_living_entities")
}

/// The targetable subset of `nearest_living_entities`, as a memoized cache.
pub const fn visible_living_entities<W>() -> MemoryModuleType<LivingTargetCache<W>>
where
    W: TargetWorldView + 'static,
{
    MemoryModuleType::new("ai_targets:visible_living_entities")
}
