use ai_core::{AgentId, MemoryValue};

use crate::{BlockPos, LookTarget, TargetWorldView, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where an agent wants to walk, how fast and how close is close enough.
///
/// Written by tasks and consumed by the movement layer; this crate does not move agents.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WalkTarget<A> {
    target: LookTarget<A>,
    speed_modifier: f32,
    close_enough_dist: u32,
}

impl<A> WalkTarget<A>
where
    A: AgentId,
{
    pub fn new(target: LookTarget<A>, speed_modifier: f32, close_enough_dist: u32) -> Self {
        Self {
            target,
            speed_modifier,
            close_enough_dist,
        }
    }

    pub fn to_block(pos: BlockPos, speed_modifier: f32, close_enough_dist: u32) -> Self {
        Self::new(LookTarget::block(pos), speed_modifier, close_enough_dist)
    }

    /// Walk to the block containing `pos`.
    pub fn to_position(pos: Vec3, speed_modifier: f32, close_enough_dist: u32) -> Self {
        Self::to_block(BlockPos::from_vec3(pos), speed_modifier, close_enough_dist)
    }

    /// Follow another agent, aiming at its feet.
    pub fn to_agent(agent: A, speed_modifier: f32, close_enough_dist: u32) -> Self {
        Self::new(LookTarget::agent(agent, false), speed_modifier, close_enough_dist)
    }

    pub fn target(&self) -> &LookTarget<A> {
        &self.target
    }

    pub fn speed_modifier(&self) -> f32 {
        self.speed_modifier
    }

    pub fn close_enough_dist(&self) -> u32 {
        self.close_enough_dist
    }

    /// `true` once `from` is within `close_enough_dist` blocks of the target's block.
    pub fn is_reached_from<W>(&self, world: &W, from: Vec3) -> bool
    where
        W: TargetWorldView<Agent = A>,
    {
        let Some(goal) = self.target.block_position(world) else {
            return false;
        };
        BlockPos::from_vec3(from).chebyshev_distance(goal) <= self.close_enough_dist
    }
}

impl<A: AgentId> MemoryValue for WalkTarget<A> {}
