use ai_core::{AgentId, Blackboard, MemoryValue};

use crate::{visible_living_entities, BlockPos, TargetWorldView, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Something an agent can look at: a fixed block or another agent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LookTarget<A> {
    Block(BlockPos),
    Agent {
        agent: A,
        /// Aim at the target's eyes instead of its feet.
        eye_height: bool,
    },
}

impl<A> LookTarget<A>
where
    A: AgentId,
{
    pub fn block(pos: BlockPos) -> Self {
        Self::Block(pos)
    }

    pub fn agent(agent: A, eye_height: bool) -> Self {
        Self::Agent { agent, eye_height }
    }

    pub fn target_agent(&self) -> Option<A> {
        match self {
            Self::Block(_) => None,
            Self::Agent { agent, .. } => Some(*agent),
        }
    }

    /// Point to aim at. `None` if the target agent is no longer in the world.
    pub fn position<W>(&self, world: &W) -> Option<Vec3>
    where
        W: TargetWorldView<Agent = A>,
    {
        match *self {
            Self::Block(pos) => Some(pos.center()),
            Self::Agent { agent, eye_height } => {
                let pos = world.position(agent)?;
                if eye_height {
                    Some(pos.with_y_offset(world.eye_height(agent)))
                } else {
                    Some(pos)
                }
            }
        }
    }

    /// Block the target occupies. For agents this is the block at their feet.
    pub fn block_position<W>(&self, world: &W) -> Option<BlockPos>
    where
        W: TargetWorldView<Agent = A>,
    {
        match *self {
            Self::Block(pos) => Some(pos),
            Self::Agent { agent, .. } => world.position(agent).map(BlockPos::from_vec3),
        }
    }

    /// Whether the target is still worth looking at from the agent owning `looker`.
    ///
    /// Blocks always are. An agent must be alive and a valid entry of the looker's current
    /// visible-entity cache; a looker without a cache sees nothing.
    pub fn is_visible_by<W>(&self, world: &W, looker: &Blackboard) -> bool
    where
        W: TargetWorldView<Agent = A> + 'static,
    {
        let Self::Agent { agent, .. } = *self else {
            return true;
        };
        if !world.is_alive(agent) {
            return false;
        }
        match looker.lookup(visible_living_entities::<W>()).value() {
            Some(cache) => cache.contains(world, agent),
            None => false,
        }
    }
}

impl<A: AgentId> MemoryValue for LookTarget<A> {}
