use crate::AgentId;

/// Read-only world access.
///
/// The brain itself never queries the world; only sensors and tasks do. Subsystems that need
/// concrete queries (positions, liveness, line of sight) define extension traits on top of this,
/// see `ai_targets::TargetWorldView`.
pub trait WorldView {
    type Agent: AgentId;
}

/// Write access / effect sink used by running tasks.
pub trait WorldMut: WorldView {}
