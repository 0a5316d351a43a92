use ai_core::WorldView;

use crate::Vec3;

/// World queries needed to resolve targets and to populate the target cache.
pub trait TargetWorldView: WorldView {
    /// Feet position of `agent`, or `None` if it is not in the world.
    fn position(&self, agent: Self::Agent) -> Option<Vec3>;

    fn eye_height(&self, _agent: Self::Agent) -> f64 {
        0.0
    }

    fn is_alive(&self, agent: Self::Agent) -> bool;

    /// Line-of-sight plus whatever targeting rules the game applies.
    fn can_see(&self, looker: Self::Agent, target: Self::Agent) -> bool;

    /// Agents whose position lies within `radius` of `center`, in any order.
    fn nearby_agents(&self, center: Vec3, radius: f64) -> Vec<Self::Agent>;
}
