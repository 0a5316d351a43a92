use core::fmt::Debug;

/// Stable identifier for an agent.
///
/// Agent ids are used as keys in per-tick target caches and to derive per-agent RNG streams, so
/// they need:
/// - a total order (`Ord`) for deterministic map iteration
/// - a stable numeric ID (`stable_id`) for seeding and trace events
pub trait AgentId: Copy + Ord + Eq + Debug + 'static {
    fn stable_id(self) -> u64;
}

macro_rules! impl_agent_id {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AgentId for $ty {
                fn stable_id(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_agent_id!(u64, u32, usize);
