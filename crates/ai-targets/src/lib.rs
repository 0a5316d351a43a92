//! Movement and gaze targets plus the per-tick cache of targetable nearby agents.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod cache;
pub mod look;
pub mod math;
pub mod memories;
pub mod sensor;
pub mod walk;
pub mod world;

pub use cache::LivingTargetCache;
pub use look::LookTarget;
pub use math::{BlockPos, Vec3};
pub use memories::{look_target, nearest_living_entities, visible_living_entities, walk_target};
pub use sensor::NearestLivingEntitySensor;
pub use walk::WalkTarget;
pub use world::TargetWorldView;
