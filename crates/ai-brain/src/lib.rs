//! Activity-gated task runtime built on `ai-core`.
//!
//! A `Brain` owns one agent's blackboard, sensors and task table. Each tick it expires
//! memories, runs sensors, starts the stopped tasks of every active activity (priority
//! ascending) and then ticks the running ones.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod activities;
pub mod behavior;
pub mod brain;
pub mod config;
pub mod persist;
pub mod profile;
pub mod sensor;
pub mod task;

pub use activities::ACTIVITY_REQUEST;
pub use behavior::{Behavior, BehaviorTask};
pub use brain::{tick_brains, Brain};
pub use config::BrainConfig;
pub use profile::BrainProfile;
pub use sensor::{Sensor, SensorType};
pub use task::{Task, TaskStatus};
