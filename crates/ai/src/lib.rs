//! Umbrella crate that re-exports the `ai-*` building blocks.
//!
//! - `core`: memories, activities and schedules (`ai-core`)
//! - `brain`: the per-agent brain, sensors and tasks (`ai-brain`)
//! - `targets`: look/walk targets and the living target cache (`ai-targets`)
//! - `tools`: decision tracing (`ai-tools`)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use ai_core as core;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use ai_tools as tools;

#[cfg(feature = "brain")]
#[cfg_attr(docsrs, doc(cfg(feature = "brain")))]
pub use ai_brain as brain;

#[cfg(feature = "targets")]
#[cfg_attr(docsrs, doc(cfg(feature = "targets")))]
pub use ai_targets as targets;
