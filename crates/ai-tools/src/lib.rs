//! Tooling primitives for deterministic game AI.
//!
//! Decision tracing lives here: brains, sensors and tasks append `TraceEvent`s to an agent's
//! `TRACE_LOG` memory slot when the agent's profile declares it. Rendering and inspection belong
//! in dedicated adapter crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{emit, is_tracing, TraceEvent, TraceLog, TRACE_LOG};
