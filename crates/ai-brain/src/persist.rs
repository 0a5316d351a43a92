use std::sync::Arc;

use ai_core::{CodecError, DecodeReport, WorldMut};
use serde_json::{Map, Value};

use crate::{Brain, BrainProfile};

const MEMORIES_KEY: &str = "memories";

impl<W> Brain<W>
where
    W: WorldMut + 'static,
{
    /// Persisted form of this brain: `{"memories": {...}}`.
    ///
    /// Only slots created with `MemoryModuleType::persistent` are written.
    pub fn encode(&self) -> Value {
        let mut root = Map::new();
        root.insert(MEMORIES_KEY.to_string(), self.blackboard.encode());
        Value::Object(root)
    }

    /// Load memories written by `encode` into this brain.
    ///
    /// Bad entries are skipped individually; see `Blackboard::decode_from`.
    pub fn restore(&mut self, data: &Value) -> DecodeReport {
        match data.get(MEMORIES_KEY) {
            Some(memories) => self.blackboard.decode_from(memories),
            None => {
                let err = CodecError::Malformed(format!("missing `{MEMORIES_KEY}` field"));
                tracing::warn!(agent = ?self.agent, error = %err, "failed to decode brain");
                DecodeReport {
                    loaded: 0,
                    errors: vec![(MEMORIES_KEY.to_string(), err)],
                }
            }
        }
    }

    /// A new brain for `agent` populated from persisted state.
    pub fn decode(agent: W::Agent, profile: Arc<BrainProfile<W>>, data: &Value) -> (Self, DecodeReport) {
        let mut brain = Brain::new(agent, profile);
        let report = brain.restore(data);
        (brain, report)
    }
}
