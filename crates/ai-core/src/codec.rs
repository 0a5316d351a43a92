use std::any::Any;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::memory::{MemoryValue, StoredValue};

/// Errors produced while persisting or restoring memories.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown memory slot `{0}`")]
    UnknownSlot(String),

    #[error("memory slot `{0}` is not persistent")]
    NotPersistent(String),

    #[error("malformed memory data: {0}")]
    Malformed(String),

    #[error("memory slot `{0}` holds a value of a different type than its codec")]
    TypeMismatch(&'static str),
}

pub type Result<T> = std::result::Result<T, CodecError>;

/// Outcome of restoring a whole blackboard.
///
/// Decoding never aborts on a bad entry; each failure is recorded here and the entry skipped.
#[derive(Debug, Default)]
pub struct DecodeReport {
    pub loaded: usize,
    pub errors: Vec<(String, CodecError)>,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Type-erased encode/decode pair for one slot's value type.
///
/// Built at compile time from `T: Serialize + DeserializeOwned`, so a persistent slot can be
/// restored from its name alone.
#[derive(Clone, Copy)]
pub(crate) struct SlotCodec {
    pub(crate) encode: fn(&'static str, &dyn Any) -> Result<Value>,
    pub(crate) decode: fn(Value) -> Result<Box<dyn StoredValue>>,
}

impl SlotCodec {
    pub(crate) const fn of<T>() -> Self
    where
        T: MemoryValue + Serialize + DeserializeOwned,
    {
        Self {
            encode: encode_value::<T>,
            decode: decode_value::<T>,
        }
    }
}

fn encode_value<T>(slot: &'static str, value: &dyn Any) -> Result<Value>
where
    T: MemoryValue + Serialize,
{
    let value = value
        .downcast_ref::<T>()
        .ok_or(CodecError::TypeMismatch(slot))?;
    Ok(serde_json::to_value(value)?)
}

fn decode_value<T>(value: Value) -> Result<Box<dyn StoredValue>>
where
    T: MemoryValue + DeserializeOwned,
{
    let value: T = serde_json::from_value(value)?;
    Ok(Box::new(value))
}
