use std::any::Any;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::codec::SlotCodec;

/// Untyped identity of a memory slot.
///
/// Equality, ordering and hashing are by name only. A slot optionally carries a codec, which
/// makes it persistent.
#[derive(Clone, Copy)]
pub struct MemorySlot {
    name: &'static str,
    codec: Option<SlotCodec>,
}

impl MemorySlot {
    pub const fn name(self) -> &'static str {
        self.name
    }

    pub const fn is_persistent(self) -> bool {
        self.codec.is_some()
    }

    pub(crate) fn codec(self) -> Option<SlotCodec> {
        self.codec
    }
}

impl fmt::Debug for MemorySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySlot")
            .field("name", &self.name)
            .field("persistent", &self.codec.is_some())
            .finish()
    }
}

impl fmt::Display for MemorySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl PartialEq for MemorySlot {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for MemorySlot {}

impl PartialOrd for MemorySlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MemorySlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(other.name)
    }
}

impl Hash for MemorySlot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Typed handle for a memory slot holding values of type `T`.
///
/// Declare these as `const`s. Reading a slot through a handle of the wrong type is a programming
/// error and panics (two handles with the same name must agree on `T`).
pub struct MemoryModuleType<T: 'static> {
    slot: MemorySlot,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for MemoryModuleType<T> {}

impl<T: 'static> Clone for MemoryModuleType<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for MemoryModuleType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MemoryModuleType").field(&self.slot.name).finish()
    }
}

impl<T: 'static> PartialEq for MemoryModuleType<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T: 'static> Eq for MemoryModuleType<T> {}

impl<T: 'static> MemoryModuleType<T> {
    /// A slot that is never persisted.
    pub const fn new(name: &'static str) -> Self {
        Self {
            slot: MemorySlot { name, codec: None },
            _phantom: PhantomData,
        }
    }

    pub const fn slot(self) -> MemorySlot {
        self.slot
    }

    pub const fn name(self) -> &'static str {
        self.slot.name
    }
}

impl<T> MemoryModuleType<T>
where
    T: MemoryValue + Serialize + DeserializeOwned,
{
    /// A slot whose memories are written by `Blackboard::encode` and restored on decode.
    pub const fn persistent(name: &'static str) -> Self {
        Self {
            slot: MemorySlot {
                name,
                codec: Some(SlotCodec::of::<T>()),
            },
            _phantom: PhantomData,
        }
    }
}

impl<T: 'static> From<MemoryModuleType<T>> for MemorySlot {
    fn from(value: MemoryModuleType<T>) -> Self {
        value.slot
    }
}

/// The state a slot can be required to be in by an activity precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MemoryStatus {
    /// The slot is declared; its value may or may not be present.
    Registered,
    ValuePresent,
    ValueAbsent,
}

/// A value that can be stored in a memory slot.
///
/// `is_empty_memory` is the explicit "empty collection means absent" hook: storing a value for
/// which it returns `true` erases the slot instead. Collections in `std` implement it with
/// `is_empty`; plain values keep the default `false`, so user types only need an empty impl:
///
/// ```
/// # use ai_core::MemoryValue;
/// #[derive(Clone)]
/// struct JobSite(i32, i32, i32);
/// impl MemoryValue for JobSite {}
/// ```
pub trait MemoryValue: Clone + 'static {
    fn is_empty_memory(&self) -> bool {
        false
    }
}

macro_rules! impl_memory_value {
    ($($ty:ty),* $(,)?) => {
        $(impl MemoryValue for $ty {})*
    };
}

impl_memory_value!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
);

macro_rules! impl_memory_value_collection {
    ($($ty:ident < $($param:ident),+ >),* $(,)?) => {
        $(
            impl<$($param: Clone + 'static),+> MemoryValue for $ty<$($param),+> {
                fn is_empty_memory(&self) -> bool {
                    self.is_empty()
                }
            }
        )*
    };
}

impl_memory_value_collection!(Vec<T>, VecDeque<T>, BTreeSet<T>, BTreeMap<K, V>);

impl<T: Clone + 'static, S: Clone + 'static> MemoryValue for HashSet<T, S> {
    fn is_empty_memory(&self) -> bool {
        self.is_empty()
    }
}

impl<K: Clone + 'static, V: Clone + 'static, S: Clone + 'static> MemoryValue for HashMap<K, V, S> {
    fn is_empty_memory(&self) -> bool {
        self.is_empty()
    }
}

impl<T: MemoryValue> MemoryValue for Rc<T> {
    fn is_empty_memory(&self) -> bool {
        T::is_empty_memory(self)
    }
}

impl<T: MemoryValue> MemoryValue for Arc<T> {
    fn is_empty_memory(&self) -> bool {
        T::is_empty_memory(self)
    }
}

impl<A: MemoryValue, B: MemoryValue> MemoryValue for (A, B) {}

impl<A: MemoryValue, B: MemoryValue, C: MemoryValue> MemoryValue for (A, B, C) {}

/// Object-safe view of a stored memory value.
pub(crate) trait StoredValue: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn clone_boxed(&self) -> Box<dyn StoredValue>;
    fn is_empty_value(&self) -> bool;
}

impl<T: MemoryValue> StoredValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn StoredValue> {
        Box::new(self.clone())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty_memory()
    }
}

/// A value plus its expiry counter.
///
/// `ttl == None` is permanent and never decrements. A timed memory loses one tick of ttl per
/// `tick()` and counts as expired once the counter reaches zero or below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory<T> {
    value: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ttl: Option<i64>,
}

impl<T> Memory<T> {
    pub fn permanent(value: T) -> Self {
        Self { value, ttl: None }
    }

    pub fn expiring(value: T, ttl_ticks: u64) -> Self {
        Self {
            value,
            ttl: Some(i64::try_from(ttl_ticks).unwrap_or(i64::MAX)),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn time_to_live(&self) -> Option<i64> {
        self.ttl
    }

    pub fn can_expire(&self) -> bool {
        self.ttl.is_some()
    }

    pub fn tick(&mut self) {
        if let Some(ttl) = self.ttl.as_mut() {
            *ttl -= 1;
        }
    }

    pub fn has_expired(&self) -> bool {
        matches!(self.ttl, Some(ttl) if ttl <= 0)
    }

    pub(crate) fn from_parts(value: T, ttl: Option<i64>) -> Self {
        Self { value, ttl }
    }

    pub(crate) fn into_parts(self) -> (T, Option<i64>) {
        (self.value, self.ttl)
    }

    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Memory<U> {
        Memory {
            value: f(self.value),
            ttl: self.ttl,
        }
    }

    pub(crate) fn as_ref(&self) -> Memory<&T> {
        Memory {
            value: &self.value,
            ttl: self.ttl,
        }
    }
}
