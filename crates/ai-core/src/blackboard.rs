use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::codec::{CodecError, DecodeReport, Result};
use crate::memory::{Memory, MemoryModuleType, MemorySlot, MemoryStatus, MemoryValue, StoredValue};

/// Result of a non-panicking read.
#[derive(Debug, PartialEq)]
pub enum MemoryLookup<'a, T> {
    /// The slot is not part of this agent's profile.
    Unregistered,
    Absent,
    Present(&'a T),
}

impl<'a, T> MemoryLookup<'a, T> {
    pub fn value(self) -> Option<&'a T> {
        match self {
            MemoryLookup::Present(value) => Some(value),
            MemoryLookup::Unregistered | MemoryLookup::Absent => None,
        }
    }

    pub fn is_registered(&self) -> bool {
        !matches!(self, MemoryLookup::Unregistered)
    }
}

struct SlotEntry {
    slot: MemorySlot,
    memory: Option<Memory<Box<dyn StoredValue>>>,
}

/// An agent's typed, expiring memory store.
///
/// The set of slots is fixed at construction. Every declared slot is either absent or holds one
/// `Memory`; touching a slot that was never declared is a contract violation and panics.
#[derive(Default)]
pub struct Blackboard {
    slots: BTreeMap<&'static str, SlotEntry>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A blackboard declaring exactly `slots`, all absent.
    pub fn with_slots(slots: impl IntoIterator<Item = MemorySlot>) -> Self {
        let slots = slots
            .into_iter()
            .map(|slot| (slot.name(), SlotEntry { slot, memory: None }))
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> impl Iterator<Item = MemorySlot> + '_ {
        self.slots.values().map(|entry| entry.slot)
    }

    pub fn is_registered(&self, slot: impl Into<MemorySlot>) -> bool {
        self.slots.contains_key(slot.into().name())
    }

    /// Store a permanent memory.
    pub fn set<T: MemoryValue>(&mut self, key: MemoryModuleType<T>, value: T) {
        self.set_memory(key, Memory::permanent(value));
    }

    /// Store a memory that stays present through `ttl_ticks` calls to `tick_expiry`.
    pub fn set_with_expiry<T: MemoryValue>(
        &mut self,
        key: MemoryModuleType<T>,
        value: T,
        ttl_ticks: u64,
    ) {
        self.set_memory(key, Memory::expiring(value, ttl_ticks));
    }

    /// `Some` stores a permanent memory, `None` erases the slot.
    pub fn set_optional<T: MemoryValue>(&mut self, key: MemoryModuleType<T>, value: Option<T>) {
        match value {
            Some(value) => self.set(key, value),
            None => self.erase(key),
        }
    }

    /// Store a prepared memory. Values reporting `is_empty_memory` erase the slot instead.
    pub fn set_memory<T: MemoryValue>(&mut self, key: MemoryModuleType<T>, memory: Memory<T>) {
        let entry = self.entry_mut(key.name());
        if memory.value().is_empty_memory() {
            entry.memory = None;
        } else {
            entry.memory = Some(memory.map(|v| Box::new(v) as Box<dyn StoredValue>));
        }
    }

    pub fn erase(&mut self, slot: impl Into<MemorySlot>) {
        let slot = slot.into();
        self.entry_mut(slot.name()).memory = None;
    }

    /// Forget every value; declarations are kept.
    pub fn clear(&mut self) {
        for entry in self.slots.values_mut() {
            entry.memory = None;
        }
    }

    pub fn get<T: MemoryValue>(&self, key: MemoryModuleType<T>) -> Option<&T> {
        let memory = self.entry(key.name()).memory.as_ref()?;
        Some(downcast_ref(key.name(), &**memory.value()))
    }

    /// Mutable access to a present value.
    ///
    /// A collection emptied through this handle stays readable as present until the next
    /// `tick_expiry`, which erases it.
    pub fn get_mut<T: MemoryValue>(&mut self, key: MemoryModuleType<T>) -> Option<&mut T> {
        let memory = self.entry_mut(key.name()).memory.as_mut()?;
        let value = memory.value_mut().as_any_mut().downcast_mut::<T>();
        Some(value.unwrap_or_else(|| type_mismatch(key.name())))
    }

    /// Read a slot without asserting that it is declared.
    pub fn lookup<T: MemoryValue>(&self, key: MemoryModuleType<T>) -> MemoryLookup<'_, T> {
        match self.slots.get(key.name()) {
            None => MemoryLookup::Unregistered,
            Some(SlotEntry { memory: None, .. }) => MemoryLookup::Absent,
            Some(SlotEntry {
                memory: Some(memory),
                ..
            }) => MemoryLookup::Present(downcast_ref(key.name(), &**memory.value())),
        }
    }

    /// `true` if the slot is declared and holds a value. Undeclared slots report `false`.
    pub fn has_value(&self, slot: impl Into<MemorySlot>) -> bool {
        self.check_status(slot, MemoryStatus::ValuePresent)
    }

    pub fn has_value_equal<T>(&self, key: MemoryModuleType<T>, value: &T) -> bool
    where
        T: MemoryValue + PartialEq,
    {
        self.get(key) == Some(value)
    }

    pub fn check_status(&self, slot: impl Into<MemorySlot>, status: MemoryStatus) -> bool {
        let Some(entry) = self.slots.get(slot.into().name()) else {
            return false;
        };
        match status {
            MemoryStatus::Registered => true,
            MemoryStatus::ValuePresent => entry.memory.is_some(),
            MemoryStatus::ValueAbsent => entry.memory.is_none(),
        }
    }

    /// Remaining ticks of a timed memory; `None` if absent or permanent.
    pub fn time_until_expiry(&self, slot: impl Into<MemorySlot>) -> Option<i64> {
        let slot = slot.into();
        self.entry(slot.name())
            .memory
            .as_ref()
            .and_then(|m| m.time_to_live())
    }

    /// Drop every memory whose counter has run out, then advance the survivors by one tick.
    ///
    /// A memory stored with ttl `n` survives `n` passes and is removed by pass `n + 1`. Values
    /// emptied in place through `get_mut` are removed here as well. Returns the removed slots in
    /// slot-name order.
    pub fn tick_expiry(&mut self) -> Vec<MemorySlot> {
        let mut expired = Vec::new();
        for entry in self.slots.values_mut() {
            let Some(memory) = entry.memory.as_mut() else {
                continue;
            };
            if memory.has_expired() || memory.value().is_empty_value() {
                entry.memory = None;
                expired.push(entry.slot);
                continue;
            }
            memory.tick();
        }
        expired
    }

    /// Copy every present memory of `other` whose slot is also declared here.
    pub fn copy_present_from(&mut self, other: &Blackboard) {
        for (name, source) in &other.slots {
            let (Some(memory), Some(target)) = (source.memory.as_ref(), self.slots.get_mut(name))
            else {
                continue;
            };
            target.memory = Some(memory.as_ref().map(|v| (**v).clone_boxed()));
        }
    }

    /// Encode every present memory of a persistent slot as
    /// `{"<slot>": {"value": .., "ttl": ..}}`.
    ///
    /// Slots without a codec are skipped. A value that fails to encode is logged and skipped.
    pub fn encode(&self) -> Value {
        let mut out = Map::new();
        for entry in self.slots.values() {
            let (Some(codec), Some(memory)) = (entry.slot.codec(), entry.memory.as_ref()) else {
                continue;
            };
            let encoded = (codec.encode)(entry.slot.name(), (**memory.value()).as_any())
                .and_then(|value| {
                    let memory = memory.as_ref().map(|_| value);
                    Ok(serde_json::to_value(memory)?)
                });
            match encoded {
                Ok(value) => {
                    out.insert(entry.slot.name().to_string(), value);
                }
                Err(err) => {
                    tracing::warn!(slot = entry.slot.name(), error = %err, "failed to encode memory");
                }
            }
        }
        Value::Object(out)
    }

    /// Restore memories from the output of `encode`.
    ///
    /// Each entry is decoded independently: unknown slots, slots without a codec and malformed
    /// values are logged, recorded in the report and skipped.
    pub fn decode_from(&mut self, data: &Value) -> DecodeReport {
        let mut report = DecodeReport::default();
        let Some(entries) = data.as_object() else {
            let err = CodecError::Malformed("memories must be a json object".to_string());
            tracing::warn!(error = %err, "failed to decode memories");
            report.errors.push((String::new(), err));
            return report;
        };

        for (name, raw) in entries {
            match self.decode_entry(name, raw) {
                Ok(()) => report.loaded += 1,
                Err(err) => {
                    tracing::warn!(slot = %name, error = %err, "dropping persisted memory");
                    report.errors.push((name.clone(), err));
                }
            }
        }
        report
    }

    fn decode_entry(&mut self, name: &str, raw: &Value) -> Result<()> {
        let entry = self
            .slots
            .get_mut(name)
            .ok_or_else(|| CodecError::UnknownSlot(name.to_string()))?;
        let codec = entry
            .slot
            .codec()
            .ok_or_else(|| CodecError::NotPersistent(name.to_string()))?;

        let memory: Memory<Value> = serde_json::from_value(raw.clone())?;
        let (value, ttl) = memory.into_parts();
        let value = (codec.decode)(value)?;
        entry.memory = if value.is_empty_value() {
            None
        } else {
            Some(Memory::from_parts(value, ttl))
        };
        Ok(())
    }

    fn entry(&self, name: &'static str) -> &SlotEntry {
        self.slots
            .get(name)
            .unwrap_or_else(|| unregistered(name))
    }

    fn entry_mut(&mut self, name: &'static str) -> &mut SlotEntry {
        self.slots
            .get_mut(name)
            .unwrap_or_else(|| unregistered(name))
    }
}

impl std::fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.slots.values().map(|entry| {
                (
                    entry.slot.name(),
                    entry.memory.as_ref().map(|m| m.time_to_live()),
                )
            }))
            .finish()
    }
}

fn downcast_ref<'a, T: 'static>(name: &'static str, value: &'a dyn StoredValue) -> &'a T {
    value
        .as_any()
        .downcast_ref::<T>()
        .unwrap_or_else(|| type_mismatch(name))
}

fn unregistered(name: &str) -> ! {
    panic!("memory slot `{name}` is not registered for this agent")
}

fn type_mismatch(name: &str) -> ! {
    panic!("memory slot `{name}` type mismatch (stored type differs from requested)")
}
