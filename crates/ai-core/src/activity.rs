use core::fmt;

use serde::Serialize;

/// A named, mutually exclusive behavior mode (e.g. IDLE, WORK, FIGHT).
///
/// Activities are interned by construction: they wrap a `&'static str`, so two activities are
/// equal exactly when their identifiers are. Declare them as `const`s once and pass them around
/// by value; there is no per-agent allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Activity(&'static str);

impl Activity {
    pub const CORE: Activity = Activity::new("core");
    pub const IDLE: Activity = Activity::new("idle");
    pub const WORK: Activity = Activity::new("work");
    pub const PLAY: Activity = Activity::new("play");
    pub const REST: Activity = Activity::new("rest");
    pub const MEET: Activity = Activity::new("meet");
    pub const PANIC: Activity = Activity::new("panic");
    pub const RAID: Activity = Activity::new("raid");
    pub const PRE_RAID: Activity = Activity::new("pre_raid");
    pub const HIDE: Activity = Activity::new("hide");
    pub const FIGHT: Activity = Activity::new("fight");
    pub const CELEBRATE: Activity = Activity::new("celebrate");
    pub const ADMIRE_ITEM: Activity = Activity::new("admire_item");
    pub const AVOID: Activity = Activity::new("avoid");
    pub const RIDE: Activity = Activity::new("ride");
    pub const PLAY_DEAD: Activity = Activity::new("play_dead");
    pub const LONG_JUMP: Activity = Activity::new("long_jump");
    pub const RAM: Activity = Activity::new("ram");
    pub const TONGUE: Activity = Activity::new("tongue");
    pub const SWIM: Activity = Activity::new("swim");
    pub const LAY_SPAWN: Activity = Activity::new("lay_spawn");
    pub const SNIFF: Activity = Activity::new("sniff");
    pub const INVESTIGATE: Activity = Activity::new("investigate");
    pub const ROAR: Activity = Activity::new("roar");
    pub const EMERGE: Activity = Activity::new("emerge");
    pub const DIG: Activity = Activity::new("dig");

    /// Every activity in the standard table, in declaration order.
    pub const STANDARD: &'static [Activity] = &[
        Activity::CORE,
        Activity::IDLE,
        Activity::WORK,
        Activity::PLAY,
        Activity::REST,
        Activity::MEET,
        Activity::PANIC,
        Activity::RAID,
        Activity::PRE_RAID,
        Activity::HIDE,
        Activity::FIGHT,
        Activity::CELEBRATE,
        Activity::ADMIRE_ITEM,
        Activity::AVOID,
        Activity::RIDE,
        Activity::PLAY_DEAD,
        Activity::LONG_JUMP,
        Activity::RAM,
        Activity::TONGUE,
        Activity::SWIM,
        Activity::LAY_SPAWN,
        Activity::SNIFF,
        Activity::INVESTIGATE,
        Activity::ROAR,
        Activity::EMERGE,
        Activity::DIG,
    ];

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(self) -> &'static str {
        self.0
    }

    /// Look up a standard activity by identifier.
    pub fn from_name(name: &str) -> Option<Activity> {
        Self::STANDARD.iter().copied().find(|a| a.0 == name)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl crate::MemoryValue for Activity {}
