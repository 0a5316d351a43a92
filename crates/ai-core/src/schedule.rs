use serde::{Deserialize, Serialize};

use crate::Activity;

/// Number of ticks in one simulated day.
pub const DAY_LENGTH_TICKS: u32 = 24_000;

/// A priority keyframe: from `start_tick` on, the rule evaluates to `priority`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRuleEntry {
    start_tick: u32,
    priority: f32,
}

impl ScheduleRuleEntry {
    pub fn new(start_tick: u32, priority: f32) -> Self {
        Self {
            start_tick,
            priority,
        }
    }

    pub fn start_tick(&self) -> u32 {
        self.start_tick
    }

    pub fn priority(&self) -> f32 {
        self.priority
    }
}

/// Step function over one cyclic day for a single activity.
///
/// Entries are kept sorted by start tick. A query before the first entry wraps around and uses
/// the last entry of the previous day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRule {
    entries: Vec<ScheduleRuleEntry>,
}

impl ScheduleRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a keyframe. Keyframes added later win ties on the same start tick.
    pub fn add_entry(&mut self, start_tick: u32, priority: f32) -> &mut Self {
        let at = self.entries.partition_point(|e| e.start_tick <= start_tick);
        self.entries
            .insert(at, ScheduleRuleEntry::new(start_tick, priority));
        self
    }

    pub fn entries(&self) -> &[ScheduleRuleEntry] {
        &self.entries
    }

    /// Priority at `time_of_day`; `0.0` for a rule without entries.
    pub fn value_at(&self, time_of_day: u32) -> f32 {
        let after = self.entries.partition_point(|e| e.start_tick <= time_of_day);
        let entry = match after {
            0 => self.entries.last(),
            n => self.entries.get(n - 1),
        };
        entry.map_or(0.0, |e| e.priority)
    }
}

/// Resolves "what should this agent be doing now" from the time of day.
///
/// Holds one `ScheduleRule` per known activity; the activity whose rule evaluates highest wins.
/// Ties go to the activity that was registered first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    rules: Vec<(Activity, ScheduleRule)>,
}

impl Schedule {
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::default()
    }

    /// IDLE all day.
    pub fn empty() -> Self {
        Self::builder().change_activity_at(0, Activity::IDLE).build()
    }

    pub fn simple() -> Self {
        Self::builder()
            .change_activity_at(5_000, Activity::WORK)
            .change_activity_at(11_000, Activity::REST)
            .build()
    }

    pub fn villager_baby() -> Self {
        Self::builder()
            .change_activity_at(10, Activity::IDLE)
            .change_activity_at(3_000, Activity::PLAY)
            .change_activity_at(6_000, Activity::IDLE)
            .change_activity_at(10_000, Activity::PLAY)
            .change_activity_at(12_000, Activity::REST)
            .build()
    }

    pub fn villager_default() -> Self {
        Self::builder()
            .change_activity_at(10, Activity::IDLE)
            .change_activity_at(2_000, Activity::WORK)
            .change_activity_at(9_000, Activity::MEET)
            .change_activity_at(11_000, Activity::IDLE)
            .change_activity_at(12_000, Activity::REST)
            .build()
    }

    pub fn rule(&self, activity: Activity) -> Option<&ScheduleRule> {
        self.rules
            .iter()
            .find(|(a, _)| *a == activity)
            .map(|(_, rule)| rule)
    }

    pub fn activities(&self) -> impl Iterator<Item = Activity> + '_ {
        self.rules.iter().map(|(a, _)| *a)
    }

    /// The highest-priority activity at `time_of_day` (already reduced to `0..DAY_LENGTH_TICKS`).
    ///
    /// A schedule without rules always answers IDLE.
    pub fn activity_at(&self, time_of_day: u32) -> Activity {
        let mut best: Option<(Activity, f32)> = None;
        for (activity, rule) in &self.rules {
            let value = rule.value_at(time_of_day);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((*activity, value));
            }
        }
        best.map_or(Activity::IDLE, |(activity, _)| activity)
    }

    fn ensure_rule(&mut self, activity: Activity) -> &mut ScheduleRule {
        let index = match self.rules.iter().position(|(a, _)| *a == activity) {
            Some(index) => index,
            None => {
                self.rules.push((activity, ScheduleRule::new()));
                self.rules.len() - 1
            }
        };
        &mut self.rules[index].1
    }
}

/// Builds a `Schedule` from activity transitions.
///
/// Each transition raises its activity to priority `1.0` and drops every other activity known to
/// the schedule to `0.0` at the same tick, which makes day periods exclusive.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    transitions: Vec<(u32, Activity)>,
}

impl ScheduleBuilder {
    pub fn change_activity_at(mut self, start_tick: u32, activity: Activity) -> Self {
        self.transitions.push((start_tick, activity));
        self
    }

    pub fn build(mut self) -> Schedule {
        self.transitions.sort_by_key(|(tick, _)| *tick);

        let mut schedule = Schedule::default();
        for (_, activity) in &self.transitions {
            schedule.ensure_rule(*activity);
        }

        for (start_tick, activity) in &self.transitions {
            for (known, rule) in schedule.rules.iter_mut() {
                let priority = if known == activity { 1.0 } else { 0.0 };
                rule.add_entry(*start_tick, priority);
            }
        }
        schedule
    }
}
