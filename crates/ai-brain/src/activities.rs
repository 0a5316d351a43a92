//! Activity selection.
//!
//! At any time the active set is the core activities plus exactly one other activity: either the
//! default one or one whose memory preconditions held when it was selected. Leaving an activity
//! erases the memories it was registered to forget.

use std::collections::BTreeSet;

use ai_core::{Activity, AgentId, MemoryModuleType, MemorySlot, MemoryStatus, WorldMut};
use ai_tools::{emit as trace_emit, TraceEvent};

use crate::{Brain, Task};

/// Slot through which a running task asks for an exclusive activity switch.
///
/// Declared on every brain. Whatever it holds at the end of a tick is consumed and passed to
/// `Brain::do_exclusively`.
pub const ACTIVITY_REQUEST: MemoryModuleType<Activity> =
    MemoryModuleType::new("ai_brain:activity_request");

impl<W> Brain<W>
where
    W: WorldMut + 'static,
{
    /// Activities that are always active and never replaced by a switch.
    pub fn set_core_activities(&mut self, activities: impl IntoIterator<Item = Activity>) {
        let current = self.active_non_core_activity();
        self.core_activities = activities.into_iter().collect();
        self.active_activities = self.core_activities.clone();
        self.active_activities
            .insert(current.unwrap_or(self.default_activity));
    }

    /// Change the fallback activity. If the old default is the current non-core activity, the new
    /// default takes its place without forgetting anything.
    pub fn set_default_activity(&mut self, activity: Activity) {
        let previous = self.default_activity;
        self.default_activity = activity;
        if self.active_non_core_activity() == Some(previous) {
            self.active_activities.remove(&previous);
            self.active_activities.insert(activity);
        }
    }

    pub fn default_activity(&self) -> Activity {
        self.default_activity
    }

    pub fn core_activities(&self) -> &BTreeSet<Activity> {
        &self.core_activities
    }

    pub fn active_activities(&self) -> &BTreeSet<Activity> {
        &self.active_activities
    }

    pub fn is_active(&self, activity: Activity) -> bool {
        self.active_activities.contains(&activity)
    }

    pub fn active_non_core_activity(&self) -> Option<Activity> {
        self.active_activities
            .iter()
            .copied()
            .find(|a| !self.core_activities.contains(a))
    }

    /// Register `tasks` under `activity` at consecutive priorities starting at `start_priority`.
    /// The activity has no memory preconditions.
    pub fn add_activity(
        &mut self,
        activity: Activity,
        start_priority: i32,
        tasks: Vec<Box<dyn Task<W>>>,
    ) {
        let tasks = tasks
            .into_iter()
            .zip(start_priority..)
            .map(|(task, priority)| (priority, task))
            .collect();
        self.add_activity_with_conditions(activity, tasks, Vec::new());
    }

    pub fn add_activity_with_conditions(
        &mut self,
        activity: Activity,
        tasks: Vec<(i32, Box<dyn Task<W>>)>,
        conditions: Vec<(MemorySlot, MemoryStatus)>,
    ) {
        self.add_activity_and_forget_when_stopped(activity, tasks, conditions, Vec::new());
    }

    /// Register `tasks` under `activity`, gate the activity on `conditions` and erase `forgetting`
    /// whenever the brain switches away from it.
    pub fn add_activity_and_forget_when_stopped(
        &mut self,
        activity: Activity,
        tasks: Vec<(i32, Box<dyn Task<W>>)>,
        conditions: Vec<(MemorySlot, MemoryStatus)>,
        forgetting: Vec<MemorySlot>,
    ) {
        for (slot, _) in &conditions {
            if !self.blackboard.is_registered(*slot) {
                tracing::warn!(
                    activity = activity.name(),
                    slot = slot.name(),
                    "activity precondition refers to an undeclared memory slot"
                );
            }
        }
        self.activity_requirements.insert(activity, conditions);
        if !forgetting.is_empty() {
            self.activity_forgetting
                .entry(activity)
                .or_default()
                .extend(forgetting);
        }
        self.insert_tasks(activity, tasks);
    }

    /// `true` iff `activity` has registered preconditions and all of them hold right now.
    pub fn can_do_activity(&self, activity: Activity) -> bool {
        let Some(conditions) = self.activity_requirements.get(&activity) else {
            return false;
        };
        conditions
            .iter()
            .all(|(slot, status)| self.blackboard.check_status(*slot, *status))
    }

    /// Switch to `activity` if it can be done, otherwise to the default activity.
    pub fn do_exclusively(&mut self, activity: Activity) {
        if self.can_do_activity(activity) {
            self.reset_possible_activities(activity);
        } else {
            self.use_default_activity();
        }
    }

    pub fn set_active_activity_if_possible(&mut self, activity: Activity) -> bool {
        if !self.can_do_activity(activity) {
            return false;
        }
        self.reset_possible_activities(activity);
        true
    }

    /// Make the active set `core ∪ {default}`.
    ///
    /// Unlike `reset_possible_activities` this also applies when the default activity is a core
    /// activity, so a stale non-core activity is always dropped.
    pub fn use_default_activity(&mut self) {
        let default = self.default_activity;
        let in_default_state = self.active_activities.contains(&default)
            && self
                .active_activities
                .iter()
                .all(|a| *a == default || self.core_activities.contains(a));
        if !in_default_state {
            self.switch_to(default);
        }
    }

    /// Switch to the first activity in `candidates` whose preconditions hold.
    pub fn set_active_activity_to_first_valid(&mut self, candidates: &[Activity]) -> Option<Activity> {
        let activity = candidates
            .iter()
            .copied()
            .find(|a| self.can_do_activity(*a))?;
        self.reset_possible_activities(activity);
        Some(activity)
    }

    /// Make the active set `core ∪ {activity}` without checking preconditions.
    ///
    /// No-op if `activity` is already active. Otherwise every other active activity forgets its
    /// registered memories first.
    pub fn reset_possible_activities(&mut self, activity: Activity) {
        if self.is_active(activity) {
            return;
        }
        self.switch_to(activity);
    }

    fn switch_to(&mut self, activity: Activity) {
        let leaving: Vec<Activity> = self
            .active_activities
            .iter()
            .copied()
            .filter(|a| *a != activity)
            .collect();
        for left in &leaving {
            let Some(forget) = self.activity_forgetting.get(left) else {
                continue;
            };
            for slot in forget {
                if self.blackboard.is_registered(*slot) {
                    self.blackboard.erase(*slot);
                }
            }
        }

        let previous = self.active_non_core_activity();
        self.active_activities = self.core_activities.clone();
        self.active_activities.insert(activity);

        tracing::debug!(
            agent = ?self.agent,
            from = previous.map(Activity::name),
            to = activity.name(),
            "activity switched"
        );
        trace_emit(
            &mut self.blackboard,
            TraceEvent::new(self.now, "brain.activity")
                .with_detail(activity.name())
                .with_a(self.agent.stable_id()),
        );
    }

    /// Re-evaluate the schedule, at most once per refresh cooldown.
    ///
    /// `day_time` is reduced modulo the configured day length. If the scheduled activity is not
    /// active yet the brain switches to it exclusively (falling back to the default activity when
    /// its preconditions fail).
    pub fn update_activity_from_schedule(&mut self, day_time: u64, now: u64) {
        if !self.config.refresh_due(self.last_schedule_update, now) {
            return;
        }
        self.last_schedule_update = Some(now);

        let activity = self
            .schedule
            .activity_at(self.config.time_of_day(day_time));
        if !self.is_active(activity) {
            self.do_exclusively(activity);
        }
    }

    /// `update_activity_from_schedule` with the times carried by `ctx`.
    pub fn refresh_activities(&mut self, ctx: &ai_core::TickContext) {
        self.update_activity_from_schedule(ctx.day_time, ctx.tick);
    }

    pub(crate) fn apply_activity_request(&mut self) {
        let Some(activity) = self.blackboard.get(ACTIVITY_REQUEST).copied() else {
            return;
        };
        self.blackboard.erase(ACTIVITY_REQUEST);
        self.do_exclusively(activity);
    }
}
