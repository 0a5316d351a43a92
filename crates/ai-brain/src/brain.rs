use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use ai_core::{Activity, AgentId, Blackboard, MemorySlot, MemoryStatus, Schedule, TickContext, WorldMut};
use ai_tools::{emit as trace_emit, TraceEvent};

use crate::sensor::SensorRunner;
use crate::{BrainConfig, BrainProfile, Task, TaskStatus};

pub(crate) struct TaskEntry<W>
where
    W: WorldMut + 'static,
{
    pub(crate) status: TaskStatus,
    pub(crate) task: Box<dyn Task<W>>,
}

/// The tasks registered for one activity at one priority, in insertion order.
pub(crate) struct ActivityTasks<W>
where
    W: WorldMut + 'static,
{
    pub(crate) activity: Activity,
    pub(crate) tasks: Vec<TaskEntry<W>>,
}

/// Decision state of one agent.
///
/// Owned exclusively by its agent and ticked once per simulation step by the driver. Sensors and
/// the task table are fixed after setup; memories and task run states change every tick.
pub struct Brain<W>
where
    W: WorldMut + 'static,
{
    pub agent: W::Agent,
    pub config: BrainConfig,
    pub blackboard: Blackboard,
    pub(crate) profile: Arc<BrainProfile<W>>,
    pub(crate) sensors: Vec<SensorRunner<W>>,
    /// priority (ascending) -> activity -> tasks
    pub(crate) tasks: BTreeMap<i32, Vec<ActivityTasks<W>>>,
    pub(crate) schedule: Arc<Schedule>,
    pub(crate) core_activities: BTreeSet<Activity>,
    pub(crate) active_activities: BTreeSet<Activity>,
    pub(crate) default_activity: Activity,
    pub(crate) activity_requirements: BTreeMap<Activity, Vec<(MemorySlot, MemoryStatus)>>,
    pub(crate) activity_forgetting: BTreeMap<Activity, BTreeSet<MemorySlot>>,
    pub(crate) last_schedule_update: Option<u64>,
    pub(crate) now: u64,
}

impl<W> Brain<W>
where
    W: WorldMut + 'static,
{
    pub fn new(agent: W::Agent, profile: Arc<BrainProfile<W>>) -> Self {
        let blackboard = Blackboard::with_slots(profile.declared_slots());
        let sensors = profile
            .sensors()
            .iter()
            .enumerate()
            .map(|(index, sensor_type)| SensorRunner::new(index, sensor_type, agent))
            .collect();

        let mut active_activities = BTreeSet::new();
        active_activities.insert(Activity::IDLE);

        Self {
            agent,
            config: BrainConfig::default(),
            blackboard,
            profile,
            sensors,
            tasks: BTreeMap::new(),
            schedule: Arc::new(Schedule::empty()),
            core_activities: BTreeSet::new(),
            active_activities,
            default_activity: Activity::IDLE,
            activity_requirements: BTreeMap::new(),
            activity_forgetting: BTreeMap::new(),
            last_schedule_update: None,
            now: 0,
        }
    }

    pub fn with_config(mut self, config: BrainConfig) -> Self {
        self.config = config;
        self
    }

    pub fn profile(&self) -> &Arc<BrainProfile<W>> {
        &self.profile
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn set_schedule(&mut self, schedule: Arc<Schedule>) {
        self.schedule = schedule;
    }

    pub fn sensor_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sensors.iter().map(|s| s.name())
    }

    /// A fresh brain for `agent` with the same profile and config, holding a copy of every
    /// present memory.
    ///
    /// Sensors are re-created from the profile; tasks, activities and the schedule are not
    /// carried over and must be registered again by the new owner.
    pub fn copy_without_behaviors(&self, agent: W::Agent) -> Brain<W> {
        let mut copy = Brain::new(agent, Arc::clone(&self.profile)).with_config(self.config);
        copy.blackboard.copy_present_from(&self.blackboard);
        copy
    }

    /// Run one decision step: expire memories, run sensors, start eligible tasks, tick running
    /// tasks.
    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) {
        self.now = ctx.tick;
        self.forget_outdated_memories(ctx);
        self.tick_sensors(ctx, world);
        self.start_eligible_tasks(ctx, world);
        self.tick_running_tasks(ctx, world);
        self.apply_activity_request();
    }

    fn forget_outdated_memories(&mut self, ctx: &TickContext) {
        for slot in self.blackboard.tick_expiry() {
            tracing::debug!(agent = ?self.agent, slot = slot.name(), "memory expired");
            trace_emit(
                &mut self.blackboard,
                TraceEvent::new(ctx.tick, "brain.memory.expired")
                    .with_detail(slot.name())
                    .with_a(self.agent.stable_id()),
            );
        }
    }

    fn tick_sensors(&mut self, ctx: &TickContext, world: &W) {
        for sensor in self.sensors.iter_mut() {
            sensor.tick(ctx, self.agent, world, &mut self.blackboard);
        }
    }

    fn start_eligible_tasks(&mut self, ctx: &TickContext, world: &mut W) {
        let agent = self.agent;
        for (priority, groups) in self.tasks.iter_mut() {
            for group in groups.iter_mut() {
                if !self.active_activities.contains(&group.activity) {
                    continue;
                }
                for entry in group.tasks.iter_mut() {
                    if entry.status != TaskStatus::Stopped {
                        continue;
                    }
                    if entry.task.try_start(ctx, agent, world, &mut self.blackboard) {
                        entry.status = TaskStatus::Running;
                        tracing::trace!(agent = ?agent, task = entry.task.name(), priority, "task started");
                        trace_emit(
                            &mut self.blackboard,
                            TraceEvent::new(ctx.tick, "brain.task.start")
                                .with_detail(entry.task.name())
                                .with_a(agent.stable_id())
                                .with_b_signed(i64::from(*priority)),
                        );
                    }
                }
            }
        }
    }

    fn tick_running_tasks(&mut self, ctx: &TickContext, world: &mut W) {
        let agent = self.agent;
        for (priority, group, index) in self.running_positions() {
            let Some(entry) = task_entry_mut(&mut self.tasks, priority, group, index) else {
                continue;
            };
            if entry.task.tick(ctx, agent, world, &mut self.blackboard) == TaskStatus::Running {
                continue;
            }
            entry.task.stop(ctx, agent, world, &mut self.blackboard);
            entry.status = TaskStatus::Stopped;
            let name = entry.task.name();
            self.on_task_stopped(ctx.tick, name);
        }
    }

    /// Force-stop every running task, e.g. when the agent dies or the brain is discarded.
    pub fn stop_all_tasks(&mut self, ctx: &TickContext, world: &mut W) {
        let agent = self.agent;
        for (priority, group, index) in self.running_positions() {
            let Some(entry) = task_entry_mut(&mut self.tasks, priority, group, index) else {
                continue;
            };
            entry.task.stop(ctx, agent, world, &mut self.blackboard);
            entry.status = TaskStatus::Stopped;
            let name = entry.task.name();
            self.on_task_stopped(ctx.tick, name);
        }
    }

    /// Names of the running tasks, in table order.
    pub fn running_tasks(&self) -> Vec<&'static str> {
        self.tasks
            .values()
            .flat_map(|groups| groups.iter())
            .flat_map(|group| group.tasks.iter())
            .filter(|entry| entry.status == TaskStatus::Running)
            .map(|entry| entry.task.name())
            .collect()
    }

    pub fn is_task_running(&self, name: &str) -> bool {
        self.running_tasks().contains(&name)
    }

    /// Register `tasks` under `activity`, each at its own priority.
    pub(crate) fn insert_tasks(&mut self, activity: Activity, tasks: Vec<(i32, Box<dyn Task<W>>)>) {
        for (priority, task) in tasks {
            let groups = self.tasks.entry(priority).or_default();
            let group = match groups.iter().position(|g| g.activity == activity) {
                Some(index) => &mut groups[index],
                None => {
                    groups.push(ActivityTasks {
                        activity,
                        tasks: Vec::new(),
                    });
                    let last = groups.len() - 1;
                    &mut groups[last]
                }
            };
            group.tasks.push(TaskEntry {
                status: TaskStatus::Stopped,
                task,
            });
        }
    }

    fn running_positions(&self) -> Vec<(i32, usize, usize)> {
        let mut running = Vec::new();
        for (priority, groups) in &self.tasks {
            for (g, group) in groups.iter().enumerate() {
                for (i, entry) in group.tasks.iter().enumerate() {
                    if entry.status == TaskStatus::Running {
                        running.push((*priority, g, i));
                    }
                }
            }
        }
        running
    }

    fn on_task_stopped(&mut self, tick: u64, name: &'static str) {
        tracing::trace!(agent = ?self.agent, task = name, "task stopped");
        trace_emit(
            &mut self.blackboard,
            TraceEvent::new(tick, "brain.task.stop")
                .with_detail(name)
                .with_a(self.agent.stable_id()),
        );
    }
}

fn task_entry_mut<W>(
    tasks: &mut BTreeMap<i32, Vec<ActivityTasks<W>>>,
    priority: i32,
    group: usize,
    index: usize,
) -> Option<&mut TaskEntry<W>>
where
    W: WorldMut + 'static,
{
    tasks.get_mut(&priority)?.get_mut(group)?.tasks.get_mut(index)
}

/// Tick `brains` in stable agent order.
pub fn tick_brains<W>(ctx: &TickContext, world: &mut W, brains: &mut [Brain<W>])
where
    W: WorldMut + 'static,
{
    brains.sort_by_key(|b| b.agent.stable_id());
    for brain in brains.iter_mut() {
        brain.tick(ctx, world);
    }
}
