#![allow(dead_code)]

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

use ai_core::{WorldMut, WorldView};
use ai_targets::{TargetWorldView, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub pos: Vec3,
    pub alive: bool,
}

/// Agents in open space. `hidden` agents can not be seen by anyone.
#[derive(Debug, Default)]
pub struct OpenWorld {
    pub bodies: BTreeMap<u64, Body>,
    pub hidden: BTreeSet<u64>,
    pub sight_checks: Cell<usize>,
}

impl OpenWorld {
    pub fn spawn(&mut self, agent: u64, pos: Vec3) {
        self.bodies.insert(agent, Body { pos, alive: true });
    }

    pub fn kill(&mut self, agent: u64) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.alive = false;
        }
    }
}

impl WorldView for OpenWorld {
    type Agent = u64;
}

impl WorldMut for OpenWorld {}

impl TargetWorldView for OpenWorld {
    fn position(&self, agent: u64) -> Option<Vec3> {
        self.bodies.get(&agent).map(|b| b.pos)
    }

    fn eye_height(&self, _agent: u64) -> f64 {
        1.5
    }

    fn is_alive(&self, agent: u64) -> bool {
        self.bodies.get(&agent).is_some_and(|b| b.alive)
    }

    fn can_see(&self, _looker: u64, target: u64) -> bool {
        self.sight_checks.set(self.sight_checks.get() + 1);
        !self.hidden.contains(&target)
    }

    fn nearby_agents(&self, center: Vec3, radius: f64) -> Vec<u64> {
        self.bodies
            .iter()
            .filter(|(_, b)| b.pos.distance(center) <= radius + 1.0)
            .map(|(id, _)| *id)
            .collect()
    }
}
