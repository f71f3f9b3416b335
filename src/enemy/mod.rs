//! The enemy simulation unit.
//!
//! One `Enemy` aggregates movement, status effects and damage resolution
//! behind a small mutating surface: `update`, `take_damage`,
//! `add_status_effect`, `remove_status_effect`, `clear_all_effects` and the
//! path installation hooks. Nothing outside this module mutates health or
//! speed directly.
//!
//! Lifecycle: spawned -> awaiting path -> following -> `Dead` (killed,
//! pays out gold) or `ReachedEnd` (escaped). Terminal states never
//! transition further; the owning registry discards terminal entities.

use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::balance::{self, Element, EnemyKind};
use crate::config::SimConfig;
use crate::hooks::SimHooks;
use crate::path::{PathRequest, Waypoint};

use self::status::ActiveStatus;

mod combat;
mod movement;
pub mod status;

/// Stable identity of a live enemy. Never reused while the enemy lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u64);

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

/// Spawn request for one enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub element: Element,
    pub wave: u32,
    pub position: Vec3,
}

impl EnemySpawn {
    pub fn new(kind: EnemyKind, element: Element, wave: u32, position: Vec3) -> Self {
        Self {
            kind,
            element,
            wave,
            position,
        }
    }
}

/// One simulation unit. See the module docs for the lifecycle.
#[derive(Debug)]
pub struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    element: Element,
    wave: u32,

    position: Vec3,

    max_health: f32,
    health: f32,
    /// Element-modified speed computed once at spawn; the value slow factors
    /// scale and resets restore.
    base_speed: f32,
    speed: f32,
    gold_value: u64,
    airborne: bool,

    dead: bool,
    reached_end: bool,

    waypoints: Vec<Waypoint>,
    path_index: usize,
    pending_path: Option<PathRequest>,
    last_path_request: f64,
    path_cooldown: f32,

    exit_target: Option<Vec2>,
    distance_to_exit: f32,

    statuses: Vec<ActiveStatus>,

    /// Simulation seconds accumulated from update deltas; the `now` used
    /// for status timing. No wall clock enters the core.
    clock: f64,
}

impl Enemy {
    /// Create an enemy. Stats are derived once from `(kind, element, wave)`
    /// and never recomputed. Malformed inputs are normalized, not rejected:
    /// a non-finite position becomes the origin and wave 0 becomes wave 1,
    /// each with a warning.
    pub fn spawn(id: EnemyId, spawn: EnemySpawn, config: &SimConfig) -> Self {
        let position = sanitize_position(id, spawn.position);
        let wave = if spawn.wave == 0 {
            warn!(%id, "wave 0 normalized to 1");
            1
        } else {
            spawn.wave
        };

        let max_health = balance::scaled_health(spawn.kind, spawn.element, wave);
        let base_speed = balance::spawn_speed(spawn.kind, spawn.element);
        let gold_value = balance::scaled_gold(spawn.kind, wave);
        let airborne = balance::base_stats(spawn.kind).airborne;

        debug!(
            %id,
            kind = spawn.kind.name(),
            element = spawn.element.name(),
            wave,
            max_health,
            base_speed,
            gold_value,
            "enemy spawned"
        );

        Self {
            id,
            kind: spawn.kind,
            element: spawn.element,
            wave,
            position,
            max_health,
            health: max_health,
            base_speed,
            speed: base_speed,
            gold_value,
            airborne,
            dead: false,
            reached_end: false,
            waypoints: Vec::new(),
            path_index: 0,
            pending_path: None,
            last_path_request: f64::NEG_INFINITY,
            path_cooldown: config.path_cooldown,
            exit_target: None,
            distance_to_exit: f32::INFINITY,
            statuses: Vec::new(),
            clock: 0.0,
        }
    }

    /// Advance the enemy by one frame. Status effects tick first (a poison
    /// kill suppresses the rest of the tick), then movement, then the
    /// cached distance-to-exit is refreshed. No-op in a terminal state.
    pub fn update(&mut self, dt: f32, hooks: &mut SimHooks<'_>) {
        if self.is_terminal() {
            return;
        }
        if !dt.is_finite() || dt < 0.0 {
            warn!(id = %self.id, dt, "ignoring malformed delta time");
            return;
        }
        self.clock += f64::from(dt);
        self.update_status_effects(dt, hooks);
        if self.is_dead() {
            return;
        }
        self.advance_movement(dt, hooks);
        self.recompute_exit_distance();
    }

    /// Seed the distance-to-exit estimate. A separate, explicit step after
    /// spawning; until it is called (or a path is installed) the distance
    /// reads as infinite.
    pub fn set_target_position(&mut self, exit: Vec2) {
        self.exit_target = Some(exit);
        self.distance_to_exit = self.ground_position().distance(exit);
    }

    /// Install a waypoint list, replacing any current path. The last
    /// waypoint is treated as the exit. Ignored in a terminal state so a
    /// late provider response cannot revive a finished enemy; an empty list
    /// leaves the enemy awaiting a path.
    pub fn install_path(&mut self, waypoints: Vec<Waypoint>) {
        if self.is_terminal() {
            debug!(id = %self.id, "dropping path delivered to terminal enemy");
            return;
        }
        self.pending_path = None;
        self.path_index = 0;
        self.waypoints = waypoints;
    }

    /// Drop the current path. The enemy re-enters awaiting-path behavior on
    /// its next update, subject to the request cooldown.
    pub fn clear_path(&mut self) {
        self.waypoints.clear();
        self.path_index = 0;
    }

    // ---- read accessors ------------------------------------------------

    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Position projected onto the ground plane.
    pub fn ground_position(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// `health / max_health` in `[0, 1]`.
    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn gold_value(&self) -> u64 {
        self.gold_value
    }

    pub fn airborne(&self) -> bool {
        self.airborne
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn reached_end(&self) -> bool {
        self.reached_end
    }

    pub fn is_terminal(&self) -> bool {
        self.dead || self.reached_end
    }

    /// True while the enemy has no waypoints and is still in play.
    pub fn awaiting_path(&self) -> bool {
        self.waypoints.is_empty() && !self.is_terminal()
    }

    pub fn has_path(&self) -> bool {
        !self.waypoints.is_empty()
    }

    pub fn current_waypoint(&self) -> Option<Waypoint> {
        self.waypoints.get(self.path_index).copied()
    }

    /// Straight-line distance to the exit, refreshed once per update.
    /// An approximation for external prioritization, not a gameplay value;
    /// it may be stale by one tick and reads infinite before any target is
    /// known.
    pub fn distance_to_exit(&self) -> f32 {
        self.distance_to_exit
    }

    fn recompute_exit_distance(&mut self) {
        let target = self.waypoints.last().copied().or(self.exit_target);
        if let Some(target) = target {
            self.distance_to_exit = self.ground_position().distance(target);
        }
    }
}

fn sanitize_position(id: EnemyId, position: Vec3) -> Vec3 {
    if position.is_finite() {
        position
    } else {
        warn!(%id, ?position, "non-finite spawn position normalized to origin");
        Vec3::ZERO
    }
}
