//! Bevy integration for the enemy simulation.
//!
//! The core stays framework-free behind the `hooks` traits; this module
//! adapts it to a bevy app. `SimState` owns the registry and the path
//! provider, inbound events request spawns and damage, and everything the
//! core reports through its hooks is re-emitted as outbound events for
//! whatever rendering/UI sits on top.

use bevy::prelude::*;

use crate::balance::DamageKind;
use crate::config::SimConfig;
use crate::enemy::status::StatusKey;
use crate::enemy::{EnemyId, EnemySpawn};
use crate::hooks::{CombatFeedback, EconomyHooks, SimHooks};
use crate::path::{PathProvider, StalledPathProvider, Waypoint};
use crate::registry::EnemyRegistry;

pub struct EnemySimPlugin;

impl Plugin for EnemySimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimState>()
            .add_event::<SpawnEnemyEvent>()
            .add_event::<DamageEnemyEvent>()
            .add_event::<DamageNumberEvent>()
            .add_event::<HealthChangedEvent>()
            .add_event::<StatusChangeEvent>()
            .add_event::<EnemyDiedEvent>()
            .add_event::<EnemyEscapedEvent>()
            .add_systems(
                Update,
                (process_spawns, apply_damage, tick_enemies, drain_terminal).chain(),
            );
    }
}

/// The simulation as a bevy resource. Insert one configured with a real
/// path provider before adding [`EnemySimPlugin`]; otherwise a default with
/// a [`StalledPathProvider`] is installed and enemies wait forever.
#[derive(Resource)]
pub struct SimState {
    pub registry: EnemyRegistry,
    paths: Box<dyn PathProvider + Send + Sync>,
}

impl SimState {
    pub fn new(config: SimConfig, paths: Box<dyn PathProvider + Send + Sync>) -> Self {
        Self {
            registry: EnemyRegistry::new(config),
            paths,
        }
    }

    pub fn set_path_provider(&mut self, paths: Box<dyn PathProvider + Send + Sync>) {
        self.paths = paths;
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(SimConfig::default(), Box::new(StalledPathProvider))
    }
}

/// Request one enemy. `exit`, when known up front, seeds the
/// distance-to-exit estimate immediately.
#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnEnemyEvent {
    pub spawn: EnemySpawn,
    pub exit: Option<Waypoint>,
}

/// A tower/projectile hit to apply this frame.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEnemyEvent {
    pub enemy: EnemyId,
    pub amount: f32,
    pub kind: DamageKind,
}

/// Floored effective damage for a popup at `position`.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageNumberEvent {
    pub position: Vec3,
    pub amount: u32,
    pub kind: DamageKind,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct HealthChangedEvent {
    pub enemy: EnemyId,
    pub fraction: f32,
}

#[derive(Event, Debug, Clone)]
pub struct StatusChangeEvent {
    pub enemy: EnemyId,
    pub status: StatusKey,
    pub applied: bool,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDiedEvent {
    pub enemy: EnemyId,
    pub gold: u64,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyEscapedEvent {
    pub enemy: EnemyId,
}

/// Collects core feedback during a system run, drained into event writers
/// afterwards so the core never sees bevy types.
#[derive(Default)]
struct FeedbackBuffer {
    damage_numbers: Vec<DamageNumberEvent>,
    health: Vec<HealthChangedEvent>,
    status: Vec<StatusChangeEvent>,
}

impl CombatFeedback for FeedbackBuffer {
    fn damage_number(&mut self, position: Vec3, amount: u32, kind: DamageKind) {
        self.damage_numbers.push(DamageNumberEvent {
            position,
            amount,
            kind,
        });
    }

    fn health_changed(&mut self, enemy: EnemyId, fraction: f32) {
        self.health.push(HealthChangedEvent { enemy, fraction });
    }

    fn status_applied(&mut self, enemy: EnemyId, status: &StatusKey) {
        self.status.push(StatusChangeEvent {
            enemy,
            status: status.clone(),
            applied: true,
        });
    }

    fn status_removed(&mut self, enemy: EnemyId, status: &StatusKey) {
        self.status.push(StatusChangeEvent {
            enemy,
            status: status.clone(),
            applied: false,
        });
    }
}

#[derive(Default)]
struct EconomyBuffer {
    deaths: Vec<EnemyDiedEvent>,
}

impl EconomyHooks for EconomyBuffer {
    fn gold_earned(&mut self, enemy: EnemyId, amount: u64) {
        self.deaths.push(EnemyDiedEvent {
            enemy,
            gold: amount,
        });
    }
}

fn flush(
    feedback: FeedbackBuffer,
    economy: EconomyBuffer,
    damage_numbers: &mut EventWriter<DamageNumberEvent>,
    health: &mut EventWriter<HealthChangedEvent>,
    status: &mut EventWriter<StatusChangeEvent>,
    died: &mut EventWriter<EnemyDiedEvent>,
) {
    damage_numbers.send_batch(feedback.damage_numbers);
    health.send_batch(feedback.health);
    status.send_batch(feedback.status);
    died.send_batch(economy.deaths);
}

fn process_spawns(mut sim: ResMut<SimState>, mut requests: EventReader<SpawnEnemyEvent>) {
    for request in requests.read() {
        let id = sim.registry.spawn(request.spawn);
        if let (Some(exit), Some(enemy)) = (request.exit, sim.registry.get_mut(id)) {
            enemy.set_target_position(exit);
        }
    }
}

fn apply_damage(
    mut sim: ResMut<SimState>,
    mut hits: EventReader<DamageEnemyEvent>,
    mut damage_numbers: EventWriter<DamageNumberEvent>,
    mut health: EventWriter<HealthChangedEvent>,
    mut status: EventWriter<StatusChangeEvent>,
    mut died: EventWriter<EnemyDiedEvent>,
) {
    let mut feedback = FeedbackBuffer::default();
    let mut economy = EconomyBuffer::default();
    let SimState { registry, paths } = &mut *sim;
    for hit in hits.read() {
        if let Some(enemy) = registry.get_mut(hit.enemy) {
            let mut hooks = SimHooks {
                paths: paths.as_mut(),
                feedback: &mut feedback,
                economy: &mut economy,
            };
            enemy.take_damage(hit.amount, hit.kind, &mut hooks);
        }
    }
    flush(
        feedback,
        economy,
        &mut damage_numbers,
        &mut health,
        &mut status,
        &mut died,
    );
}

fn tick_enemies(
    time: Res<Time>,
    mut sim: ResMut<SimState>,
    mut damage_numbers: EventWriter<DamageNumberEvent>,
    mut health: EventWriter<HealthChangedEvent>,
    mut status: EventWriter<StatusChangeEvent>,
    mut died: EventWriter<EnemyDiedEvent>,
) {
    let dt = time.delta_secs();
    let mut feedback = FeedbackBuffer::default();
    let mut economy = EconomyBuffer::default();
    let SimState { registry, paths } = &mut *sim;
    let mut hooks = SimHooks {
        paths: paths.as_mut(),
        feedback: &mut feedback,
        economy: &mut economy,
    };
    registry.update_all(dt, &mut hooks);
    flush(
        feedback,
        economy,
        &mut damage_numbers,
        &mut health,
        &mut status,
        &mut died,
    );
}

fn drain_terminal(mut sim: ResMut<SimState>, mut escaped: EventWriter<EnemyEscapedEvent>) {
    for enemy in sim.registry.drain_terminal() {
        if enemy.reached_end() {
            escaped.send(EnemyEscapedEvent { enemy: enemy.id() });
        }
    }
}
