//! The owning collection of live enemies.
//!
//! Allocates ids, drives per-frame updates, removes terminal entities and
//! exposes the exit-distance ordering external systems use for despawn
//! prioritization under load. Update order across enemies is unspecified;
//! no enemy may rely on another's state being refreshed first.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::balance::{Element, EnemyKind};
use crate::config::SimConfig;
use crate::enemy::{Enemy, EnemyId, EnemySpawn};
use crate::hooks::SimHooks;

#[derive(Debug)]
pub struct EnemyRegistry {
    config: SimConfig,
    next_id: u64,
    enemies: Vec<Enemy>,
}

impl EnemyRegistry {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            next_id: 1,
            enemies: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Create an enemy from a spawn request and take ownership of it.
    pub fn spawn(&mut self, spawn: EnemySpawn) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.enemies.push(Enemy::spawn(id, spawn, &self.config));
        id
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.iter_mut()
    }

    /// Advance every live enemy by one frame.
    pub fn update_all(&mut self, dt: f32, hooks: &mut SimHooks<'_>) {
        for enemy in &mut self.enemies {
            enemy.update(dt, hooks);
        }
    }

    /// Remove and return every terminal (dead or escaped) enemy. The core
    /// holds no state for them afterwards.
    pub fn drain_terminal(&mut self) -> Vec<Enemy> {
        let mut live = Vec::with_capacity(self.enemies.len());
        let mut terminal = Vec::new();
        for enemy in self.enemies.drain(..) {
            if enemy.is_terminal() {
                terminal.push(enemy);
            } else {
                live.push(enemy);
            }
        }
        self.enemies = live;
        if !terminal.is_empty() {
            debug!(count = terminal.len(), "drained terminal enemies");
        }
        terminal
    }

    /// Ids of live enemies ordered closest-to-exit first. The ordering key
    /// is the cached straight-line estimate, so it is approximate by
    /// design; enemies with no known exit sort last.
    pub fn ids_by_exit_distance(&self) -> Vec<EnemyId> {
        let mut ids: Vec<(f32, EnemyId)> = self
            .enemies
            .iter()
            .map(|e| (e.distance_to_exit(), e.id()))
            .collect();
        ids.sort_by(|a, b| a.0.total_cmp(&b.0));
        ids.into_iter().map(|(_, id)| id).collect()
    }

    /// Serializable view of the live set for external UI and tooling.
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemySnapshot {
                    id: e.id(),
                    kind: e.kind(),
                    element: e.element(),
                    wave: e.wave(),
                    health: e.health(),
                    max_health: e.max_health(),
                    position: e.position().to_array(),
                    distance_to_exit: e.distance_to_exit().is_finite().then(|| e.distance_to_exit()),
                })
                .collect(),
        }
    }
}

/// Point-in-time view of one enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub element: Element,
    pub wave: u32,
    pub health: f32,
    pub max_health: f32,
    pub position: [f32; 3],
    /// None until the enemy knows where its exit is.
    pub distance_to_exit: Option<f32>,
}

/// Point-in-time view of the whole live set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub enemies: Vec<EnemySnapshot>,
}

impl SimSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::DamageKind;
    use crate::hooks::NullHooks;
    use crate::path::StalledPathProvider;
    use bevy::math::{Vec2, Vec3};

    fn basic_spawn(x: f32) -> EnemySpawn {
        EnemySpawn::new(EnemyKind::Basic, Element::Normal, 1, Vec3::new(x, 0.5, 0.0))
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let mut registry = EnemyRegistry::new(SimConfig::default());
        let a = registry.spawn(basic_spawn(0.0));
        let b = registry.spawn(basic_spawn(1.0));
        assert_ne!(a, b);
        assert_eq!(registry.get(a).map(|e| e.id()), Some(a));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_drain_terminal_removes_dead() {
        let mut registry = EnemyRegistry::new(SimConfig::default());
        let doomed = registry.spawn(basic_spawn(0.0));
        registry.spawn(basic_spawn(1.0));

        let mut paths = StalledPathProvider;
        let mut feedback = NullHooks;
        let mut economy = NullHooks;
        let mut hooks = SimHooks {
            paths: &mut paths,
            feedback: &mut feedback,
            economy: &mut economy,
        };
        if let Some(enemy) = registry.get_mut(doomed) {
            enemy.take_damage(1000.0, DamageKind::Normal, &mut hooks);
        }

        let drained = registry.drain_terminal();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].id(), doomed);
        assert!(drained[0].is_dead());
        assert_eq!(registry.len(), 1);
        assert!(registry.get(doomed).is_none());
    }

    #[test]
    fn test_exit_distance_ordering() {
        let mut registry = EnemyRegistry::new(SimConfig::default());
        let far = registry.spawn(basic_spawn(-10.0));
        let near = registry.spawn(basic_spawn(-1.0));
        let unknown = registry.spawn(basic_spawn(-2.0));

        let exit = Vec2::new(0.0, 0.0);
        for id in [far, near] {
            if let Some(enemy) = registry.get_mut(id) {
                enemy.set_target_position(exit);
            }
        }

        assert_eq!(registry.ids_by_exit_distance(), vec![near, far, unknown]);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut registry = EnemyRegistry::new(SimConfig::default());
        let id = registry.spawn(basic_spawn(2.0));
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.enemies.len(), 1);
        assert_eq!(snapshot.enemies[0].id, id);
        assert_eq!(snapshot.enemies[0].distance_to_exit, None);
        let json = snapshot.to_json();
        assert!(json.contains("\"health\":100.0"));
    }
}
