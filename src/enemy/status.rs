//! Status effects attached to an enemy.
//!
//! Each effect kind holds exactly the parameters it needs; at most one
//! record per kind is active, and re-applying a kind replaces its record.
//! Slow and stun both govern speed, so speed writes always re-assert the
//! strongest remaining governor: an active stun pins speed to zero, an
//! active slow pins it to `base_speed * factor`, and only when neither
//! remains does removal restore the removed record's snapshot.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::balance::DamageKind;
use crate::constants::{DEFAULT_POISON_DPS, DEFAULT_SLOW_FACTOR};
use crate::hooks::SimHooks;

use super::Enemy;

/// A status effect and its kind-specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatusEffect {
    /// Caps speed at `base_speed * factor` while active.
    Slow { factor: f32 },
    /// Pins speed to zero while active.
    Stun,
    /// Deals `damage_per_second * dt` poison damage every tick.
    Poison { damage_per_second: f32 },
    /// A kind this engine does not act on: stored and expired by duration,
    /// no immediate or periodic behavior. Lets newer collaborators tag
    /// enemies without a core upgrade.
    Inert { name: String },
}

impl StatusEffect {
    /// Slow with the standard factor.
    pub fn default_slow() -> Self {
        Self::Slow {
            factor: DEFAULT_SLOW_FACTOR,
        }
    }

    /// Poison with the standard damage rate.
    pub fn default_poison() -> Self {
        Self::Poison {
            damage_per_second: DEFAULT_POISON_DPS,
        }
    }

    pub fn key(&self) -> StatusKey {
        match self {
            Self::Slow { .. } => StatusKey::Slow,
            Self::Stun => StatusKey::Stun,
            Self::Poison { .. } => StatusKey::Poison,
            Self::Inert { name } => StatusKey::Inert(name.clone()),
        }
    }
}

/// Identity of an effect kind, the unit of replacement and removal.
/// Inert effects are keyed by name so unrelated tags can coexist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKey {
    Slow,
    Stun,
    Poison,
    Inert(String),
}

/// Stat values captured when an effect is applied, restored when the last
/// speed governor is removed. New effect kinds that touch other stats must
/// extend this snapshot symmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedSnapshot {
    pub speed: f32,
}

/// One active effect record.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveStatus {
    pub effect: StatusEffect,
    pub duration: f32,
    pub applied_at: f64,
    pub snapshot: SpeedSnapshot,
}

impl Enemy {
    /// Attach a status effect for `duration` seconds, replacing any active
    /// record of the same kind. No-op on a dead enemy.
    pub fn add_status_effect(
        &mut self,
        effect: StatusEffect,
        duration: f32,
        hooks: &mut SimHooks<'_>,
    ) {
        if self.is_dead() {
            return;
        }
        let key = effect.key();
        let record = ActiveStatus {
            effect,
            duration,
            applied_at: self.clock,
            snapshot: SpeedSnapshot { speed: self.speed },
        };
        debug!(id = %self.id, status = ?key, duration, "status applied");
        match self.statuses.iter_mut().find(|r| r.effect.key() == key) {
            Some(existing) => *existing = record,
            None => self.statuses.push(record),
        }
        self.reassert_speed_governors(None);
        hooks.feedback.status_applied(self.id, &key);
    }

    /// Remove the record for `key`, if any. Returns whether one was removed.
    pub fn remove_status_effect(&mut self, key: &StatusKey, hooks: &mut SimHooks<'_>) -> bool {
        let Some(index) = self.statuses.iter().position(|r| r.effect.key() == *key) else {
            return false;
        };
        let record = self.statuses.remove(index);
        if matches!(key, StatusKey::Slow | StatusKey::Stun) {
            self.reassert_speed_governors(Some(record.snapshot.speed));
        }
        debug!(id = %self.id, status = ?key, "status removed");
        hooks.feedback.status_removed(self.id, key);
        true
    }

    /// Remove every active effect through the regular removal path, then
    /// force speed back to the spawn base as a final safety net. Called on
    /// death; harmless on a live enemy.
    pub fn clear_all_effects(&mut self, hooks: &mut SimHooks<'_>) {
        while let Some(record) = self.statuses.last() {
            let key = record.effect.key();
            self.remove_status_effect(&key, hooks);
        }
        self.speed = self.base_speed;
    }

    pub fn has_status(&self, key: &StatusKey) -> bool {
        self.statuses.iter().any(|r| r.effect.key() == *key)
    }

    pub fn status_count(&self) -> usize {
        self.statuses.len()
    }

    /// Expire finished effects and run per-tick behavior on the rest.
    /// Poison damage goes through the regular damage resolver and can kill.
    pub(super) fn update_status_effects(&mut self, dt: f32, hooks: &mut SimHooks<'_>) {
        let now = self.clock;
        let mut expired: Vec<StatusKey> = Vec::new();
        let mut poison_damage = 0.0f32;
        for record in &self.statuses {
            if now - record.applied_at >= f64::from(record.duration) {
                expired.push(record.effect.key());
            } else if let StatusEffect::Poison { damage_per_second } = record.effect {
                poison_damage += damage_per_second * dt;
            }
        }
        for key in expired {
            self.remove_status_effect(&key, hooks);
        }
        if poison_damage > 0.0 && !self.is_dead() {
            self.take_damage(poison_damage, DamageKind::Poison, hooks);
        }
    }

    /// Re-derive speed from whichever slow/stun effects remain. `fallback`
    /// is the snapshot to restore when none do (removal only; on apply the
    /// current speed simply stands).
    fn reassert_speed_governors(&mut self, fallback: Option<f32>) {
        let stunned = self
            .statuses
            .iter()
            .any(|r| matches!(r.effect, StatusEffect::Stun));
        if stunned {
            self.speed = 0.0;
            return;
        }
        let slow_factor = self.statuses.iter().find_map(|r| match r.effect {
            StatusEffect::Slow { factor } => Some(factor),
            _ => None,
        });
        if let Some(factor) = slow_factor {
            self.speed = self.base_speed * factor;
        } else if let Some(speed) = fallback {
            self.speed = speed;
        }
    }
}
