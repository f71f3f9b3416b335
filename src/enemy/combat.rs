//! Damage resolution and the death side of the lifecycle.

use tracing::{debug, warn};

use crate::balance::{self, DamageKind};
use crate::hooks::SimHooks;

use super::Enemy;

impl Enemy {
    /// Apply a hit. The raw amount is scaled by elemental effectiveness
    /// against this enemy's element, then subtracted; health may dip below
    /// zero inside this call before the death check clamps it. Returns true
    /// exactly when this call killed the enemy. Hitting an already dead
    /// enemy is a no-op returning false.
    pub fn take_damage(&mut self, amount: f32, kind: DamageKind, hooks: &mut SimHooks<'_>) -> bool {
        if self.is_dead() {
            return false;
        }
        let amount = if amount.is_finite() && amount >= 0.0 {
            amount
        } else {
            warn!(id = %self.id, amount, "malformed damage amount treated as zero");
            0.0
        };

        let effective = amount * balance::effectiveness(kind, self.element);
        self.health -= effective;

        hooks
            .feedback
            .damage_number(self.position, effective.floor() as u32, kind);

        let died = self.health <= 0.0;
        self.health = self.health.clamp(0.0, self.max_health);
        hooks.feedback.health_changed(self.id, self.health_fraction());

        if died {
            self.dead = true;
            self.die(hooks);
        }
        died
    }

    /// Death bookkeeping: effects are cleared through the regular removal
    /// path and the kill reward is paid out. Rendering a death is the
    /// client's business, not ours.
    fn die(&mut self, hooks: &mut SimHooks<'_>) {
        debug!(id = %self.id, gold = self.gold_value, "enemy died");
        self.clear_all_effects(hooks);
        hooks.economy.gold_earned(self.id, self.gold_value);
        hooks.economy.refresh_hud();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::{Element, EnemyKind};
    use crate::config::SimConfig;
    use crate::enemy::{EnemyId, EnemySpawn};
    use crate::hooks::{CombatFeedback, EconomyHooks, NullHooks};
    use crate::path::StalledPathProvider;
    use bevy::math::Vec3;

    #[derive(Default)]
    struct Recorder {
        damage_numbers: Vec<(u32, DamageKind)>,
        fractions: Vec<f32>,
        gold: Vec<u64>,
        hud_refreshes: u32,
    }

    impl CombatFeedback for Recorder {
        fn damage_number(&mut self, _position: Vec3, amount: u32, kind: DamageKind) {
            self.damage_numbers.push((amount, kind));
        }

        fn health_changed(&mut self, _enemy: EnemyId, fraction: f32) {
            self.fractions.push(fraction);
        }
    }

    impl EconomyHooks for Recorder {
        fn gold_earned(&mut self, _enemy: EnemyId, amount: u64) {
            self.gold.push(amount);
        }

        fn refresh_hud(&mut self) {
            self.hud_refreshes += 1;
        }
    }

    fn spawn(kind: EnemyKind, element: Element) -> Enemy {
        Enemy::spawn(
            EnemyId(9),
            EnemySpawn::new(kind, element, 1, Vec3::ZERO),
            &SimConfig::default(),
        )
    }

    #[test]
    fn test_effectiveness_scales_damage() {
        let mut paths = StalledPathProvider;
        let mut recorder = Recorder::default();
        let mut economy = NullHooks;
        let mut hooks = SimHooks {
            paths: &mut paths,
            feedback: &mut recorder,
            economy: &mut economy,
        };
        // water defender halves fire damage
        let mut enemy = spawn(EnemyKind::Armored, Element::Water);
        let killed = enemy.take_damage(50.0, DamageKind::Fire, &mut hooks);
        assert!(!killed);
        // 200 * 1.2 water health mod = 240, minus 25 effective
        assert!((enemy.health() - 215.0).abs() < 1e-3);
        assert_eq!(recorder.damage_numbers, vec![(25, DamageKind::Fire)]);
    }

    #[test]
    fn test_overkill_fire_on_water_scenario() {
        let mut paths = StalledPathProvider;
        let mut recorder = Recorder::default();
        let mut feedback = NullHooks;
        let mut hooks = SimHooks {
            paths: &mut paths,
            feedback: &mut feedback,
            economy: &mut recorder,
        };
        // fast water = 70 * 1.2 = 84 HP; each 150 fire volley lands 75
        let mut enemy = spawn(EnemyKind::Fast, Element::Water);
        assert!(!enemy.take_damage(150.0, DamageKind::Fire, &mut hooks));
        assert!(enemy.take_damage(150.0, DamageKind::Fire, &mut hooks));
        assert!(enemy.is_dead());
        assert!((enemy.health() - 0.0).abs() < f32::EPSILON, "clamped after death");
        assert_eq!(recorder.gold, vec![enemy.gold_value()]);
        assert_eq!(recorder.hud_refreshes, 1);
    }

    #[test]
    fn test_dead_target_idempotent() {
        let mut paths = StalledPathProvider;
        let mut recorder = Recorder::default();
        let mut economy = NullHooks;
        let mut enemy = spawn(EnemyKind::Basic, Element::Normal);

        let killed = {
            let mut hooks = SimHooks {
                paths: &mut paths,
                feedback: &mut recorder,
                economy: &mut economy,
            };
            enemy.take_damage(500.0, DamageKind::Normal, &mut hooks)
        };
        assert!(killed);
        let events = recorder.damage_numbers.len();

        let killed_again = {
            let mut hooks = SimHooks {
                paths: &mut paths,
                feedback: &mut recorder,
                economy: &mut economy,
            };
            enemy.take_damage(500.0, DamageKind::Normal, &mut hooks)
        };
        assert!(!killed_again);
        assert!((enemy.health() - 0.0).abs() < f32::EPSILON);
        assert_eq!(recorder.damage_numbers.len(), events, "no feedback for dead targets");
    }

    #[test]
    fn test_health_fraction_reported() {
        let mut paths = StalledPathProvider;
        let mut recorder = Recorder::default();
        let mut economy = NullHooks;
        let mut hooks = SimHooks {
            paths: &mut paths,
            feedback: &mut recorder,
            economy: &mut economy,
        };
        let mut enemy = spawn(EnemyKind::Basic, Element::Normal);
        enemy.take_damage(25.0, DamageKind::Normal, &mut hooks);
        assert_eq!(recorder.fractions.len(), 1);
        assert!((recorder.fractions[0] - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_negative_damage_normalized() {
        let mut paths = StalledPathProvider;
        let mut feedback = NullHooks;
        let mut economy = NullHooks;
        let mut hooks = SimHooks {
            paths: &mut paths,
            feedback: &mut feedback,
            economy: &mut economy,
        };
        let mut enemy = spawn(EnemyKind::Basic, Element::Normal);
        assert!(!enemy.take_damage(-40.0, DamageKind::Normal, &mut hooks));
        assert!((enemy.health() - 100.0).abs() < f32::EPSILON, "no healing through damage");
    }
}
