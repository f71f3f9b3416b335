//! Property-based tests using proptest.
//!
//! Invariants that must hold for all inputs:
//! - Spawn stats: pure, deterministic, positive, monotonic in the wave
//! - Effectiveness: every pairing resolves to one of the chart multipliers
//! - Damage: dead targets are inert
//! - Movement: one step never overshoots or reverses

use bevy::math::{Vec2, Vec3};
use proptest::prelude::*;
use proptest::sample::select;

use gridwave_core::balance::{
    effectiveness, scaled_gold, scaled_health, spawn_speed, DamageKind, Element, EnemyKind,
};
use gridwave_core::config::SimConfig;
use gridwave_core::enemy::{Enemy, EnemyId, EnemySpawn};
use gridwave_core::hooks::{NullHooks, SimHooks};
use gridwave_core::path::StalledPathProvider;
use gridwave_core::wave::WaveSpec;

const KINDS: [EnemyKind; 5] = [
    EnemyKind::Basic,
    EnemyKind::Fast,
    EnemyKind::Armored,
    EnemyKind::Flying,
    EnemyKind::Boss,
];

const ELEMENTS: [Element; 7] = [
    Element::Normal,
    Element::Fire,
    Element::Water,
    Element::Earth,
    Element::Air,
    Element::Dark,
    Element::Light,
];

const DAMAGE_KINDS: [DamageKind; 8] = [
    DamageKind::Normal,
    DamageKind::Fire,
    DamageKind::Water,
    DamageKind::Earth,
    DamageKind::Air,
    DamageKind::Dark,
    DamageKind::Light,
    DamageKind::Poison,
];

fn with_hooks<R>(f: impl FnOnce(&mut SimHooks<'_>) -> R) -> R {
    let mut paths = StalledPathProvider;
    let mut feedback = NullHooks;
    let mut economy = NullHooks;
    let mut hooks = SimHooks {
        paths: &mut paths,
        feedback: &mut feedback,
        economy: &mut economy,
    };
    f(&mut hooks)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_spawn_stats_deterministic(
        kind in select(KINDS.to_vec()),
        element in select(ELEMENTS.to_vec()),
        wave in 1u32..=200,
    ) {
        let first = (
            scaled_health(kind, element, wave),
            scaled_gold(kind, wave),
            spawn_speed(kind, element),
        );
        let second = (
            scaled_health(kind, element, wave),
            scaled_gold(kind, wave),
            spawn_speed(kind, element),
        );
        prop_assert_eq!(first, second);
        prop_assert!(first.0 > 0.0, "health must be positive, got {}", first.0);
        prop_assert!(first.2 > 0.0, "speed must be positive, got {}", first.2);
    }

    #[test]
    fn prop_health_monotonic_in_wave(
        kind in select(KINDS.to_vec()),
        element in select(ELEMENTS.to_vec()),
        wave in 1u32..=199,
    ) {
        prop_assert!(
            scaled_health(kind, element, wave + 1) >= scaled_health(kind, element, wave)
        );
        prop_assert!(scaled_gold(kind, wave + 1) >= scaled_gold(kind, wave));
    }

    #[test]
    fn prop_effectiveness_comes_from_the_chart(
        kind in select(DAMAGE_KINDS.to_vec()),
        element in select(ELEMENTS.to_vec()),
    ) {
        let multiplier = effectiveness(kind, element);
        prop_assert!(
            multiplier == 0.5 || multiplier == 1.0 || multiplier == 1.5,
            "unexpected multiplier {multiplier}"
        );
    }

    #[test]
    fn prop_self_damping(element in select(ELEMENTS.to_vec())) {
        let multiplier = effectiveness(DamageKind::from(element), element);
        if element == Element::Normal {
            prop_assert_eq!(multiplier, 1.0);
        } else {
            prop_assert_eq!(multiplier, 0.5);
        }
    }

    #[test]
    fn prop_dead_targets_are_inert(
        amount in 0.0f32..10_000.0,
        kind in select(DAMAGE_KINDS.to_vec()),
    ) {
        with_hooks(|hooks| {
            let mut enemy = Enemy::spawn(
                EnemyId(1),
                EnemySpawn::new(EnemyKind::Basic, Element::Normal, 1, Vec3::ZERO),
                &SimConfig::default(),
            );
            prop_assert!(enemy.take_damage(1_000_000.0, DamageKind::Normal, hooks));
            prop_assert!((enemy.health() - 0.0).abs() < f32::EPSILON);

            prop_assert!(!enemy.take_damage(amount, kind, hooks));
            prop_assert!((enemy.health() - 0.0).abs() < f32::EPSILON);
            Ok(())
        })?;
    }

    #[test]
    fn prop_one_step_never_overshoots(
        kind in select(KINDS.to_vec()),
        element in select(ELEMENTS.to_vec()),
        dt in 0.0f32..30.0,
        distance in 0.25f32..100.0,
    ) {
        with_hooks(|hooks| {
            let mut enemy = Enemy::spawn(
                EnemyId(1),
                EnemySpawn::new(kind, element, 1, Vec3::ZERO),
                &SimConfig::default(),
            );
            enemy.install_path(vec![Vec2::new(distance, 0.0)]);
            enemy.update(dt, hooks);

            let x = enemy.ground_position().x;
            prop_assert!(x >= 0.0, "never steps backward, got {x}");
            prop_assert!(x <= distance + 1e-3, "overshot target {distance}, got {x}");
            Ok(())
        })?;
    }

    #[test]
    fn prop_wave_composition_deterministic(number in 1u32..=100, seed in any::<u64>()) {
        let first = WaveSpec::compose(number, seed);
        let second = WaveSpec::compose(number, seed);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.total_count() > 0);
    }
}
