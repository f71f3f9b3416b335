//! Headless demo: marches three waves down a fixed lane past a single
//! stand-in tower and reports what escaped and what paid out.

use anyhow::{Context, Result};
use bevy::math::{Vec2, Vec3};
use tracing::info;

use gridwave_core::balance::DamageKind;
use gridwave_core::config::SimConfig;
use gridwave_core::enemy::EnemyId;
use gridwave_core::hooks::{EconomyHooks, NullHooks, SimHooks};
use gridwave_core::logging;
use gridwave_core::path::FixedPathProvider;
use gridwave_core::registry::EnemyRegistry;
use gridwave_core::wave::{WaveScheduler, WaveSpec};

/// Stand-in for the player economy: just tallies kill gold.
#[derive(Default)]
struct GoldCounter {
    total: u64,
}

impl EconomyHooks for GoldCounter {
    fn gold_earned(&mut self, _enemy: EnemyId, amount: u64) {
        self.total += amount;
    }
}

/// Damage the stand-in tower deals per second to its focused target.
const TOWER_DPS: f32 = 45.0;

fn main() -> Result<()> {
    logging::init_tracing_default();

    let config = SimConfig::default();
    let route = vec![
        Vec2::new(-6.0, -6.0),
        Vec2::new(-6.0, 2.0),
        Vec2::new(0.0, 2.0),
        Vec2::new(0.0, -4.0),
        Vec2::new(6.0, -4.0),
        Vec2::new(6.0, 6.0),
    ];
    let exit = *route.last().context("demo route is empty")?;
    let spawn_point = Vec3::new(-6.0, 0.5, -8.0);

    let mut registry = EnemyRegistry::new(config.clone());
    let mut paths = FixedPathProvider::new(route);
    let mut feedback = NullHooks;
    let mut economy = GoldCounter::default();

    let dt = 1.0 / 60.0;
    let mut killed = 0u32;
    let mut escaped = 0u32;

    for wave_number in 1..=3u32 {
        let spec = WaveSpec::compose(wave_number, config.wave_seed);
        info!(
            wave = wave_number,
            enemies = spec.total_count(),
            "starting wave"
        );
        let mut scheduler = WaveScheduler::new(&spec, spawn_point, config.wave_spacing);

        let mut frames = 0u32;
        while !(scheduler.is_finished() && registry.is_empty()) {
            for spawn in scheduler.tick(dt) {
                let id = registry.spawn(spawn);
                if let Some(enemy) = registry.get_mut(id) {
                    enemy.set_target_position(exit);
                }
            }

            let mut hooks = SimHooks {
                paths: &mut paths,
                feedback: &mut feedback,
                economy: &mut economy,
            };
            registry.update_all(dt, &mut hooks);

            // the stand-in tower burns whoever is closest to escaping
            if let Some(&target) = registry.ids_by_exit_distance().first() {
                if let Some(enemy) = registry.get_mut(target) {
                    let mut hooks = SimHooks {
                        paths: &mut paths,
                        feedback: &mut feedback,
                        economy: &mut economy,
                    };
                    enemy.take_damage(TOWER_DPS * dt, DamageKind::Fire, &mut hooks);
                }
            }

            for enemy in registry.drain_terminal() {
                if enemy.reached_end() {
                    escaped += 1;
                } else {
                    killed += 1;
                }
            }

            frames += 1;
            if frames > 60 * 600 {
                info!("wave ran long, moving on");
                break;
            }
        }
    }

    info!(killed, escaped, gold = economy.total, "demo finished");
    Ok(())
}
