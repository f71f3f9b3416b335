//! Wave composition and spawn scheduling.
//!
//! A wave is a deterministic function of `(wave number, seed)`: the same
//! inputs always produce the same roster, so server and client can agree on
//! a wave without exchanging it. Composition uses a seeded xoshiro stream,
//! never the thread RNG.

use std::collections::VecDeque;

use bevy::math::Vec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::balance::{Element, EnemyKind};
use crate::enemy::EnemySpawn;

/// Mixing constant spreading consecutive wave numbers across the seed space.
const WAVE_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Largest basic contingent a single wave fields.
const MAX_BASICS: u32 = 24;

/// One homogeneous group within a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveEntry {
    pub kind: EnemyKind,
    pub element: Element,
    pub count: u32,
}

/// The full roster for one wave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub number: u32,
    pub entries: Vec<WaveEntry>,
}

impl WaveSpec {
    /// Compose the roster for a wave. Wave 0 is treated as wave 1.
    ///
    /// The mix grows with the wave number: armored units join from wave 3,
    /// flying from wave 5, every fifth wave adds a fast swarm and every
    /// tenth a boss. Elements drift from mostly-normal toward elemental as
    /// the waves climb.
    pub fn compose(number: u32, seed: u64) -> Self {
        let number = number.max(1);
        let mut rng =
            Xoshiro256PlusPlus::seed_from_u64(seed ^ u64::from(number).wrapping_mul(WAVE_MIX));

        let mut entries = Vec::new();
        entries.push(WaveEntry {
            kind: EnemyKind::Basic,
            element: roll_element(&mut rng, number),
            count: (4 + number).min(MAX_BASICS),
        });
        if number >= 3 {
            entries.push(WaveEntry {
                kind: EnemyKind::Armored,
                element: roll_element(&mut rng, number),
                count: (number / 3).min(8),
            });
        }
        if number >= 5 {
            entries.push(WaveEntry {
                kind: EnemyKind::Flying,
                element: roll_element(&mut rng, number),
                count: (number / 4).min(6),
            });
        }
        if number % 5 == 0 {
            entries.push(WaveEntry {
                kind: EnemyKind::Fast,
                element: roll_element(&mut rng, number),
                count: number.min(12),
            });
        }
        if number % 10 == 0 {
            entries.push(WaveEntry {
                kind: EnemyKind::Boss,
                element: roll_element(&mut rng, number),
                count: 1,
            });
        }

        debug!(wave = number, groups = entries.len(), "wave composed");
        Self { number, entries }
    }

    pub fn total_count(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Elemental variety grows with the wave number; early waves stay mostly
/// normal so players meet effectiveness matchups gradually.
fn roll_element(rng: &mut Xoshiro256PlusPlus, number: u32) -> Element {
    let elemental_chance = (number as f32 * 0.08).min(0.75);
    if rng.gen::<f32>() >= elemental_chance {
        return Element::Normal;
    }
    match rng.gen_range(0..6) {
        0 => Element::Fire,
        1 => Element::Water,
        2 => Element::Earth,
        3 => Element::Air,
        4 => Element::Dark,
        _ => Element::Light,
    }
}

/// Turns a composed wave into timed spawn emissions: one enemy every
/// `spacing` seconds from the given spawn point, first one immediately.
#[derive(Debug)]
pub struct WaveScheduler {
    queue: VecDeque<EnemySpawn>,
    spacing: f32,
    until_next: f32,
}

impl WaveScheduler {
    pub fn new(spec: &WaveSpec, spawn_point: Vec3, spacing: f32) -> Self {
        let mut queue = VecDeque::new();
        for entry in &spec.entries {
            for _ in 0..entry.count {
                queue.push_back(EnemySpawn::new(
                    entry.kind,
                    entry.element,
                    spec.number,
                    spawn_point,
                ));
            }
        }
        Self {
            queue,
            spacing: spacing.max(0.0),
            until_next: 0.0,
        }
    }

    /// Advance the spawn clock, returning every spawn that came due. A
    /// large `dt` releases several at once.
    pub fn tick(&mut self, dt: f32) -> Vec<EnemySpawn> {
        let mut due = Vec::new();
        if self.queue.is_empty() {
            return due;
        }
        self.until_next -= dt;
        while self.until_next <= 0.0 {
            match self.queue.pop_front() {
                Some(spawn) => {
                    due.push(spawn);
                    self.until_next += self.spacing;
                }
                None => break,
            }
        }
        due
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}
