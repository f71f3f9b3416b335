//! Balance tables for the enemy simulation.
//!
//! Pure lookup data: per-kind base stats, elemental modifiers, wave-scaling
//! formulas and the elemental effectiveness chart. Everything here is a
//! deterministic function of its inputs so spawn-time stats can never drift
//! between client and server.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{
    FALLBACK_GOLD, FALLBACK_HEALTH, FALLBACK_SPEED, WAVE_GOLD_STEP, WAVE_HEALTH_STEP,
};

/// Enemy archetype. Closed set; name-based entry points fall back to
/// [`BaseStats::FALLBACK`] for unrecognized names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Armored,
    Flying,
    Boss,
}

impl EnemyKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "basic" => Some(Self::Basic),
            "fast" => Some(Self::Fast),
            "armored" => Some(Self::Armored),
            "flying" => Some(Self::Flying),
            "boss" => Some(Self::Boss),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Fast => "fast",
            Self::Armored => "armored",
            Self::Flying => "flying",
            Self::Boss => "boss",
        }
    }
}

/// Element an enemy is attuned to. Modifies spawn stats and incoming damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Normal,
    Fire,
    Water,
    Earth,
    Air,
    Dark,
    Light,
}

impl Element {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "normal" => Some(Self::Normal),
            "fire" => Some(Self::Fire),
            "water" => Some(Self::Water),
            "earth" => Some(Self::Earth),
            "air" => Some(Self::Air),
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Earth => "earth",
            Self::Air => "air",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Damage typing on an incoming hit. Elemental kinds map onto the
/// effectiveness chart; `Poison` (and any future non-elemental kind)
/// resolves to the neutral 1.0 multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    Normal,
    Fire,
    Water,
    Earth,
    Air,
    Dark,
    Light,
    Poison,
}

impl DamageKind {
    /// Element this damage kind attacks as, if it has one.
    pub fn element(&self) -> Option<Element> {
        match self {
            Self::Normal => Some(Element::Normal),
            Self::Fire => Some(Element::Fire),
            Self::Water => Some(Element::Water),
            Self::Earth => Some(Element::Earth),
            Self::Air => Some(Element::Air),
            Self::Dark => Some(Element::Dark),
            Self::Light => Some(Element::Light),
            Self::Poison => None,
        }
    }
}

impl From<Element> for DamageKind {
    fn from(element: Element) -> Self {
        match element {
            Element::Normal => Self::Normal,
            Element::Fire => Self::Fire,
            Element::Water => Self::Water,
            Element::Earth => Self::Earth,
            Element::Air => Self::Air,
            Element::Dark => Self::Dark,
            Element::Light => Self::Light,
        }
    }
}

/// Per-kind base stats before elemental and wave scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub speed: f32,
    pub health: f32,
    pub gold: u64,
    pub airborne: bool,
}

impl BaseStats {
    /// Stats substituted for unrecognized kind names.
    pub const FALLBACK: Self = Self {
        speed: FALLBACK_SPEED,
        health: FALLBACK_HEALTH,
        gold: FALLBACK_GOLD,
        airborne: false,
    };
}

/// Base stats for a known enemy kind.
pub fn base_stats(kind: EnemyKind) -> BaseStats {
    match kind {
        EnemyKind::Basic => BaseStats {
            speed: 1.6,
            health: 100.0,
            gold: 5,
            airborne: false,
        },
        EnemyKind::Fast => BaseStats {
            speed: 2.4,
            health: 70.0,
            gold: 8,
            airborne: false,
        },
        EnemyKind::Armored => BaseStats {
            speed: 1.0,
            health: 200.0,
            gold: 12,
            airborne: false,
        },
        EnemyKind::Flying => BaseStats {
            speed: 2.0,
            health: 80.0,
            gold: 10,
            airborne: true,
        },
        EnemyKind::Boss => BaseStats {
            speed: 0.8,
            health: 1000.0,
            gold: 50,
            airborne: false,
        },
    }
}

/// Base stats for a kind named in external data. Unknown names warn and
/// resolve to [`BaseStats::FALLBACK`].
pub fn stats_for_name(name: &str) -> BaseStats {
    match EnemyKind::from_name(name) {
        Some(kind) => base_stats(kind),
        None => {
            warn!(kind = name, "unknown enemy kind, using fallback stats");
            BaseStats::FALLBACK
        }
    }
}

/// Multipliers an element applies to (health, speed) at spawn.
pub fn element_modifiers(element: Element) -> (f32, f32) {
    match element {
        Element::Normal => (1.0, 1.0),
        Element::Fire => (1.1, 1.1),
        Element::Water => (1.2, 0.9),
        Element::Earth => (1.3, 0.8),
        Element::Air => (0.9, 1.2),
        Element::Dark => (1.5, 0.7),
        Element::Light => (0.8, 1.3),
    }
}

/// Max health for `(kind, element, wave)`, computed once at spawn.
pub fn scaled_health(kind: EnemyKind, element: Element, wave: u32) -> f32 {
    let (health_mult, _) = element_modifiers(element);
    let wave_mult = 1.0 + wave.saturating_sub(1) as f32 * WAVE_HEALTH_STEP;
    base_stats(kind).health * health_mult * wave_mult
}

/// Gold reward for `(kind, wave)`. Elements never modify gold.
pub fn scaled_gold(kind: EnemyKind, wave: u32) -> u64 {
    let wave_mult = 1.0 + wave.saturating_sub(1) as f32 * WAVE_GOLD_STEP;
    (base_stats(kind).gold as f32 * wave_mult).floor() as u64
}

/// Movement speed for `(kind, element)` before status effects.
pub fn spawn_speed(kind: EnemyKind, element: Element) -> f32 {
    let (_, speed_mult) = element_modifiers(element);
    base_stats(kind).speed * speed_mult
}

/// Damage multiplier for an attack of `attack` kind against a defender of
/// `defender` element.
///
/// Every element is half-effective against itself except `Normal`; the
/// asymmetric pairs below override; every other combination (including
/// non-elemental kinds such as poison) is neutral 1.0.
pub fn effectiveness(attack: DamageKind, defender: Element) -> f32 {
    let Some(attacker) = attack.element() else {
        return 1.0;
    };
    if attacker == defender {
        return if attacker == Element::Normal { 1.0 } else { 0.5 };
    }
    match (attacker, defender) {
        (Element::Fire, Element::Water) => 0.5,
        (Element::Water, Element::Fire) => 1.5,
        (Element::Air, Element::Water) => 1.5,
        (Element::Water, Element::Air) => 0.5,
        (Element::Earth, Element::Water) => 1.5,
        (Element::Water, Element::Earth) => 0.5,
        (Element::Light, Element::Dark) => 1.5,
        (Element::Dark, Element::Light) => 1.5,
        _ => 1.0,
    }
}
