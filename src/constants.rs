//! Centralized gameplay constants for the enemy simulation core.
//!
//! Eliminates magic numbers duplicated across movement, status and damage
//! code. Per-kind stat tables live in `balance` as the single source of
//! truth.

// =====================================================
// Movement
// =====================================================

/// Horizontal distance below which a waypoint counts as reached
pub const WAYPOINT_EPSILON: f32 = 0.2;

/// Ground height an enemy is held at while waiting for a path
pub const GROUND_HEIGHT: f32 = 0.5;

/// Height enemies are parked at after leaving through the exit,
/// below the play volume so clients stop drawing them
pub const EXIT_SINK_Y: f32 = -100.0;

// =====================================================
// Path acquisition
// =====================================================

/// Default seconds between path re-requests for one enemy
pub const DEFAULT_PATH_COOLDOWN: f32 = 2.0;

// =====================================================
// Status effects
// =====================================================

/// Slow factor used when the caller does not supply one
pub const DEFAULT_SLOW_FACTOR: f32 = 0.5;

/// Poison damage per second used when the caller does not supply one
pub const DEFAULT_POISON_DPS: f32 = 10.0;

// =====================================================
// Balance fallbacks (unknown kind names)
// =====================================================

/// Speed substituted for an unrecognized enemy kind name
pub const FALLBACK_SPEED: f32 = 1.5;

/// Health substituted for an unrecognized enemy kind name
pub const FALLBACK_HEALTH: f32 = 100.0;

/// Gold substituted for an unrecognized enemy kind name
pub const FALLBACK_GOLD: u64 = 5;

// =====================================================
// Wave scaling
// =====================================================

/// Additional health per wave past the first (+10%)
pub const WAVE_HEALTH_STEP: f32 = 0.10;

/// Additional gold per wave past the first (+5%, floored)
pub const WAVE_GOLD_STEP: f32 = 0.05;
