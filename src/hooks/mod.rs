//! Outbound collaborator seams.
//!
//! The simulation never reaches into a renderer or game state directly;
//! every externally visible side effect goes through these narrow traits.
//! All notifications are fire-and-forget: the core does not depend on their
//! completion, and every method defaults to a no-op so collaborators
//! implement only what they care about.

use bevy::math::Vec3;

use crate::balance::DamageKind;
use crate::enemy::status::StatusKey;
use crate::enemy::EnemyId;
use crate::path::PathProvider;

/// Render-side feedback: damage popups, health bars, status icons.
pub trait CombatFeedback {
    /// A hit landed; `amount` is the floored effective damage for display.
    fn damage_number(&mut self, _position: Vec3, _amount: u32, _kind: DamageKind) {}

    /// Health changed; `fraction` is `health / max_health` in `[0, 1]`.
    fn health_changed(&mut self, _enemy: EnemyId, _fraction: f32) {}

    fn status_applied(&mut self, _enemy: EnemyId, _status: &StatusKey) {}

    fn status_removed(&mut self, _enemy: EnemyId, _status: &StatusKey) {}
}

/// Player-economy side: kill rewards and the HUD refresh they trigger.
pub trait EconomyHooks {
    fn gold_earned(&mut self, _enemy: EnemyId, _amount: u64) {}

    fn refresh_hud(&mut self) {}
}

/// Collaborator that ignores every notification. The default for tests and
/// headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHooks;

impl CombatFeedback for NullHooks {}
impl EconomyHooks for NullHooks {}

/// Borrowed collaborator bundle passed into every mutating enemy entry
/// point. Dependencies are declared here instead of being reached for
/// through a shared game context.
pub struct SimHooks<'a> {
    pub paths: &'a mut dyn PathProvider,
    pub feedback: &'a mut dyn CombatFeedback,
    pub economy: &'a mut dyn EconomyHooks,
}
