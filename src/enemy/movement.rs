//! Path-follow movement.
//!
//! Three movement states, driven once per tick from `Enemy::update`:
//! awaiting a path (no waypoints; request one, rate-limited by the
//! cooldown), following (advance along the waypoint list on the ground
//! plane, never overshooting), and reached-end (terminal, the enemy is
//! parked out of the play volume and never moves again).

use tracing::{debug, trace, warn};

use crate::constants::{EXIT_SINK_Y, GROUND_HEIGHT, WAYPOINT_EPSILON};
use crate::hooks::SimHooks;
use crate::path::PathPoll;

use super::Enemy;

impl Enemy {
    /// One tick of movement. Callers have already ruled out terminal
    /// states and ticked status effects.
    pub(super) fn advance_movement(&mut self, dt: f32, hooks: &mut SimHooks<'_>) {
        if self.waypoints.is_empty() {
            self.await_path(hooks);
            return;
        }

        let Some(target) = self.current_waypoint() else {
            // The list shrank under us (externally replaced); treat the
            // path as gone and re-request rather than index blindly.
            warn!(id = %self.id, "waypoint index out of range, dropping path");
            self.clear_path();
            return;
        };

        let to_target = target - self.ground_position();
        let distance = to_target.length();

        if distance < WAYPOINT_EPSILON {
            self.path_index += 1;
            if self.path_index >= self.waypoints.len() {
                self.reach_end();
            }
            return;
        }

        let step = self.speed * dt;
        let fraction = (step / distance).min(1.0);
        self.position.x += to_target.x * fraction;
        self.position.z += to_target.y * fraction;
        self.position.y = GROUND_HEIGHT;
        trace!(
            id = %self.id,
            waypoint = self.path_index,
            distance,
            "following path"
        );
    }

    /// Awaiting-path behavior: hold the enemy at ground height where the
    /// player can see it, poll the in-flight request, and issue a new one
    /// only once the cooldown window has elapsed. A pending request also
    /// blocks re-requesting, so one enemy never has two searches in flight.
    fn await_path(&mut self, hooks: &mut SimHooks<'_>) {
        self.position.y = GROUND_HEIGHT;

        if let Some(request) = self.pending_path.as_mut() {
            match request.poll() {
                PathPoll::Pending => {}
                PathPoll::Ready(waypoints) => {
                    self.pending_path = None;
                    if waypoints.is_empty() {
                        debug!(id = %self.id, "provider returned an empty path");
                    } else {
                        debug!(id = %self.id, len = waypoints.len(), "path installed");
                        self.install_path(waypoints);
                    }
                }
                PathPoll::Failed(err) => {
                    warn!(id = %self.id, error = %err, "path request failed, will retry");
                    self.pending_path = None;
                }
            }
            return;
        }

        if self.clock >= self.last_path_request + f64::from(self.path_cooldown) {
            self.last_path_request = self.clock;
            let from = self.ground_position();
            self.pending_path = Some(hooks.paths.request_path(self.id, from));
        }
    }

    fn reach_end(&mut self) {
        debug!(id = %self.id, "enemy reached the exit");
        self.reached_end = true;
        self.position.y = EXIT_SINK_Y;
    }
}
