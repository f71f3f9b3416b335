//! Asynchronous path acquisition.
//!
//! Pathfinding itself lives outside this crate; enemies only consume an
//! ordered waypoint list. A request is non-blocking: the provider hands back
//! a [`PathRequest`] immediately and fulfills the paired [`PathSlot`]
//! whenever its search completes, possibly several ticks later and possibly
//! from another thread. Enemies poll the request during their update.

use std::sync::{Arc, Mutex};

use bevy::math::Vec2;
use thiserror::Error;
use tracing::warn;

use crate::enemy::EnemyId;

/// Ground-plane point an enemy must reach in order. The last waypoint of a
/// path is the exit.
pub type Waypoint = Vec2;

/// Why a path request could not be served.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("no route to the exit")]
    Unreachable,
    #[error("path provider unavailable: {0}")]
    Unavailable(String),
}

/// Collaborator that computes routes to the exit.
///
/// Implementations must return immediately; the search result is delivered
/// through the [`PathSlot`] handed out by [`path_channel`].
pub trait PathProvider {
    fn request_path(&mut self, enemy: EnemyId, from: Vec2) -> PathRequest;
}

type Slot = Arc<Mutex<Option<Result<Vec<Waypoint>, PathError>>>>;

/// Consumer half of a path request. Held by the enemy and polled once per
/// tick while it awaits a path.
#[derive(Debug)]
pub struct PathRequest {
    slot: Slot,
}

/// Producer half of a path request. Held by the provider; fulfilling or
/// failing it consumes the handle, so each request resolves at most once.
/// Fulfilling a request whose consumer is gone is a silent no-op.
#[derive(Debug)]
pub struct PathSlot {
    slot: Slot,
}

/// Result of polling a [`PathRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum PathPoll {
    Pending,
    Ready(Vec<Waypoint>),
    Failed(PathError),
}

/// Create a linked request/slot pair.
pub fn path_channel() -> (PathRequest, PathSlot) {
    let slot: Slot = Arc::new(Mutex::new(None));
    (
        PathRequest { slot: Arc::clone(&slot) },
        PathSlot { slot },
    )
}

impl PathRequest {
    /// Take the resolution if one has arrived. A `Ready`/`Failed` result is
    /// returned once; subsequent polls report `Pending` again.
    pub fn poll(&mut self) -> PathPoll {
        match self.slot.lock() {
            Ok(mut guard) => match guard.take() {
                None => PathPoll::Pending,
                Some(Ok(waypoints)) => PathPoll::Ready(waypoints),
                Some(Err(err)) => PathPoll::Failed(err),
            },
            Err(_) => {
                warn!("path request slot poisoned, treating as failed");
                PathPoll::Failed(PathError::Unavailable("slot poisoned".into()))
            }
        }
    }
}

impl PathSlot {
    pub fn fulfill(self, waypoints: Vec<Waypoint>) {
        if let Ok(mut guard) = self.slot.lock() {
            *guard = Some(Ok(waypoints));
        }
    }

    pub fn fail(self, error: PathError) {
        if let Ok(mut guard) = self.slot.lock() {
            *guard = Some(Err(error));
        }
    }
}

/// Provider that serves every request with the same pre-baked route,
/// resolved immediately. Routes all enemies down a single lane; handy for
/// demos, benches and tests.
#[derive(Debug, Clone)]
pub struct FixedPathProvider {
    route: Vec<Waypoint>,
}

impl FixedPathProvider {
    pub fn new(route: Vec<Waypoint>) -> Self {
        Self { route }
    }

    pub fn exit(&self) -> Option<Waypoint> {
        self.route.last().copied()
    }
}

impl PathProvider for FixedPathProvider {
    fn request_path(&mut self, _enemy: EnemyId, _from: Vec2) -> PathRequest {
        let (request, slot) = path_channel();
        slot.fulfill(self.route.clone());
        request
    }
}

/// Provider that never resolves. Enemies stay in awaiting-path behavior
/// forever; the placeholder default until a real provider is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct StalledPathProvider;

impl PathProvider for StalledPathProvider {
    fn request_path(&mut self, _enemy: EnemyId, _from: Vec2) -> PathRequest {
        let (request, _slot) = path_channel();
        request
    }
}
