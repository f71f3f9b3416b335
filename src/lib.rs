//! Gridwave - Enemy Simulation Core
//!
//! This crate provides the deterministic enemy logic for the Gridwave
//! tower defense:
//! - Balance tables (per-kind stats, elemental modifiers, wave scaling,
//!   effectiveness chart)
//! - Status effects (slow/stun/poison with snapshot-based restoration)
//! - Path-follow movement over asynchronously delivered waypoint lists
//! - Damage resolution, death rewards and lifecycle
//! - The registry owning the live set, wave composition and scheduling
//! - Bevy plugin wiring for hosts that run the sim inside an app
//!
//! Rendering, pathfinding search, tower logic and UI live in collaborating
//! crates; they talk to this core through the `hooks` and `path` traits
//! and the `engine` events.

pub mod balance;
pub mod config;
pub mod constants;
pub mod engine;
pub mod enemy;
pub mod hooks;
pub mod logging;
pub mod path;
pub mod registry;
pub mod wave;
