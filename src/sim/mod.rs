//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG or an injected direction source only
//! - Stable iteration order (by actor ID)
//! - No rendering, input polling, or platform dependencies

pub mod actors;
pub mod collision;
pub mod formation;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use actors::{
    Ball, BallStep, Bounded, ControlIntent, Edge, Paddle, PaddleSide, Playfield, Target, Tickable,
    Walls,
};
pub use collision::{Aabb, BoundingVolume, overlap_depth, overlaps};
pub use formation::Formation;
pub use rng::{DirectionSource, FixedSigns, SeededDirections};
pub use snapshot::{ActorKind, Snapshot, SpriteView};
pub use state::{GameEvent, RoundState, Scores, Simulation};
pub use tick::{TickInput, tick};
