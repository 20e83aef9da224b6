//! Read-only view of the simulation handed to the renderer each tick

use serde::{Deserialize, Serialize};

use super::actors::PaddleSide;
use super::collision::BoundingVolume;
use super::state::{GameEvent, RoundState, Scores};
use crate::Color;

/// Which kind of actor a sprite draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Paddle,
    Ball,
    Target,
}

/// Everything needed to draw one actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteView {
    pub kind: ActorKind,
    pub id: u32,
    pub volume: BoundingVolume,
    pub color: Color,
    /// Owning side for paddles, last toucher for the ball
    pub side: Option<PaddleSide>,
}

/// State of the whole game after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub state: RoundState,
    pub paddles: Vec<SpriteView>,
    pub ball: SpriteView,
    /// Live targets only
    pub targets: Vec<SpriteView>,
    pub scores: Scores,
    pub lives: Option<u32>,
    /// What happened during this tick
    pub events: Vec<GameEvent>,
}
