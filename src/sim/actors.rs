//! Actors: paddles, the ball, and targets
//!
//! Each actor owns its own motion rule. Collision *responses* live here too
//! (`on_paddle_hit`, `on_target_hit`); deciding *when* they fire is the tick
//! pipeline's job.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, BoundingVolume};
use super::rng::DirectionSource;
use super::snapshot::{ActorKind, SpriteView};
use crate::Color;
use crate::settings::PaddleLayout;

/// Anything the renderer can draw and the collision pass can test
pub trait Bounded {
    fn bounds(&self) -> BoundingVolume;
    fn sprite(&self) -> SpriteView;
}

/// Anything that advances on its own each tick
pub trait Tickable {
    /// What the step reports back to the caller
    type Outcome;

    fn tick(&mut self, dt: f32, field: &Playfield) -> Self::Outcome;
}

/// The rectangle everything plays inside, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(Vec2::ZERO, Vec2::new(self.width, self.height))
    }
}

/// A playfield edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Which edges bounce the ball; the rest are exits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Walls {
    pub fn for_layout(layout: PaddleLayout) -> Self {
        match layout {
            PaddleLayout::Versus => Self {
                top: true,
                bottom: true,
                left: false,
                right: false,
            },
            PaddleLayout::Solo => Self {
                top: true,
                bottom: false,
                left: true,
                right: true,
            },
        }
    }
}

/// Owning side of a paddle, also used to credit points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaddleSide {
    Left,
    Right,
    /// The lone paddle of a solo layout
    Bottom,
}

impl PaddleSide {
    /// Side that scores when the ball leaves past this one
    pub fn opponent(&self) -> Option<PaddleSide> {
        match self {
            PaddleSide::Left => Some(PaddleSide::Right),
            PaddleSide::Right => Some(PaddleSide::Left),
            PaddleSide::Bottom => None,
        }
    }
}

/// Axis a paddle slides along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Discrete control direction for one paddle this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlIntent {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl ControlIntent {
    /// Map raw input names to an intent; anything unknown is `None`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "up" | "w" => ControlIntent::Up,
            "down" | "s" => ControlIntent::Down,
            "left" | "a" => ControlIntent::Left,
            "right" | "d" => ControlIntent::Right,
            "none" | "" => ControlIntent::None,
            other => {
                log::debug!("Ignoring unknown control intent {:?}", other);
                ControlIntent::None
            }
        }
    }
}

/// A player paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub id: u32,
    pub side: PaddleSide,
    pub center: Vec2,
    pub half_extents: Vec2,
    /// Set from the control intent each tick
    pub velocity: Vec2,
    pub speed: f32,
    pub color: Color,
}

impl Paddle {
    pub fn new(id: u32, side: PaddleSide, center: Vec2, size: Vec2, speed: f32, color: Color) -> Self {
        Self {
            id,
            side,
            center,
            half_extents: size / 2.0,
            velocity: Vec2::ZERO,
            speed,
            color,
        }
    }

    pub fn axis(&self) -> Axis {
        match self.side {
            PaddleSide::Left | PaddleSide::Right => Axis::Vertical,
            PaddleSide::Bottom => Axis::Horizontal,
        }
    }

    /// Unit vector from the paddle's face into the playfield
    pub fn outward(&self) -> Vec2 {
        match self.side {
            PaddleSide::Left => Vec2::X,
            PaddleSide::Right => Vec2::NEG_X,
            PaddleSide::Bottom => Vec2::NEG_Y,
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.center, self.half_extents)
    }

    /// Intents orthogonal to the paddle's axis stop it
    pub fn set_control_intent(&mut self, intent: ControlIntent) {
        let dir = match (self.axis(), intent) {
            (Axis::Vertical, ControlIntent::Up) => Vec2::NEG_Y,
            (Axis::Vertical, ControlIntent::Down) => Vec2::Y,
            (Axis::Horizontal, ControlIntent::Left) => Vec2::NEG_X,
            (Axis::Horizontal, ControlIntent::Right) => Vec2::X,
            _ => Vec2::ZERO,
        };
        self.velocity = dir * self.speed;
    }
}

impl Tickable for Paddle {
    type Outcome = ();

    /// Move, then hard-clamp inside the field on the paddle's axis.
    /// Velocity is kept so a reversed intent takes effect on the next tick.
    fn tick(&mut self, dt: f32, field: &Playfield) {
        self.center += self.velocity * dt;
        match self.axis() {
            Axis::Vertical => {
                let half = self.half_extents.y;
                self.center.y = self.center.y.min(field.height - half).max(half);
            }
            Axis::Horizontal => {
                let half = self.half_extents.x;
                self.center.x = self.center.x.min(field.width - half).max(half);
            }
        }
    }
}

impl Bounded for Paddle {
    fn bounds(&self) -> BoundingVolume {
        BoundingVolume::Rect(self.rect())
    }

    fn sprite(&self) -> SpriteView {
        SpriteView {
            kind: ActorKind::Paddle,
            id: self.id,
            volume: self.bounds(),
            color: self.color,
            side: Some(self.side),
        }
    }
}

/// What happened to the ball during its own step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallStep {
    /// Wall the ball bounced off, if any
    pub bounced: Option<Edge>,
    /// Exit edge the ball is fully past, if any
    pub exit: Option<Edge>,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub center: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Paddle that last redirected the ball
    pub last_toucher: Option<PaddleSide>,
    pub walls: Walls,
    pub color: Color,
}

impl Ball {
    pub fn new(id: u32, radius: f32, walls: Walls) -> Self {
        Self {
            id,
            center: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius,
            last_toucher: None,
            walls,
            color: Color::default(),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.radius
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Paddle redirect: always rebound away from the paddle, whatever the
    /// incoming direction
    pub fn on_paddle_hit(&mut self, side: PaddleSide) {
        match side {
            PaddleSide::Left => self.velocity.x = self.velocity.x.abs(),
            PaddleSide::Right => self.velocity.x = -self.velocity.x.abs(),
            PaddleSide::Bottom => self.velocity.y = -self.velocity.y.abs(),
        }
        self.last_toucher = Some(side);
    }

    /// Target bounce: flip vertical velocity regardless of the face struck
    pub fn on_target_hit(&mut self) {
        self.velocity.y = -self.velocity.y;
    }

    /// Re-center on a fresh random diagonal and forget who touched it
    pub fn reset(&mut self, center: Vec2, speed: f32, directions: &mut impl DirectionSource) {
        self.center = center;
        let vx = directions.random_sign() * speed;
        let vy = directions.random_sign() * speed;
        self.velocity = Vec2::new(vx, vy);
        self.last_toucher = None;
    }

    /// Rest on the paddle's face, motionless, until launched
    pub fn park_on(&mut self, paddle: &Paddle) {
        let outward = paddle.outward();
        let reach = (paddle.half_extents * outward).length() + self.radius;
        self.center = paddle.center + outward * reach;
        self.velocity = Vec2::ZERO;
    }

    /// Leave the paddle on a diagonal with a random lateral sign
    pub fn launch_from(
        &mut self,
        paddle: &Paddle,
        speed: f32,
        directions: &mut impl DirectionSource,
    ) {
        let outward = paddle.outward();
        let lateral = outward.perp();
        self.velocity = (outward + lateral * directions.random_sign()) * speed;
        self.last_toucher = Some(paddle.side);
    }
}

impl Tickable for Ball {
    type Outcome = BallStep;

    /// Integrate, bounce off enabled walls, report exits.
    ///
    /// A bounce flips the velocity component only while the ball moves into
    /// the wall and always clamps the ball back to the wall, so it can never
    /// straddle a boundary on the next tick.
    fn tick(&mut self, dt: f32, field: &Playfield) -> BallStep {
        self.center += self.velocity * dt;
        let mut step = BallStep::default();

        if self.walls.top && self.top() <= 0.0 {
            if self.velocity.y < 0.0 {
                self.velocity.y = -self.velocity.y;
                step.bounced = Some(Edge::Top);
            }
            self.center.y = self.radius;
        }
        if self.walls.bottom && self.bottom() >= field.height {
            if self.velocity.y > 0.0 {
                self.velocity.y = -self.velocity.y;
                step.bounced = Some(Edge::Bottom);
            }
            self.center.y = field.height - self.radius;
        }
        if self.walls.left && self.left() <= 0.0 {
            if self.velocity.x < 0.0 {
                self.velocity.x = -self.velocity.x;
                step.bounced = Some(Edge::Left);
            }
            self.center.x = self.radius;
        }
        if self.walls.right && self.right() >= field.width {
            if self.velocity.x > 0.0 {
                self.velocity.x = -self.velocity.x;
                step.bounced = Some(Edge::Right);
            }
            self.center.x = field.width - self.radius;
        }

        step.exit = if !self.walls.left && self.right() < 0.0 {
            Some(Edge::Left)
        } else if !self.walls.right && self.left() > field.width {
            Some(Edge::Right)
        } else if !self.walls.bottom && self.top() > field.height {
            Some(Edge::Bottom)
        } else if !self.walls.top && self.bottom() < 0.0 {
            Some(Edge::Top)
        } else {
            None
        };

        step
    }
}

impl Bounded for Ball {
    fn bounds(&self) -> BoundingVolume {
        BoundingVolume::circle(self.center, self.radius)
    }

    fn sprite(&self) -> SpriteView {
        SpriteView {
            kind: ActorKind::Ball,
            id: self.id,
            volume: self.bounds(),
            color: self.color,
            side: self.last_toucher,
        }
    }
}

/// A destructible grid cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub row: u32,
    pub col: u32,
    pub rect: Aabb,
    pub color: Color,
    pub alive: bool,
}

impl Bounded for Target {
    fn bounds(&self) -> BoundingVolume {
        BoundingVolume::Rect(self.rect)
    }

    fn sprite(&self) -> SpriteView {
        SpriteView {
            kind: ActorKind::Target,
            id: self.id,
            volume: self.bounds(),
            color: self.color,
            side: None,
        }
    }
}
