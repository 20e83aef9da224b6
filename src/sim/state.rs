//! Game state and core simulation types
//!
//! `Simulation` owns every piece of mutable state for one session. There
//! are no globals; the frame pump holds a `Simulation` and passes it to
//! [`tick`](super::tick::tick).

use serde::{Deserialize, Serialize};

use super::actors::{Ball, Bounded, Edge, Paddle, PaddleSide, Playfield, Walls};
use super::formation::Formation;
use super::rng::{DirectionSource, SeededDirections, layout_rng};
use super::snapshot::Snapshot;
use crate::Color;
use crate::consts::*;
use crate::error::ConfigurationError;
use crate::settings::{GameConfig, PaddleLayout};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Waiting for the begin signal; nothing moves
    Start,
    /// Ball resting on the paddle, waiting for launch
    Serve,
    /// Active gameplay
    Playing,
    /// Every target destroyed
    RoundOver,
    /// Out of lives
    GameOver,
}

impl RoundState {
    /// Terminal states only leave through a restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundState::RoundOver | RoundState::GameOver)
    }
}

/// Per-side score counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub left: u64,
    pub right: u64,
    pub bottom: u64,
}

impl Scores {
    pub fn get(&self, side: PaddleSide) -> u64 {
        match side {
            PaddleSide::Left => self.left,
            PaddleSide::Right => self.right,
            PaddleSide::Bottom => self.bottom,
        }
    }

    pub fn credit(&mut self, side: PaddleSide, points: u64) {
        let score = match side {
            PaddleSide::Left => &mut self.left,
            PaddleSide::Right => &mut self.right,
            PaddleSide::Bottom => &mut self.bottom,
        };
        *score = score.saturating_add(points);
    }

    pub fn total(&self) -> u64 {
        self.left
            .saturating_add(self.right)
            .saturating_add(self.bottom)
    }
}

/// Something that happened during a tick, for audio and effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit { side: PaddleSide },
    WallBounce { edge: Edge },
    /// `credited` is `None` when nobody had touched the ball
    TargetsDestroyed { count: u32, credited: Option<PaddleSide> },
    FormationReversed,
    BallExit { edge: Edge },
    Goal { side: PaddleSide },
    /// Formation reached the paddle row
    Invasion,
    LifeLost { remaining: u32 },
    Launched,
    StateChanged { from: RoundState, to: RoundState },
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct Simulation<D: DirectionSource = SeededDirections> {
    config: GameConfig,
    directions: D,
    pub field: Playfield,
    /// Left then right, or the single bottom paddle
    pub paddles: Vec<Paddle>,
    pub ball: Ball,
    pub formation: Formation,
    pub scores: Scores,
    /// `None` when the game is played without lives
    pub lives: Option<u32>,
    pub state: RoundState,
    /// Ticks spent in Serve or Playing
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl Simulation<SeededDirections> {
    /// Build a session whose serve directions come from `config.seed`
    pub fn new(config: GameConfig) -> Result<Self, ConfigurationError> {
        let directions = SeededDirections::new(config.seed);
        Self::with_directions(config, directions)
    }
}

impl<D: DirectionSource> Simulation<D> {
    /// Build a session with an injected direction source
    pub fn with_directions(config: GameConfig, directions: D) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let field = Playfield::new(config.width, config.height);
        let mut sim = Self {
            ball: Ball::new(0, config.ball.radius, Walls::for_layout(config.layout)),
            lives: config.lives,
            config,
            directions,
            field,
            paddles: Vec::new(),
            formation: Formation::new(Vec::new(), None),
            scores: Scores::default(),
            state: RoundState::Start,
            time_ticks: 0,
            events: Vec::new(),
        };
        sim.rebuild();

        log::info!(
            "New {} game: {} targets, lives {:?}, seed {}",
            sim.config.layout.as_str(),
            sim.formation.live_count(),
            sim.lives,
            sim.config.seed
        );
        Ok(sim)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Throw away the session and start over from the configuration.
    /// The injected direction source carries on with its own sequence.
    pub fn restart(&mut self) {
        log::info!("Restarting after {:?} (scores {:?})", self.state, self.scores);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let config = &self.config;
        let mut next_id = 1;

        self.paddles = match config.layout {
            PaddleLayout::Versus => {
                let x = config.paddle.margin + config.paddle.width / 2.0;
                let y = config.height / 2.0;
                vec![
                    self.spawn_paddle(next_id, PaddleSide::Left, x, y, BLUE),
                    self.spawn_paddle(next_id + 1, PaddleSide::Right, config.width - x, y, GREEN),
                ]
            }
            PaddleLayout::Solo => {
                let x = config.width / 2.0;
                let y = config.height - config.paddle.margin - config.paddle.height / 2.0;
                vec![self.spawn_paddle(next_id, PaddleSide::Bottom, x, y, SOLO_BLUE)]
            }
        };
        next_id += self.paddles.len() as u32;

        let config = &self.config;
        self.ball = Ball::new(next_id, config.ball.radius, Walls::for_layout(config.layout));
        self.ball.color = match config.layout {
            PaddleLayout::Versus => WHITE,
            PaddleLayout::Solo => YELLOW,
        };
        next_id += 1;

        self.formation = Formation::from_grid(
            &config.grid,
            &self.field,
            config.advance,
            next_id,
            &mut layout_rng(config.seed),
        );

        self.scores = Scores::default();
        self.lives = config.lives;
        self.state = RoundState::Start;
        self.time_ticks = 0;
        self.events.clear();

        self.reset_ball();
        if self.config.serve {
            self.park_ball();
        }
    }

    fn spawn_paddle(&self, id: u32, side: PaddleSide, x: f32, y: f32, color: Color) -> Paddle {
        let paddle = &self.config.paddle;
        Paddle::new(
            id,
            side,
            glam::Vec2::new(x, y),
            glam::Vec2::new(paddle.width, paddle.height),
            paddle.speed,
            color,
        )
    }

    /// Row the formation must not reach
    pub fn invasion_line(&self) -> f32 {
        self.paddles
            .iter()
            .find(|p| p.side == PaddleSide::Bottom)
            .map(|p| p.rect().top())
            .unwrap_or(self.field.height)
    }

    /// Back to the center on a fresh diagonal, toucher cleared
    pub fn reset_ball(&mut self) {
        let center = self.field.center();
        let speed = self.config.ball.speed;
        self.ball.reset(center, speed, &mut self.directions);
    }

    /// Hold the ball on the serving paddle
    pub fn park_ball(&mut self) {
        if let Some(index) = self.serving_index() {
            self.ball.park_on(&self.paddles[index]);
        }
    }

    /// Send the ball off the serving paddle
    pub fn launch_ball(&mut self) {
        if let Some(index) = self.serving_index() {
            let speed = self.config.ball.speed;
            self.ball
                .launch_from(&self.paddles[index], speed, &mut self.directions);
            self.events.push(GameEvent::Launched);
        }
    }

    /// Paddle the ball rests on while serving: the bottom paddle, else the first
    fn serving_index(&self) -> Option<usize> {
        self.paddles
            .iter()
            .position(|p| p.side == PaddleSide::Bottom)
            .or_else(|| (!self.paddles.is_empty()).then_some(0))
    }

    /// Take one life if lives are in play
    pub fn lose_life(&mut self) {
        if let Some(lives) = self.lives.as_mut() {
            *lives = lives.saturating_sub(1);
            let remaining = *lives;
            log::info!("Life lost, {} remaining", remaining);
            self.events.push(GameEvent::LifeLost { remaining });
        }
    }

    pub fn set_state(&mut self, to: RoundState) {
        let from = self.state;
        if from == to {
            return;
        }
        log::info!("Round state {:?} -> {:?}", from, to);
        self.state = to;
        self.events.push(GameEvent::StateChanged { from, to });
    }

    /// Render view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            state: self.state,
            paddles: self.paddles.iter().map(|p| p.sprite()).collect(),
            ball: self.ball.sprite(),
            targets: self.formation.live().map(|t| t.sprite()).collect(),
            scores: self.scores,
            lives: self.lives,
            events: self.events.clone(),
        }
    }
}
