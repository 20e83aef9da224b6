//! Game configuration
//!
//! One serde struct covers both shipped games; the presets differ only in
//! values. Every simulation is built from a validated `GameConfig`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigurationError;
use crate::Color;

/// Which paddles are in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaddleLayout {
    /// Left and right paddles moving vertically; the ball exits sideways
    #[default]
    Versus,
    /// One bottom paddle moving horizontally; the ball exits through the bottom
    Solo,
}

impl PaddleLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleLayout::Versus => "Versus",
            PaddleLayout::Solo => "Solo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "versus" | "vs" | "two" => Some(PaddleLayout::Versus),
            "solo" | "single" | "one" => Some(PaddleLayout::Solo),
            _ => None,
        }
    }
}

/// Paddle rectangle size, speed, and distance from its home edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Pixels per second along the paddle's axis of motion
    pub speed: f32,
    /// Gap between the playfield edge and the paddle's outer face
    pub margin: f32,
}

/// Ball size and speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallConfig {
    pub radius: f32,
    /// Per-axis speed in pixels per second; the ball always travels on a diagonal
    pub speed: f32,
}

/// Where the top-left target of the grid sits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum GridOrigin {
    /// Grid centered in the playfield
    #[default]
    Centered,
    /// Top-left corner of the first target
    TopLeft { x: f32, y: f32 },
}

/// Target grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    pub target_width: f32,
    pub target_height: f32,
    /// Gap between neighboring targets
    pub padding: f32,
    pub origin: GridOrigin,
    /// Colors drawn at random per target (white when empty)
    pub palette: Vec<Color>,
}

impl GridConfig {
    /// Total width of the grid including inner padding
    pub fn extent_x(&self) -> f32 {
        self.cols as f32 * (self.target_width + self.padding) - self.padding
    }

    /// Total height of the grid including inner padding
    pub fn extent_y(&self) -> f32 {
        self.rows as f32 * (self.target_height + self.padding) - self.padding
    }
}

/// Lockstep sideways march of the formation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvanceConfig {
    /// Pixels per second
    pub speed: f32,
    /// Pixels dropped each time the formation reverses
    pub row_drop: f32,
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for serve directions and target colors
    pub seed: u64,
    pub width: f32,
    pub height: f32,
    pub layout: PaddleLayout,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub grid: GridConfig,
    /// Advancing formation; `None` keeps the grid still
    pub advance: Option<AdvanceConfig>,
    /// Starting lives; `None` plays without lives
    pub lives: Option<u32>,
    /// Hold the ball on the paddle until launched
    pub serve: bool,
    pub points_per_target: u32,
    /// Points to the opposite side when the ball leaves a versus field
    pub points_per_goal: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::break_pong()
    }
}

impl GameConfig {
    /// Two paddles, static centered bricks, score by last touch
    pub fn break_pong() -> Self {
        Self {
            seed: 0,
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            layout: PaddleLayout::Versus,
            paddle: PaddleConfig {
                width: 20.0,
                height: 100.0,
                speed: 300.0,
                margin: 10.0,
            },
            ball: BallConfig {
                radius: 8.0,
                speed: 300.0,
            },
            grid: GridConfig {
                rows: 5,
                cols: 6,
                target_width: 80.0,
                target_height: 30.0,
                padding: 10.0,
                origin: GridOrigin::Centered,
                palette: vec![RED, GREEN, BLUE, YELLOW, PURPLE],
            },
            advance: None,
            lives: None,
            serve: false,
            points_per_target: 1,
            points_per_goal: 0,
        }
    }

    /// One paddle, marching formation, three lives
    pub fn invader_breakout() -> Self {
        Self {
            seed: 0,
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            layout: PaddleLayout::Solo,
            paddle: PaddleConfig {
                width: 100.0,
                height: 20.0,
                speed: 300.0,
                margin: 30.0,
            },
            ball: BallConfig {
                radius: 10.0,
                speed: 240.0,
            },
            grid: GridConfig {
                rows: 5,
                cols: 10,
                target_width: 60.0,
                target_height: 30.0,
                padding: 10.0,
                origin: GridOrigin::TopLeft { x: 50.0, y: 50.0 },
                palette: vec![INVADER_RED],
            },
            advance: Some(AdvanceConfig {
                speed: 60.0,
                row_drop: 10.0,
            }),
            lives: Some(3),
            serve: true,
            points_per_target: 10,
            points_per_goal: 0,
        }
    }

    /// Same config with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse and validate a JSON config; missing fields take Break-Pong values
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations that cannot build a whole simulation
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("paddle.width", self.paddle.width)?;
        positive("paddle.height", self.paddle.height)?;
        positive("paddle.speed", self.paddle.speed)?;
        non_negative("paddle.margin", self.paddle.margin)?;
        positive("ball.radius", self.ball.radius)?;
        positive("ball.speed", self.ball.speed)?;
        positive("grid.target_width", self.grid.target_width)?;
        positive("grid.target_height", self.grid.target_height)?;
        non_negative("grid.padding", self.grid.padding)?;
        if let Some(advance) = &self.advance {
            positive("advance.speed", advance.speed)?;
            positive("advance.row_drop", advance.row_drop)?;
        }

        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(ConfigurationError::EmptyGrid {
                rows: self.grid.rows,
                cols: self.grid.cols,
            });
        }
        let cells = self.grid.rows.checked_mul(self.grid.cols);
        if cells.is_none_or(|n| n > MAX_TARGETS) {
            return Err(ConfigurationError::TooManyTargets {
                rows: self.grid.rows,
                cols: self.grid.cols,
                max: MAX_TARGETS,
            });
        }
        if self.lives == Some(0) {
            return Err(ConfigurationError::NoLives);
        }

        let paddle_fits = match self.layout {
            PaddleLayout::Versus => {
                self.paddle.height <= self.height
                    && 2.0 * (self.paddle.margin + self.paddle.width) < self.width
            }
            PaddleLayout::Solo => {
                self.paddle.width <= self.width
                    && self.paddle.margin + self.paddle.height < self.height
            }
        };
        if !paddle_fits {
            return Err(self.does_not_fit("paddle"));
        }

        if 2.0 * self.ball.radius >= self.width.min(self.height) {
            return Err(self.does_not_fit("ball"));
        }

        let (origin_x, origin_y) = match self.grid.origin {
            GridOrigin::Centered => (0.0, 0.0),
            GridOrigin::TopLeft { x, y } => (x, y),
        };
        if origin_x < 0.0
            || origin_y < 0.0
            || origin_x + self.grid.extent_x() > self.width
            || origin_y + self.grid.extent_y() > self.height
        {
            return Err(self.does_not_fit("target grid"));
        }

        Ok(())
    }

    fn does_not_fit(&self, what: &'static str) -> ConfigurationError {
        ConfigurationError::DoesNotFit {
            what,
            width: self.width,
            height: self.height,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(GameConfig::break_pong().validate().is_ok());
        assert!(GameConfig::invader_breakout().validate().is_ok());
    }

    #[test]
    fn test_break_pong_grid_is_centered() {
        let config = GameConfig::break_pong();
        // 6 columns of 80 with 10 between them
        assert_eq!(config.grid.extent_x(), 530.0);
        assert_eq!(config.grid.extent_y(), 190.0);
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let mut config = GameConfig::break_pong();
        config.paddle.speed = 0.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NonPositive {
                field: "paddle.speed",
                ..
            }
        ));

        let mut config = GameConfig::invader_breakout();
        config.ball.speed = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_sized_actors() {
        let mut config = GameConfig::break_pong();
        config.ball.radius = 0.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::break_pong();
        config.grid.target_height = -5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_grid_and_zero_lives() {
        let mut config = GameConfig::invader_breakout();
        config.grid.rows = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::EmptyGrid { rows: 0, cols: 10 })
        ));

        let mut config = GameConfig::invader_breakout();
        config.lives = Some(0);
        assert!(matches!(config.validate(), Err(ConfigurationError::NoLives)));
    }

    #[test]
    fn test_rejects_grid_outside_playfield() {
        let mut config = GameConfig::invader_breakout();
        config.grid.cols = 20;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::DoesNotFit {
                what: "target grid",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_grid_too_large_to_number() {
        // Tiny targets fit the playfield in pixels, but the cell count overflows u32
        let mut config = GameConfig::break_pong();
        config.grid.rows = 70_000;
        config.grid.cols = 70_000;
        config.grid.target_width = 1e-5;
        config.grid.target_height = 1e-5;
        config.grid.padding = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::TooManyTargets {
                rows: 70_000,
                cols: 70_000,
                ..
            })
        ));
        assert!(crate::sim::Simulation::new(config.clone()).is_err());

        // No overflow, still over the limit
        config.grid.rows = 200;
        config.grid.cols = 200;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::TooManyTargets { .. })
        ));

        config.grid.rows = 100;
        config.grid.cols = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_still_advance() {
        let mut config = GameConfig::invader_breakout();
        config.advance = Some(AdvanceConfig {
            speed: 60.0,
            row_drop: 0.0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "points_per_goal": 2 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.points_per_goal, 2);
        assert_eq!(config.layout, PaddleLayout::Versus);
        assert_eq!(config.grid.cols, 6);
    }

    #[test]
    fn test_from_json_round_trips_preset() {
        let preset = GameConfig::invader_breakout().with_seed(42);
        let json = preset.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), preset);
    }

    #[test]
    fn test_from_json_reports_parse_and_range_errors() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigurationError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "width": -1.0 }"#),
            Err(ConfigurationError::NonPositive { field: "width", .. })
        ));
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!(PaddleLayout::from_str("SOLO"), Some(PaddleLayout::Solo));
        assert_eq!(PaddleLayout::from_str("vs"), Some(PaddleLayout::Versus));
        assert_eq!(PaddleLayout::from_str("triple"), None);
        assert_eq!(PaddleLayout::Solo.as_str(), "Solo");
    }
}
