//! Brick Pong headless entry point
//!
//! Runs a game without a window: paddles track the ball, the loop ticks at
//! the fixed timestep, and a summary is logged when the game ends.
//!
//! Usage: `brick-pong [break-pong|invaders|<config.json>] [ticks]`

use brick_pong::consts::SIM_DT;
use brick_pong::sim::{ControlIntent, PaddleSide, RoundState, Simulation, TickInput, tick};
use brick_pong::{ConfigurationError, GameConfig};

/// One minute of play at 60 Hz
const DEFAULT_TICKS: u64 = 3600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Pong (headless) starting...");

    let mut args = std::env::args().skip(1);
    let game = args.next().unwrap_or_else(|| "break-pong".to_string());
    let ticks = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let config = match load_config(&game) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load {}: {}", game, e);
            std::process::exit(1);
        }
    };

    match Simulation::new(config) {
        Ok(mut sim) => run(&mut sim, ticks),
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // A wasm host drives `tick` from its own frame callback
}

fn load_config(game: &str) -> Result<GameConfig, ConfigurationError> {
    match game {
        "break-pong" => Ok(GameConfig::break_pong()),
        "invaders" | "invader-breakout" => Ok(GameConfig::invader_breakout()),
        path => {
            let json =
                std::fs::read_to_string(path).map_err(|source| ConfigurationError::Unreadable {
                    path: path.to_string(),
                    source,
                })?;
            GameConfig::from_json(&json)
        }
    }
}

/// Frame pump: one tick per frame until the game ends or `ticks` run out
fn run(sim: &mut Simulation, ticks: u64) {
    for frame in 0..ticks {
        let input = autopilot(sim);
        let snapshot = tick(sim, &input, SIM_DT);

        for event in &snapshot.events {
            log::trace!("frame {}: {:?}", frame, event);
        }
        if snapshot.state.is_terminal() {
            break;
        }
    }

    log::info!(
        "Finished in {:?} after {} ticks: scores {:?}, lives {:?}, {} targets left",
        sim.state,
        sim.time_ticks,
        sim.scores,
        sim.lives,
        sim.formation.live_count()
    );
}

/// Begin, launch, and steer every paddle toward the ball
fn autopilot(sim: &Simulation) -> TickInput {
    let mut input = TickInput {
        begin: sim.state == RoundState::Start,
        launch: sim.state == RoundState::Serve,
        ..Default::default()
    };

    let ball = sim.ball.center;
    for (slot, paddle) in sim.paddles.iter().enumerate().take(input.intents.len()) {
        let (offset, less, more) = match paddle.side {
            PaddleSide::Left | PaddleSide::Right => {
                (ball.y - paddle.center.y, ControlIntent::Up, ControlIntent::Down)
            }
            PaddleSide::Bottom => (
                ball.x - paddle.center.x,
                ControlIntent::Left,
                ControlIntent::Right,
            ),
        };
        // Dead zone keeps the paddle from jittering around the ball
        let dead_zone = paddle.speed * SIM_DT;
        input.intents[slot] = if offset < -dead_zone {
            less
        } else if offset > dead_zone {
            more
        } else {
            ControlIntent::None
        };
    }

    input
}
