//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. The
//! Playing pipeline runs in a fixed order; changing the order changes
//! outcomes (for example, a paddle hit resolved before target hits decides
//! who gets credit for bricks struck on the same tick).

use super::actors::{Bounded, ControlIntent, Edge, PaddleSide, Tickable};
use super::collision::overlaps;
use super::rng::DirectionSource;
use super::snapshot::Snapshot;
use super::state::{GameEvent, RoundState, Simulation};
use crate::settings::PaddleLayout;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Slot 0 drives the left (or only) paddle, slot 1 the right paddle
    pub intents: [ControlIntent; 2],
    /// Leave the Start screen
    pub begin: bool,
    /// Release the ball from the paddle while serving
    pub launch: bool,
    /// Rebuild the session after GameOver or RoundOver
    pub restart: bool,
}

impl TickInput {
    /// Input with the same intent for every paddle slot
    pub fn steer(intent: ControlIntent) -> Self {
        Self {
            intents: [intent; 2],
            ..Default::default()
        }
    }
}

/// Advance the simulation by one fixed timestep and return what to draw
pub fn tick<D: DirectionSource>(sim: &mut Simulation<D>, input: &TickInput, dt: f32) -> Snapshot {
    sim.events.clear();

    match sim.state {
        RoundState::Start => {
            if input.begin {
                let next = if sim.config().serve {
                    RoundState::Serve
                } else {
                    RoundState::Playing
                };
                sim.set_state(next);
            }
        }
        RoundState::Serve => serve(sim, input, dt),
        RoundState::Playing => play(sim, input, dt),
        RoundState::RoundOver | RoundState::GameOver => {
            // Terminal: nothing moves until the collaborator asks for a restart
            if input.restart {
                sim.restart();
            }
        }
    }

    sim.snapshot()
}

fn apply_intents<D: DirectionSource>(sim: &mut Simulation<D>, input: &TickInput, dt: f32) {
    let field = sim.field;
    for (paddle, intent) in sim.paddles.iter_mut().zip(input.intents) {
        paddle.set_control_intent(intent);
        paddle.tick(dt, &field);
    }
}

/// Paddles and formation move; the ball rides on the serving paddle until
/// launched. Collisions and invasion wait for Playing.
fn serve<D: DirectionSource>(sim: &mut Simulation<D>, input: &TickInput, dt: f32) {
    sim.time_ticks += 1;
    let field = sim.field;

    apply_intents(sim, input, dt);
    sim.park_ball();
    if sim.formation.tick(dt, &field) {
        sim.events.push(GameEvent::FormationReversed);
    }

    if input.launch {
        sim.launch_ball();
        sim.set_state(RoundState::Playing);
    }
}

fn play<D: DirectionSource>(sim: &mut Simulation<D>, input: &TickInput, dt: f32) {
    sim.time_ticks += 1;
    let field = sim.field;

    // 1-2. Control intents, then paddle motion
    apply_intents(sim, input, dt);

    // 3. Ball motion; an exit is held until scoring below
    let step = sim.ball.tick(dt, &field);
    if let Some(edge) = step.bounced {
        sim.events.push(GameEvent::WallBounce { edge });
    }

    // 4. Formation march
    if sim.formation.tick(dt, &field) {
        sim.events.push(GameEvent::FormationReversed);
    }
    let invaded =
        sim.formation.is_advancing() && sim.formation.any_touches_bottom(sim.invasion_line());

    // 5. Ball vs paddles: first overlap wins
    let ball_bounds = sim.ball.bounds();
    let hit = sim
        .paddles
        .iter()
        .find(|p| overlaps(&p.bounds(), &ball_bounds))
        .map(|p| p.side);
    if let Some(side) = hit {
        sim.ball.on_paddle_hit(side);
        sim.events.push(GameEvent::PaddleHit { side });
    }

    // 6. Ball vs targets: one bounce however many are struck
    let ball_bounds = sim.ball.bounds();
    let struck = sim.formation.strike(&ball_bounds);
    if !struck.is_empty() {
        for id in &struck {
            sim.formation.remove(*id);
        }
        sim.ball.on_target_hit();

        // Nobody touched it yet: nobody scores
        let credited = sim.ball.last_toucher;
        if let Some(side) = credited {
            let points = u64::from(sim.config().points_per_target) * struck.len() as u64;
            sim.scores.credit(side, points);
        }
        log::debug!("{} targets destroyed, credited to {:?}", struck.len(), credited);
        sim.events.push(GameEvent::TargetsDestroyed {
            count: struck.len() as u32,
            credited,
        });
    }

    // 7. Exits and invasion
    let mut ball_lost = false;
    if let Some(edge) = step.exit {
        sim.events.push(GameEvent::BallExit { edge });
        score_goal(sim, edge);
        sim.lose_life();
        ball_lost = true;
    }
    if invaded {
        log::info!("Formation reached the paddle row");
        sim.events.push(GameEvent::Invasion);
        sim.lose_life();
        sim.formation.retreat();
        ball_lost = true;
    }
    if ball_lost {
        sim.reset_ball();
    }

    // 8. Terminal conditions
    if sim.lives == Some(0) {
        sim.set_state(RoundState::GameOver);
    } else if sim.formation.is_empty() {
        sim.set_state(RoundState::RoundOver);
    } else if ball_lost && sim.config().serve {
        sim.park_ball();
        sim.set_state(RoundState::Serve);
    }
}

/// Credit the side opposite the edge the ball left through
fn score_goal<D: DirectionSource>(sim: &mut Simulation<D>, edge: Edge) {
    let points = u64::from(sim.config().points_per_goal);
    if points == 0 || sim.config().layout != PaddleLayout::Versus {
        return;
    }
    let defender = match edge {
        Edge::Left => PaddleSide::Left,
        Edge::Right => PaddleSide::Right,
        Edge::Top | Edge::Bottom => return,
    };
    if let Some(side) = defender.opponent() {
        sim.scores.credit(side, points);
        sim.events.push(GameEvent::Goal { side });
    }
}
