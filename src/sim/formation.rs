//! Target grid bookkeeping
//!
//! The formation owns every target. Destroyed targets stay in the list,
//! marked dead, so ids and grid positions remain stable for the renderer;
//! every query and every movement skips them.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actors::{Bounded, Playfield, Target, Tickable};
use super::collision::{Aabb, BoundingVolume, overlaps};
use crate::Color;
use crate::settings::{AdvanceConfig, GridConfig, GridOrigin};

/// Grid of targets, optionally marching in lockstep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    targets: Vec<Target>,
    /// +1 moving right, -1 moving left
    direction: f32,
    motion: Option<AdvanceConfig>,
    /// Total distance dropped since spawn or the last retreat
    dropped: f32,
}

impl Formation {
    pub fn new(targets: Vec<Target>, motion: Option<AdvanceConfig>) -> Self {
        Self {
            targets,
            direction: 1.0,
            motion,
            dropped: 0.0,
        }
    }

    /// Lay out `grid` row-major inside `field`, numbering targets from `first_id`
    pub fn from_grid(
        grid: &GridConfig,
        field: &Playfield,
        motion: Option<AdvanceConfig>,
        first_id: u32,
        rng: &mut impl Rng,
    ) -> Self {
        let origin = match grid.origin {
            GridOrigin::Centered => Vec2::new(
                (field.width - grid.extent_x()) / 2.0,
                (field.height - grid.extent_y()) / 2.0,
            ),
            GridOrigin::TopLeft { x, y } => Vec2::new(x, y),
        };
        let size = Vec2::new(grid.target_width, grid.target_height);
        let pitch = size + Vec2::splat(grid.padding);

        let mut targets = Vec::with_capacity(grid.rows as usize * grid.cols as usize);
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let top_left = origin + pitch * Vec2::new(col as f32, row as f32);
                let color = match grid.palette.len() {
                    0 => Color::default(),
                    1 => grid.palette[0],
                    n => grid.palette[rng.random_range(0..n)],
                };
                targets.push(Target {
                    id: first_id + targets.len() as u32,
                    row,
                    col,
                    rect: Aabb::from_top_left(top_left, size),
                    color,
                    alive: true,
                });
            }
        }

        Self::new(targets, motion)
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn is_advancing(&self) -> bool {
        self.motion.is_some()
    }

    /// Every target, dead ones included
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn live(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.alive)
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    /// Win condition: nothing left to destroy
    pub fn is_empty(&self) -> bool {
        self.live().next().is_none()
    }

    /// Destroy a target for good. Returns false if it was already dead or unknown.
    pub fn remove(&mut self, id: u32) -> bool {
        match self.targets.iter_mut().find(|t| t.id == id && t.alive) {
            Some(target) => {
                target.alive = false;
                true
            }
            None => false,
        }
    }

    /// Ids of live targets overlapping `volume`, in grid order
    pub fn strike(&self, volume: &BoundingVolume) -> Vec<u32> {
        self.live()
            .filter(|t| overlaps(&t.bounds(), volume))
            .map(|t| t.id)
            .collect()
    }

    /// Whether any live target's lower edge has reached `limit_y`
    pub fn any_touches_bottom(&self, limit_y: f32) -> bool {
        self.live().any(|t| t.rect.bottom() >= limit_y)
    }

    /// Lift the live targets back to their spawn height
    pub fn retreat(&mut self) {
        if self.dropped > 0.0 {
            let dropped = self.dropped;
            self.translate_live(Vec2::new(0.0, -dropped));
            self.dropped = 0.0;
        }
    }

    fn translate_live(&mut self, delta: Vec2) {
        for target in self.targets.iter_mut().filter(|t| t.alive) {
            target.rect.translate(delta);
        }
    }

    /// Leftmost and rightmost live edges
    fn live_span(&self) -> Option<(f32, f32)> {
        self.live().fold(None, |span, t| match span {
            None => Some((t.rect.left(), t.rect.right())),
            Some((left, right)) => Some((left.min(t.rect.left()), right.max(t.rect.right()))),
        })
    }
}

impl Tickable for Formation {
    /// Whether the formation reversed this tick
    type Outcome = bool;

    /// March sideways; on touching the edge ahead, reverse and drop one row.
    ///
    /// Only the edge in the direction of travel counts, so a reversal can
    /// never fire twice for the same edge contact.
    fn tick(&mut self, dt: f32, field: &Playfield) -> bool {
        let Some(motion) = self.motion else {
            return false;
        };

        self.translate_live(Vec2::new(self.direction * motion.speed * dt, 0.0));

        let Some((left, right)) = self.live_span() else {
            return false;
        };
        let touching = if self.direction > 0.0 {
            right >= field.width
        } else {
            left <= 0.0
        };

        if touching {
            self.direction = -self.direction;
            self.translate_live(Vec2::new(0.0, motion.row_drop));
            self.dropped += motion.row_drop;
            log::debug!(
                "Formation reversed to {}, dropped to {}",
                self.direction,
                self.dropped
            );
        }
        touching
    }
}
