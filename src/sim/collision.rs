//! Collision detection for axis-aligned boxes and circles
//!
//! Every actor is bounded by either an axis-aligned rectangle or a circle.
//! Tests are pure and allocation-free.
//!
//! Touching is not colliding: two volumes whose edges meet with zero gap do
//! not overlap. A ball resting exactly against a paddle face therefore does
//! not re-trigger a hit on the following tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle stored as center plus half-extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Build from a top-left corner and a full size
    pub fn from_top_left(top_left: Vec2, size: Vec2) -> Self {
        let half_extents = size / 2.0;
        Self::new(top_left + half_extents, half_extents)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half_extents.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half_extents.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Point containment, edges included
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Closest point of the rectangle to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }
}

/// Shape used for every collision test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoundingVolume {
    Rect(Aabb),
    Circle { center: Vec2, radius: f32 },
}

impl BoundingVolume {
    pub fn rect(center: Vec2, half_extents: Vec2) -> Self {
        BoundingVolume::Rect(Aabb::new(center, half_extents))
    }

    pub fn circle(center: Vec2, radius: f32) -> Self {
        BoundingVolume::Circle { center, radius }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            BoundingVolume::Rect(aabb) => aabb.center,
            BoundingVolume::Circle { center, .. } => *center,
        }
    }

    /// Smallest axis-aligned box enclosing the volume
    pub fn aabb(&self) -> Aabb {
        match *self {
            BoundingVolume::Rect(aabb) => aabb,
            BoundingVolume::Circle { center, radius } => Aabb::new(center, Vec2::splat(radius)),
        }
    }
}

/// Check whether two volumes overlap with positive depth
pub fn overlaps(a: &BoundingVolume, b: &BoundingVolume) -> bool {
    match (a, b) {
        (BoundingVolume::Rect(a), BoundingVolume::Rect(b)) => rect_rect_overlap(a, b),
        (BoundingVolume::Rect(rect), BoundingVolume::Circle { center, radius })
        | (BoundingVolume::Circle { center, radius }, BoundingVolume::Rect(rect)) => {
            rect_circle_overlap(rect, *center, *radius)
        }
        (
            BoundingVolume::Circle {
                center: ca,
                radius: ra,
            },
            BoundingVolume::Circle {
                center: cb,
                radius: rb,
            },
        ) => {
            let reach = ra + rb;
            (*ca - *cb).length_squared() < reach * reach
        }
    }
}

/// Minimum translation that moves `a` out of `b`, or `None` when they do not overlap
pub fn overlap_depth(a: &BoundingVolume, b: &BoundingVolume) -> Option<Vec2> {
    match (a, b) {
        (BoundingVolume::Rect(a), BoundingVolume::Rect(b)) => rect_rect_depth(a, b),
        (BoundingVolume::Circle { center, radius }, BoundingVolume::Rect(rect)) => {
            circle_rect_depth(*center, *radius, rect)
        }
        (BoundingVolume::Rect(rect), BoundingVolume::Circle { center, radius }) => {
            circle_rect_depth(*center, *radius, rect).map(|push| -push)
        }
        (
            BoundingVolume::Circle {
                center: ca,
                radius: ra,
            },
            BoundingVolume::Circle {
                center: cb,
                radius: rb,
            },
        ) => {
            let delta = *ca - *cb;
            let dist = delta.length();
            let penetration = ra + rb - dist;
            if penetration <= 0.0 {
                return None;
            }
            let dir = if dist > 0.0 { delta / dist } else { Vec2::X };
            Some(dir * penetration)
        }
    }
}

#[inline]
fn rect_rect_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

#[inline]
fn rect_circle_overlap(rect: &Aabb, center: Vec2, radius: f32) -> bool {
    let closest = rect.closest_point(center);
    (center - closest).length_squared() < radius * radius
}

fn rect_rect_depth(a: &Aabb, b: &Aabb) -> Option<Vec2> {
    let delta = a.center - b.center;
    let depth = a.half_extents + b.half_extents - delta.abs();
    if depth.x <= 0.0 || depth.y <= 0.0 {
        return None;
    }
    // Push along the shallower axis
    if depth.x < depth.y {
        Some(Vec2::new(depth.x * delta.x.signum(), 0.0))
    } else {
        Some(Vec2::new(0.0, depth.y * delta.y.signum()))
    }
}

fn circle_rect_depth(center: Vec2, radius: f32, rect: &Aabb) -> Option<Vec2> {
    let closest = rect.closest_point(center);
    let delta = center - closest;
    let dist_sq = delta.length_squared();
    if dist_sq >= radius * radius {
        return None;
    }

    if dist_sq > 0.0 {
        let dist = dist_sq.sqrt();
        return Some(delta / dist * (radius - dist));
    }

    // Center inside the rectangle: leave through the nearest face
    let min = rect.min();
    let max = rect.max();
    let faces = [
        (center.x - min.x, Vec2::NEG_X),
        (max.x - center.x, Vec2::X),
        (center.y - min.y, Vec2::NEG_Y),
        (max.y - center.y, Vec2::Y),
    ];
    let (dist, dir) = faces
        .into_iter()
        .fold(faces[0], |best, face| if face.0 < best.0 { face } else { best });
    Some(dir * (dist + radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, hw: f32, hh: f32) -> BoundingVolume {
        BoundingVolume::rect(Vec2::new(x, y), Vec2::new(hw, hh))
    }

    #[test]
    fn test_rect_rect_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(&a, &rect(15.0, 5.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &rect(50.0, 0.0, 10.0, 10.0)));
        // Overlap on x only
        assert!(!overlaps(&a, &rect(5.0, 30.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_rects_do_not_collide() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        // Right edge of a at x=10, left edge of b at x=10
        assert!(!overlaps(&a, &rect(20.0, 0.0, 10.0, 10.0)));
        // Bottom edge of a at y=10, top edge of b at y=10
        assert!(!overlaps(&a, &rect(0.0, 20.0, 10.0, 10.0)));
        assert!(overlap_depth(&a, &rect(20.0, 0.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn test_rect_circle_overlap() {
        let paddle = rect(100.0, 100.0, 10.0, 50.0);
        assert!(overlaps(&paddle, &BoundingVolume::circle(Vec2::new(115.0, 100.0), 8.0)));
        assert!(overlaps(&BoundingVolume::circle(Vec2::new(115.0, 100.0), 8.0), &paddle));
        assert!(!overlaps(&paddle, &BoundingVolume::circle(Vec2::new(130.0, 100.0), 8.0)));
        // Center inside the rectangle
        assert!(overlaps(&paddle, &BoundingVolume::circle(Vec2::new(100.0, 100.0), 1.0)));
    }

    #[test]
    fn test_circle_touching_rect_does_not_collide() {
        let paddle = rect(100.0, 100.0, 10.0, 50.0);
        // Face at x=110, circle reaches exactly x=110
        let ball = BoundingVolume::circle(Vec2::new(118.0, 100.0), 8.0);
        assert!(!overlaps(&paddle, &ball));
        assert!(overlap_depth(&ball, &paddle).is_none());
    }

    #[test]
    fn test_circle_misses_rect_corner() {
        let target = rect(0.0, 0.0, 10.0, 10.0);
        // Inside the enclosing box of the circle but beyond the corner radius
        let ball = BoundingVolume::circle(Vec2::new(16.0, 16.0), 8.0);
        assert!(ball.aabb().left() < 10.0);
        assert!(!overlaps(&target, &ball));
    }

    #[test]
    fn test_circle_circle_overlap() {
        let a = BoundingVolume::circle(Vec2::ZERO, 5.0);
        assert!(overlaps(&a, &BoundingVolume::circle(Vec2::new(9.0, 0.0), 5.0)));
        assert!(!overlaps(&a, &BoundingVolume::circle(Vec2::new(10.0, 0.0), 5.0)));
        let push = overlap_depth(&a, &BoundingVolume::circle(Vec2::new(9.0, 0.0), 5.0)).unwrap();
        assert!((push - Vec2::new(-1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_rect_depth_uses_shallow_axis() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(18.0, 2.0, 10.0, 10.0);
        // 2 deep on x, 18 deep on y: push a left
        assert_eq!(overlap_depth(&a, &b), Some(Vec2::new(-2.0, 0.0)));
        assert_eq!(overlap_depth(&b, &a), Some(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_circle_depth_points_away_from_rect() {
        let target = rect(0.0, 0.0, 10.0, 10.0);
        let ball = BoundingVolume::circle(Vec2::new(0.0, 15.0), 8.0);
        let push = overlap_depth(&ball, &target).unwrap();
        assert!((push - Vec2::new(0.0, 3.0)).length() < 1e-5);

        let reverse = overlap_depth(&target, &ball).unwrap();
        assert!((reverse - Vec2::new(0.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn test_circle_depth_from_inside_rect() {
        let target = rect(0.0, 0.0, 10.0, 10.0);
        let ball = BoundingVolume::circle(Vec2::new(8.0, 0.0), 2.0);
        // Nearest face is x=10, two away; must also clear the radius
        let push = overlap_depth(&ball, &target).unwrap();
        assert!((push - Vec2::new(4.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_aabb_edges() {
        let aabb = Aabb::from_top_left(Vec2::new(50.0, 50.0), Vec2::new(60.0, 30.0));
        assert_eq!(aabb.left(), 50.0);
        assert_eq!(aabb.right(), 110.0);
        assert_eq!(aabb.top(), 50.0);
        assert_eq!(aabb.bottom(), 80.0);
        assert!(aabb.contains(Vec2::new(110.0, 80.0)));
        assert!(!aabb.contains(Vec2::new(111.0, 80.0)));
    }

    fn volume() -> impl Strategy<Value = BoundingVolume> {
        let rect = (-100.0f32..100.0, -100.0f32..100.0, 1.0f32..40.0, 1.0f32..40.0)
            .prop_map(|(x, y, hw, hh)| BoundingVolume::rect(Vec2::new(x, y), Vec2::new(hw, hh)));
        let circle = (-100.0f32..100.0, -100.0f32..100.0, 1.0f32..40.0)
            .prop_map(|(x, y, r)| BoundingVolume::circle(Vec2::new(x, y), r));
        prop_oneof![rect, circle]
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in volume(), b in volume()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }
    }
}
