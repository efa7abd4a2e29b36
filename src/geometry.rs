//! Axis-aligned boxes and the overlap tests every entity pair goes through.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Anything that takes part in collision exposes its bounding box.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Strict AABB overlap. Boxes whose edges only touch do not intersect.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Overlap test between two collision participants.
pub fn collides(a: &impl Bounded, b: &impl Bounded) -> bool {
    intersects(&a.bounds(), &b.bounds())
}

/// True when `body` has sunk into the top surface of `surface`: horizontal
/// overlap, bottom below the surface top, and top still above it.
///
/// A body entirely below a platform never qualifies, so it is never pulled
/// up through the platform from underneath.
pub fn is_landing_on(body: &Rect, surface: &Rect) -> bool {
    body.x < surface.right()
        && body.right() > surface.x
        && body.bottom() > surface.y
        && body.y < surface.y
}
