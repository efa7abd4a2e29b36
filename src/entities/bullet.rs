use crate::geometry::{Bounded, Rect};

use super::Facing;

pub const BULLET_WIDTH: f32 = 8.0;
pub const BULLET_HEIGHT: f32 = 4.0;
pub const BULLET_SPEED: f32 = 10.0;

/// How far past the level edges a bullet may travel before it is culled.
const CULL_MARGIN: f32 = 50.0;
/// Lower vertical bound for angled bullets, independent of level height.
const CULL_FLOOR_Y: f32 = 600.0;

/// A projectile.
///
/// Bullets built with a non-zero angle follow a fixed velocity vector
/// (`cos(angle) * speed`, `sin(angle) * speed`). Bullets built with angle 0
/// travel purely horizontally along `direction`.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub direction: Facing,
    pub is_enemy: bool,
    pub damage: u32,
    /// Firing angle in radians; 0 selects horizontal motion.
    pub angle: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Bullet {
    pub fn new(x: f32, y: f32, direction: Facing, is_enemy: bool, damage: u32, angle: f32) -> Self {
        Bullet {
            x,
            y,
            direction,
            is_enemy,
            damage,
            angle,
            vx: angle.cos() * BULLET_SPEED,
            vy: angle.sin() * BULLET_SPEED,
        }
    }

    pub fn is_angled(&self) -> bool {
        self.angle != 0.0
    }

    pub fn update(&mut self) {
        if self.is_angled() {
            self.x += self.vx;
            self.y += self.vy;
        } else {
            self.x += self.direction.sign() * BULLET_SPEED;
        }
    }

    /// Angled bullets are culled on all four sides, horizontal ones only on
    /// the left and right.
    pub fn is_out_of_bounds(&self, level_width: f32) -> bool {
        let off_sides = self.x < -CULL_MARGIN || self.x > level_width + CULL_MARGIN;
        if self.is_angled() {
            off_sides || self.y < -CULL_MARGIN || self.y > CULL_FLOOR_Y
        } else {
            off_sides
        }
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}
