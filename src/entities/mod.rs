//! Game entity types. Each entity owns its own physical state and the
//! per-frame rule that advances it; the session controller in `compute`
//! decides when those rules run and what their results mean.

mod bullet;
mod enemy;
mod particle;
mod pickup;
mod player;

pub use bullet::{Bullet, BULLET_HEIGHT, BULLET_SPEED, BULLET_WIDTH};
pub use enemy::{enemy_speed, Enemy, ENEMY_HEIGHT, ENEMY_START_HEALTH, ENEMY_WIDTH};
pub use particle::{hsv_to_rgb, Particle, PARTICLE_LIFETIME};
pub use pickup::{Pickup, PickupKind, HEAL_AMOUNT, PICKUP_SIZE};
pub use player::{
    AnimationState, DamageOutcome, Player, Weapon, WeaponId, FALL_DAMAGE, FRAME_MS,
    INVULNERABLE_FRAMES, MAX_HEALTH, PLAYER_HEIGHT, PLAYER_START, PLAYER_WIDTH,
};

use crate::geometry::{Bounded, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

// ── Platforms ─────────────────────────────────────────────────────────────────

/// Id reserved for the full-width ground platform every level carries.
pub const GROUND_PLATFORM_ID: u32 = 0;

/// Static level geometry. Immutable once a level is generated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub id: u32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32, id: u32) -> Self {
        Platform { x, y, width, height, id }
    }
}

impl Bounded for Platform {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Look up a platform by id in a level's platform list.
pub fn find_platform(platforms: &[Platform], id: u32) -> Option<&Platform> {
    platforms.iter().find(|p| p.id == id)
}
