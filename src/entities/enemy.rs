use log::warn;

use crate::geometry::{is_landing_on, Bounded, Rect};

use super::{find_platform, Platform};

pub const ENEMY_WIDTH: f32 = 40.0;
pub const ENEMY_HEIGHT: f32 = 60.0;
pub const ENEMY_START_HEALTH: u32 = 2;

const DRIFT_PER_FRAME: f32 = 0.5;
const ANIMATION_INTERVAL_MS: u32 = 200;
const ANIMATION_FRAMES: usize = 4;

/// Patrol speed for a given level.
pub fn enemy_speed(level: u32) -> f32 {
    0.8 + 0.2 * level as f32
}

/// A platform patroller.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub health: u32,
    pub speed: f32,
    /// +1.0 moving right, -1.0 moving left.
    pub direction: f32,
    pub platform_id: u32,
    /// The platform it patrols, resolved once at spawn. `None` leaves the
    /// enemy standing still where it spawned.
    pub platform: Option<Platform>,
    pub animation_frame: usize,
    pub animation_timer: u32,
}

impl Enemy {
    /// Spawn an enemy bound to the platform with `platform_id`, standing on
    /// its top edge.
    pub fn spawn(x: f32, y: f32, platform_id: u32, platforms: &[Platform], level: u32) -> Self {
        let platform = find_platform(platforms, platform_id).copied();
        let y = match platform {
            Some(p) => p.y - ENEMY_HEIGHT,
            None => {
                warn!("enemy at x={x} references unknown platform {platform_id}; it will not patrol");
                y
            }
        };
        Enemy {
            x,
            y,
            health: ENEMY_START_HEALTH,
            speed: enemy_speed(level),
            direction: 1.0,
            platform_id,
            platform,
            animation_frame: 0,
            animation_timer: 0,
        }
    }

    pub fn update(&mut self, platforms: &[Platform]) {
        let Some(home) = self.platform else {
            return;
        };

        self.x += self.speed * self.direction;
        if self.x <= home.x {
            self.x = home.x;
            self.direction = 1.0;
        } else if self.x + ENEMY_WIDTH >= home.x + home.width {
            self.x = home.x + home.width - ENEMY_WIDTH;
            self.direction = -1.0;
        }

        self.y += DRIFT_PER_FRAME;
        for platform in platforms {
            if is_landing_on(&self.bounds(), &platform.bounds()) {
                self.y = platform.y - ENEMY_HEIGHT;
            }
        }

        self.animation_timer += super::FRAME_MS;
        if self.animation_timer >= ANIMATION_INTERVAL_MS {
            self.animation_frame = (self.animation_frame + 1) % ANIMATION_FRAMES;
            self.animation_timer = 0;
        }
    }

    /// Pushed along its patrol direction after touching the player.
    pub fn knock_back(&mut self, distance: f32) {
        self.x += self.direction * distance;
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }
}
