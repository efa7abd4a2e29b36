//! Boundary between the simulation and whatever draws it.
//!
//! The core never depends on visuals: every `draw` falls back to flat shapes
//! when the resource provider has nothing for a key.

use crate::compute::GameSession;
use crate::entities::{
    AnimationState, Bullet, Enemy, Facing, Particle, Pickup, PickupKind, Platform, Player,
    BULLET_HEIGHT, BULLET_WIDTH, ENEMY_HEIGHT, ENEMY_START_HEALTH, ENEMY_WIDTH, PICKUP_SIZE,
    PLAYER_HEIGHT, PLAYER_WIDTH,
};

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const C_BACKGROUND: Rgb = Rgb(15, 52, 96);
pub const C_PLATFORM: Rgb = Rgb(139, 69, 19);
pub const C_PLAYER: Rgb = Rgb(233, 69, 96);
pub const C_ENEMY: Rgb = Rgb(0, 170, 0);
pub const C_HEALTH_BAR_BACK: Rgb = Rgb(255, 0, 0);
pub const C_HEALTH_BAR_FILL: Rgb = Rgb(0, 255, 0);
pub const C_BULLET_PLAYER: Rgb = Rgb(255, 255, 0);
pub const C_BULLET_ENEMY: Rgb = Rgb(255, 0, 0);
pub const C_PICKUP_HEALTH: Rgb = Rgb(255, 0, 0);
pub const C_PICKUP_AMMO: Rgb = Rgb(255, 255, 0);

// ── Interfaces ────────────────────────────────────────────────────────────────

/// Single-image assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    PlayerIdle,
    Bullet,
    Health,
    Ammo,
    Platform,
    Background,
}

/// Multi-frame assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    PlayerWalk,
    PlayerJump,
    EnemyWalk,
}

/// Asset source. Loading is a request/response exchange: the frontend calls
/// `reload_for_level`, then polls `poll_loaded` each frame until it reports
/// the level that finished.
pub trait ResourceProvider {
    type Image;

    fn sprite(&self, key: SpriteKey) -> Option<&Self::Image>;
    fn animation_frames(&self, key: AnimationKey) -> &[Self::Image];
    fn is_ready(&self) -> bool;
    fn reload_for_level(&mut self, level: u32);
    /// Level whose load completed since the last poll, if any.
    fn poll_loaded(&mut self) -> Option<u32>;
}

/// Render target in screen coordinates.
pub trait Surface {
    type Image;

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb);
    fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgb);
    fn blit(&mut self, image: &Self::Image, x: i32, y: i32, flip_x: bool);

    /// Blit rotated by `degrees` around the image centre. Surfaces that can't
    /// rotate draw it unrotated.
    fn blit_rotated(&mut self, image: &Self::Image, x: i32, y: i32, _degrees: f32) {
        self.blit(image, x, y, false);
    }
}

fn screen_x(world_x: f32, camera_x: f32) -> i32 {
    (world_x - camera_x) as i32
}

// ── Entities ──────────────────────────────────────────────────────────────────

impl Player {
    /// Which animation and frame the renderer should show.
    pub fn sprite_frame(&self) -> (AnimationState, usize) {
        (self.animation, self.animation_frame)
    }

    pub fn draw<S, R>(&self, surface: &mut S, resources: &R, camera_x: f32)
    where
        S: Surface,
        R: ResourceProvider<Image = S::Image>,
    {
        if self.is_blinking_out() {
            return;
        }
        let x = screen_x(self.x, camera_x);
        let y = self.y as i32;

        let sprite = match self.animation {
            AnimationState::Idle => resources.sprite(SpriteKey::PlayerIdle),
            AnimationState::Walk => resources
                .animation_frames(AnimationKey::PlayerWalk)
                .get(self.animation_frame),
            AnimationState::Jump => resources
                .animation_frames(AnimationKey::PlayerJump)
                .get(self.animation_frame),
        };
        // Jump frames are drawn facing left, the others facing right.
        let native = match self.animation {
            AnimationState::Jump => Facing::Left,
            AnimationState::Idle | AnimationState::Walk => Facing::Right,
        };
        match sprite {
            Some(image) => surface.blit(image, x, y, self.facing != native),
            None => surface.fill_rect(x, y, PLAYER_WIDTH as u32, PLAYER_HEIGHT as u32, C_PLAYER),
        }
    }
}

impl Enemy {
    pub fn draw<S, R>(&self, surface: &mut S, resources: &R, camera_x: f32)
    where
        S: Surface,
        R: ResourceProvider<Image = S::Image>,
    {
        let x = screen_x(self.x, camera_x);
        let y = self.y as i32;

        match resources
            .animation_frames(AnimationKey::EnemyWalk)
            .get(self.animation_frame)
        {
            Some(image) => surface.blit(image, x, y, self.direction < 0.0),
            None => {
                surface.fill_rect(x, y, ENEMY_WIDTH as u32, ENEMY_HEIGHT as u32, C_ENEMY);
                if self.health < ENEMY_START_HEALTH {
                    let bar_width = ENEMY_WIDTH as u32;
                    let fill = bar_width * self.health / ENEMY_START_HEALTH;
                    surface.fill_rect(x, y - 10, bar_width, 5, C_HEALTH_BAR_BACK);
                    surface.fill_rect(x, y - 10, fill, 5, C_HEALTH_BAR_FILL);
                }
            }
        }
    }
}

impl Bullet {
    pub fn draw<S, R>(&self, surface: &mut S, resources: &R, camera_x: f32)
    where
        S: Surface,
        R: ResourceProvider<Image = S::Image>,
    {
        let x = screen_x(self.x, camera_x);
        let y = self.y as i32;

        let sprite = resources
            .sprite(SpriteKey::Bullet)
            .filter(|_| !self.is_enemy);
        match sprite {
            Some(image) if self.is_angled() => {
                surface.blit_rotated(image, x, y, -self.angle.to_degrees())
            }
            Some(image) => surface.blit(image, x, y, false),
            None => {
                let color = if self.is_enemy { C_BULLET_ENEMY } else { C_BULLET_PLAYER };
                if self.is_angled() {
                    let cx = x + (BULLET_WIDTH / 2.0) as i32;
                    let cy = y + (BULLET_HEIGHT / 2.0) as i32;
                    surface.fill_circle(cx, cy, 4, color);
                } else {
                    surface.fill_rect(x, y, BULLET_WIDTH as u32, BULLET_HEIGHT as u32, color);
                }
            }
        }
    }
}

impl Pickup {
    pub fn draw<S, R>(&self, surface: &mut S, resources: &R, camera_x: f32)
    where
        S: Surface,
        R: ResourceProvider<Image = S::Image>,
    {
        let x = screen_x(self.x, camera_x);
        let y = self.y as i32;
        let (key, color) = match self.kind {
            PickupKind::Health => (SpriteKey::Health, C_PICKUP_HEALTH),
            PickupKind::Ammo => (SpriteKey::Ammo, C_PICKUP_AMMO),
        };
        match resources.sprite(key) {
            Some(image) => surface.blit(image, x, y, false),
            None => surface.fill_rect(x, y, PICKUP_SIZE as u32, PICKUP_SIZE as u32, color),
        }
    }
}

impl Particle {
    pub fn draw<S: Surface>(&self, surface: &mut S, camera_x: f32) {
        let (r, g, b) = self.faded_color();
        surface.fill_circle(
            screen_x(self.x, camera_x),
            self.y as i32,
            self.size as u32,
            Rgb(r, g, b),
        );
    }
}

impl Platform {
    pub fn draw<S, R>(&self, surface: &mut S, resources: &R, camera_x: f32)
    where
        S: Surface,
        R: ResourceProvider<Image = S::Image>,
    {
        let x = screen_x(self.x, camera_x);
        match resources.sprite(SpriteKey::Platform) {
            Some(image) => surface.blit(image, x, self.y as i32, false),
            None => surface.fill_rect(
                x,
                self.y as i32,
                self.width as u32,
                self.height as u32,
                C_PLATFORM,
            ),
        }
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Draw the visible part of the level: background, platforms, pickups,
/// enemies, bullets, particles, then the player on top.
pub fn draw_world<S, R>(session: &GameSession, surface: &mut S, resources: &R, viewport_height: u32)
where
    S: Surface,
    R: ResourceProvider<Image = S::Image>,
{
    let camera_x = session.camera.x;
    let viewport_width = session.camera.viewport_width;

    match resources.sprite(SpriteKey::Background) {
        Some(image) => surface.blit(image, 0, 0, false),
        None => surface.fill_rect(0, 0, viewport_width as u32, viewport_height, C_BACKGROUND),
    }

    for platform in session
        .platforms
        .iter()
        .filter(|p| p.x + p.width > camera_x && p.x < camera_x + viewport_width)
    {
        platform.draw(surface, resources, camera_x);
    }
    for pickup in &session.pickups {
        pickup.draw(surface, resources, camera_x);
    }
    for enemy in &session.enemies {
        enemy.draw(surface, resources, camera_x);
    }
    for bullet in &session.bullets {
        bullet.draw(surface, resources, camera_x);
    }
    for particle in &session.particles {
        particle.draw(surface, camera_x);
    }
    session.player.draw(surface, resources, camera_x);
}
