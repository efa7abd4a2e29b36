use crate::geometry::{is_landing_on, Bounded, Rect};
use crate::input::InputSnapshot;

use super::{Bullet, Facing, Platform};

pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 60.0;
pub const PLAYER_START: (f32, f32) = (50.0, 400.0);
pub const MAX_HEALTH: u32 = 100;
/// Frames of immunity after taking a hit.
pub const INVULNERABLE_FRAMES: u32 = 60;
/// Damage for dropping below the bottom of the level.
pub const FALL_DAMAGE: u32 = 50;
/// Milliseconds credited to animation timers per tick (≈60 Hz).
pub const FRAME_MS: u32 = 16;

const RUN_SPEED: f32 = 3.0;
const JUMP_POWER: f32 = 15.0;
const GRAVITY: f32 = 0.8;

// ── Animation tables ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Walk,
    Jump,
}

impl AnimationState {
    /// Milliseconds each frame is shown. `None` for single-frame states.
    fn frame_interval_ms(self) -> Option<u32> {
        match self {
            AnimationState::Idle => None,
            AnimationState::Walk => Some(150),
            AnimationState::Jump => Some(200),
        }
    }

    pub fn frame_count(self) -> usize {
        match self {
            AnimationState::Idle => 1,
            AnimationState::Walk | AnimationState::Jump => 2,
        }
    }
}

// ── Weapons ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponId {
    Pistol,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub id: WeaponId,
    pub name: &'static str,
    pub damage: u32,
    /// Minimum milliseconds between two shots.
    pub fire_rate_ms: u64,
    pub ammo: u32,
    pub max_ammo: u32,
}

impl Weapon {
    pub fn pistol() -> Self {
        Weapon {
            id: WeaponId::Pistol,
            name: "PISTOL",
            damage: 1,
            fire_rate_ms: 300,
            ammo: 30,
            max_ammo: 30,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Result of a damage attempt, for the session to settle lives with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invulnerable; nothing changed.
    Ignored,
    Hurt,
    /// Health reached zero. The session decides between respawn and game over.
    Died,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub health: u32,
    pub invulnerable: bool,
    pub invulnerable_timer: u32,
    pub facing: Facing,
    pub animation: AnimationState,
    pub animation_frame: usize,
    pub animation_timer: u32,
    /// Airborne: set by jumping, cleared on landing.
    pub is_jumping: bool,
    /// Jump input as seen on the previous tick, for edge detection.
    pub jump_held: bool,
    pub weapons: Vec<Weapon>,
    /// Index into `weapons`. Always valid.
    current_weapon: usize,
    /// Session clock reading of the last shot, if any.
    pub last_shot_ms: Option<u64>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Player {
            x: PLAYER_START.0,
            y: PLAYER_START.1,
            vx: 0.0,
            vy: 0.0,
            health: MAX_HEALTH,
            invulnerable: false,
            invulnerable_timer: 0,
            facing: Facing::Right,
            animation: AnimationState::Idle,
            animation_frame: 0,
            animation_timer: 0,
            is_jumping: false,
            jump_held: false,
            weapons: vec![Weapon::pistol()],
            current_weapon: 0,
            last_shot_ms: None,
        }
    }

    pub fn current_weapon(&self) -> &Weapon {
        &self.weapons[self.current_weapon]
    }

    pub fn current_weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapons[self.current_weapon]
    }

    /// Equip a weapon from the inventory. Returns `false` if it isn't carried.
    pub fn select_weapon(&mut self, id: WeaponId) -> bool {
        match self.weapons.iter().position(|w| w.id == id) {
            Some(index) => {
                self.current_weapon = index;
                true
            }
            None => false,
        }
    }

    /// Advance one tick: input, animation, gravity, movement, landing.
    ///
    /// Returns the outcome of fall damage if the player dropped below the
    /// level this tick.
    pub fn update(
        &mut self,
        input: &InputSnapshot,
        platforms: &[Platform],
        level_width: f32,
        level_height: f32,
    ) -> Option<DamageOutcome> {
        if self.invulnerable {
            self.invulnerable_timer = self.invulnerable_timer.saturating_sub(1);
            if self.invulnerable_timer == 0 {
                self.invulnerable = false;
            }
        }

        // Right is checked after left, so it wins when both are held.
        self.vx = 0.0;
        let mut is_moving = false;
        if input.left {
            self.vx = -RUN_SPEED;
            self.facing = Facing::Left;
            is_moving = true;
        }
        if input.right {
            self.vx = RUN_SPEED;
            self.facing = Facing::Right;
            is_moving = true;
        }

        let jump_pressed = input.jump && !self.jump_held;
        self.jump_held = input.jump;
        if jump_pressed && !self.is_jumping {
            self.vy = -JUMP_POWER;
            self.is_jumping = true;
            self.animation_frame = 0;
            self.animation_timer = 0;
        }

        self.animation_timer += FRAME_MS;
        let next = if self.is_jumping {
            AnimationState::Jump
        } else if is_moving {
            AnimationState::Walk
        } else {
            AnimationState::Idle
        };
        if next != self.animation {
            self.set_animation(next);
        }
        self.advance_animation();

        self.vy += GRAVITY;
        self.x += self.vx;
        self.y += self.vy;
        self.x = self.x.min(level_width - PLAYER_WIDTH).max(0.0);

        self.land_on_platforms(platforms);

        if self.y > level_height {
            return Some(self.take_damage(FALL_DAMAGE));
        }
        None
    }

    fn set_animation(&mut self, animation: AnimationState) {
        self.animation = animation;
        self.animation_frame = 0;
        self.animation_timer = 0;
    }

    fn advance_animation(&mut self) {
        if let Some(interval) = self.animation.frame_interval_ms() {
            if self.animation_timer >= interval {
                self.animation_frame = (self.animation_frame + 1) % self.animation.frame_count();
                self.animation_timer = 0;
            }
        }
    }

    /// Snap onto the first platform the player is falling into.
    fn land_on_platforms(&mut self, platforms: &[Platform]) {
        if self.vy <= 0.0 {
            return;
        }
        let body = self.bounds();
        if let Some(platform) = platforms
            .iter()
            .find(|p| is_landing_on(&body, &p.bounds()))
        {
            self.y = platform.y - PLAYER_HEIGHT;
            self.vy = 0.0;
            self.is_jumping = false;
            if self.animation == AnimationState::Jump {
                self.set_animation(AnimationState::Idle);
            }
        }
    }

    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.invulnerable {
            return DamageOutcome::Ignored;
        }
        self.health = self.health.saturating_sub(amount);
        self.invulnerable = true;
        self.invulnerable_timer = INVULNERABLE_FRAMES;

        if self.health == 0 {
            DamageOutcome::Died
        } else {
            DamageOutcome::Hurt
        }
    }

    /// Full heal back at the level start.
    pub fn respawn(&mut self) {
        self.reset_position();
        self.is_jumping = false;
        self.health = MAX_HEALTH;
        self.invulnerable = false;
        self.invulnerable_timer = 0;
        self.set_animation(AnimationState::Idle);
    }

    /// Move to the level start, keeping health and inventory.
    pub fn reset_position(&mut self) {
        self.x = PLAYER_START.0;
        self.y = PLAYER_START.1;
        self.vx = 0.0;
        self.vy = 0.0;
    }

    /// Fire the current weapon at a point given in viewport coordinates.
    ///
    /// Returns `None` when out of ammo or when the weapon's fire-rate interval
    /// has not elapsed since the last shot at clock time `now_ms`.
    pub fn shoot(&mut self, aim: (f32, f32), camera_x: f32, now_ms: u64) -> Option<Bullet> {
        let weapon = self.current_weapon();
        if weapon.ammo == 0 {
            return None;
        }
        if let Some(last) = self.last_shot_ms {
            if now_ms.saturating_sub(last) < weapon.fire_rate_ms {
                return None;
            }
        }
        let damage = weapon.damage;

        let weapon = self.current_weapon_mut();
        weapon.ammo -= 1;
        self.last_shot_ms = Some(now_ms);

        let (center_x, center_y) = self.bounds().center();
        let world_aim_x = aim.0 + camera_x;
        let direction = if world_aim_x > center_x {
            Facing::Right
        } else {
            Facing::Left
        };
        self.facing = direction;

        let mut dx = world_aim_x - center_x;
        let dy = aim.1 - center_y;
        if dx.abs() < 1.0 {
            dx = direction.sign();
        }
        let angle = dy.atan2(dx);

        let muzzle_x = match direction {
            Facing::Right => self.x + PLAYER_WIDTH,
            Facing::Left => self.x,
        };
        Some(Bullet::new(muzzle_x, center_y, direction, false, damage, angle))
    }

    /// Draw is skipped every other 5-frame window while invulnerable.
    pub fn is_blinking_out(&self) -> bool {
        self.invulnerable && (self.invulnerable_timer / 5) % 2 == 0
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }
}
