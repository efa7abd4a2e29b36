//! Session controller: the state machine and the per-frame simulation.
//!
//! Every public transition takes an immutable reference to the current
//! `GameSession` (and, where needed, an RNG handle) and returns a brand-new
//! `GameSession`. Side effects are limited to the injected RNG and logging.

pub mod camera;
pub mod level;

use log::{debug, info, trace, warn};
use rand::Rng;

use crate::entities::{
    Bullet, DamageOutcome, Enemy, Particle, Pickup, PickupKind, Platform, Player, FALL_DAMAGE,
    FRAME_MS,
};
use crate::geometry::{collides, Bounded};
use crate::input::{Command, InputSnapshot, MouseState};

pub use camera::Camera;
pub use level::{LevelLayout, LEVEL_COUNT, LEVEL_HEIGHT};

/// Damage dealt to the player by touching an enemy.
pub const CONTACT_DAMAGE: u32 = 20;
/// How far an enemy is shoved after touching the player.
pub const CONTACT_KNOCKBACK: f32 = 10.0;
pub const SCORE_PER_KILL: u32 = 100;
pub const EXPLOSION_PARTICLES: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Loading,
    Menu,
    Playing,
    Paused,
    GameOver,
    Win,
    LevelComplete,
}

/// What the session is waiting on while in `Loading`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadRequest {
    /// First asset load after launch; completes into the menu.
    Boot,
    /// Assets for a level; completes into play.
    Level(u32),
}

/// Things that happened during one tick, for frontends to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    ShotFired { x: f32, y: f32, angle: f32 },
    PlayerDamaged { amount: u32, health: u32 },
    LifeLost { lives_left: u32 },
    EnemyKilled { x: f32, y: f32 },
    PickupCollected { kind: PickupKind },
    LevelCleared { level: u32 },
    GameOver { score: u32 },
    Won { score: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSettings {
    pub viewport_width: f32,
    pub starting_lives: u32,
    /// Clamped to `1..=LEVEL_COUNT` when a session is built.
    pub max_level: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            viewport_width: 1200.0,
            starting_lives: 3,
            max_level: LEVEL_COUNT,
        }
    }
}

/// Mouse-button bookkeeping: a fresh press fires immediately, a held button
/// re-fires once the weapon's fire-rate interval has passed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FireControl {
    pub held: bool,
    pub last_press_ms: u64,
}

/// Read-only values for the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudSnapshot {
    pub level: u32,
    pub lives: u32,
    pub health: u32,
    pub score: u32,
    pub ammo: u32,
    pub enemies: usize,
}

/// The whole simulation.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub state: GameState,
    pub settings: SessionSettings,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub platforms: Vec<Platform>,
    pub pickups: Vec<Pickup>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub camera: Camera,
    pub level_width: f32,
    pub level_height: f32,
    /// Simulated milliseconds, advanced by one frame per tick.
    pub clock_ms: u64,
    pub frame: u64,
    pub fire: FireControl,
    pub pending_load: Option<LoadRequest>,
    /// Events produced by the most recent tick.
    pub events: Vec<FrameEvent>,
}

impl GameSession {
    /// A fresh session waiting for its first asset load.
    pub fn new(settings: SessionSettings) -> Self {
        let max_level = settings.max_level.clamp(1, LEVEL_COUNT);
        if max_level != settings.max_level {
            warn!("max_level {} out of range; using {max_level}", settings.max_level);
        }
        let settings = SessionSettings { max_level, ..settings };

        GameSession {
            state: GameState::Loading,
            settings,
            player: Player::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            platforms: Vec::new(),
            pickups: Vec::new(),
            particles: Vec::new(),
            score: 0,
            lives: settings.starting_lives,
            level: 1,
            camera: Camera::new(settings.viewport_width),
            level_width: level::level_width(1),
            level_height: LEVEL_HEIGHT,
            clock_ms: 0,
            frame: 0,
            fire: FireControl::default(),
            pending_load: Some(LoadRequest::Boot),
            events: Vec::new(),
        }
    }

    /// Level whose assets the session is waiting for, if any.
    pub fn awaiting_level_assets(&self) -> Option<u32> {
        match self.pending_load {
            Some(LoadRequest::Level(level)) if self.state == GameState::Loading => Some(level),
            _ => None,
        }
    }

    /// Replace all level contents with the layout for `level`.
    fn load_level(&mut self, level: u32) {
        let layout = level::generate(level);
        info!(
            "level {level}: {} platforms, {} enemies, {} pickups",
            layout.platforms.len(),
            layout.enemies.len(),
            layout.pickups.len()
        );

        self.level_width = layout.width;
        self.platforms = layout.platforms;
        self.enemies = layout
            .enemies
            .iter()
            .map(|s| {
                let enemy = Enemy::spawn(s.x, s.y, s.platform_id, &self.platforms, level);
                debug_assert!(enemy.platform.is_some(), "layout {level} names a missing platform");
                enemy
            })
            .collect();
        self.pickups = layout
            .pickups
            .iter()
            .map(|s| Pickup::new(s.x, s.y, s.kind))
            .collect();
        self.bullets.clear();
        self.particles.clear();
        self.camera.update(self.player.x, self.level_width);
    }

    /// Settle a damage attempt against the player, spending a life on death.
    fn settle_damage(&mut self, amount: u32, outcome: DamageOutcome) {
        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt => {
                debug!("player took {amount} damage, health {}", self.player.health);
                self.events.push(FrameEvent::PlayerDamaged {
                    amount,
                    health: self.player.health,
                });
            }
            DamageOutcome::Died => {
                self.lives = self.lives.saturating_sub(1);
                debug!("player died, {} lives left", self.lives);
                self.events.push(FrameEvent::LifeLost { lives_left: self.lives });
                if self.lives == 0 {
                    info!("game over at level {} with score {}", self.level, self.score);
                    self.state = GameState::GameOver;
                    self.events.push(FrameEvent::GameOver { score: self.score });
                } else {
                    self.player.respawn();
                }
            }
        }
    }

    fn try_shoot(&mut self, mouse: MouseState) {
        if let Some(bullet) = self
            .player
            .shoot((mouse.x, mouse.y), self.camera.x, self.clock_ms)
        {
            debug!("shot fired at angle {:.3}", bullet.angle);
            self.events.push(FrameEvent::ShotFired {
                x: bullet.x,
                y: bullet.y,
                angle: bullet.angle,
            });
            self.bullets.push(bullet);
        }
    }

    fn update_fire_control(&mut self, mouse: MouseState) {
        if mouse.left_down && !self.fire.held {
            self.try_shoot(mouse);
            self.fire.held = true;
            self.fire.last_press_ms = self.clock_ms;
        } else if !mouse.left_down {
            self.fire.held = false;
        } else {
            let interval = self.player.current_weapon().fire_rate_ms;
            if self.clock_ms.saturating_sub(self.fire.last_press_ms) > interval {
                self.try_shoot(mouse);
                self.fire.last_press_ms = self.clock_ms;
            }
        }
    }

    fn level_cleared(&mut self) {
        self.events.push(FrameEvent::LevelCleared { level: self.level });
        if self.level >= self.settings.max_level {
            info!("final level {} cleared, score {}", self.level, self.score);
            self.state = GameState::Win;
            self.events.push(FrameEvent::Won { score: self.score });
        } else {
            info!("level {} complete, score {}", self.level, self.score);
            self.level += 1;
            self.state = GameState::LevelComplete;
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            level: self.level,
            lives: self.lives,
            health: self.player.health,
            score: self.score,
            ammo: self.player.current_weapon().ammo,
            enemies: self.enemies.len(),
        }
    }
}

// ── State transitions (pure) ─────────────────────────────────────────────────

/// The resource provider finished loading. Boot completes into the menu, a
/// level load regenerates that level and resumes play from its start.
pub fn assets_loaded(state: &GameSession) -> GameSession {
    let mut next = state.clone();
    if next.state != GameState::Loading {
        return next;
    }
    match next.pending_load.take() {
        Some(LoadRequest::Boot) | None => {
            info!("assets ready");
            next.state = GameState::Menu;
        }
        Some(LoadRequest::Level(level)) => {
            info!("assets for level {level} ready");
            next.load_level(level);
            next.player.reset_position();
            next.camera.reset();
            next.state = GameState::Playing;
        }
    }
    next
}

/// Begin a new session from the menu. Refused until assets are ready.
pub fn start(state: &GameSession, assets_ready: bool) -> GameSession {
    let mut next = state.clone();
    if next.state != GameState::Menu {
        return next;
    }
    if !assets_ready {
        warn!("start requested before assets finished loading");
        return next;
    }

    info!("starting new session");
    next.player = Player::new();
    next.score = 0;
    next.lives = next.settings.starting_lives;
    next.level = 1;
    next.fire = FireControl::default();
    next.events.clear();
    next.load_level(1);
    next.state = GameState::Playing;
    next
}

/// Apply a one-shot user command.
pub fn apply_command(state: &GameSession, command: Command, assets_ready: bool) -> GameSession {
    use GameState::*;

    let mut next = state.clone();
    match (command, state.state) {
        (Command::Start, Menu) => return start(state, assets_ready),
        (Command::Escape, Playing) => next.state = Menu,
        (Command::Escape, Paused) => next.state = Playing,
        (Command::Escape, GameOver) | (Command::Escape, Win) => next.state = Menu,
        (Command::TogglePause, Playing) => next.state = Paused,
        (Command::TogglePause, Paused) => next.state = Playing,
        (Command::Continue, LevelComplete) => {
            info!("loading assets for level {}", next.level);
            next.state = Loading;
            next.pending_load = Some(LoadRequest::Level(next.level));
        }
        _ => {}
    }
    if next.state != state.state {
        debug!("{:?} -> {:?} on {:?}", state.state, next.state, command);
    }
    next
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame. Only `Playing` sessions move; any
/// other state comes back unchanged apart from an emptied event list. All
/// randomness comes through `rng`.
pub fn tick(state: &GameSession, input: &InputSnapshot, rng: &mut impl Rng) -> GameSession {
    let mut next = state.clone();
    next.events.clear();
    if next.state != GameState::Playing {
        return next;
    }
    next.frame += 1;
    next.clock_ms += FRAME_MS as u64;
    trace!("tick {} at {}ms", next.frame, next.clock_ms);

    // ── 1. Player ────────────────────────────────────────────────────────────
    let fall = next
        .player
        .update(input, &next.platforms, next.level_width, next.level_height);
    if let Some(outcome) = fall {
        next.settle_damage(FALL_DAMAGE, outcome);
    }
    if next.state != GameState::Playing {
        return next;
    }

    // ── 2. Camera ────────────────────────────────────────────────────────────
    next.camera.update(next.player.x, next.level_width);

    // ── 3. Fire control ──────────────────────────────────────────────────────
    next.update_fire_control(input.mouse);

    // ── 4. Enemies, contact damage, deaths ───────────────────────────────────
    let mut contacts = Vec::new();
    for enemy in next.enemies.iter_mut() {
        enemy.update(&next.platforms);
        if collides(&next.player, &*enemy) {
            contacts.push(next.player.take_damage(CONTACT_DAMAGE));
            enemy.knock_back(CONTACT_KNOCKBACK);
        }
    }
    for outcome in contacts {
        next.settle_damage(CONTACT_DAMAGE, outcome);
    }
    if next.state != GameState::Playing {
        return next;
    }

    let (dead, alive): (Vec<Enemy>, Vec<Enemy>) =
        next.enemies.drain(..).partition(|e| e.is_dead());
    next.enemies = alive;
    for enemy in dead {
        let (cx, cy) = enemy.bounds().center();
        next.particles
            .extend((0..EXPLOSION_PARTICLES).map(|_| Particle::spawn(cx, cy, &mut *rng)));
        next.score += SCORE_PER_KILL;
        debug!("enemy killed at ({cx:.0}, {cy:.0}), score {}", next.score);
        next.events.push(FrameEvent::EnemyKilled { x: cx, y: cy });
    }

    // ── 5. Bullets ───────────────────────────────────────────────────────────
    let level_width = next.level_width;
    for bullet in next.bullets.iter_mut() {
        bullet.update();
    }
    next.bullets.retain(|b| !b.is_out_of_bounds(level_width));

    // ── 6. Pickups ───────────────────────────────────────────────────────────
    let player = &mut next.player;
    let events = &mut next.events;
    next.pickups.retain(|pickup| {
        if !collides(&*player, pickup) {
            return true;
        }
        pickup.collect(player);
        debug!("collected {:?} pickup", pickup.kind);
        events.push(FrameEvent::PickupCollected { kind: pickup.kind });
        false
    });

    // ── 7. Particles ─────────────────────────────────────────────────────────
    for particle in next.particles.iter_mut() {
        particle.update();
    }
    next.particles.retain(Particle::is_alive);

    // ── 8. Bullets vs enemies: one hit per bullet ────────────────────────────
    let enemies = &mut next.enemies;
    next.bullets.retain(|bullet| {
        if bullet.is_enemy {
            return true;
        }
        match enemies.iter_mut().find(|e| collides(bullet, &**e)) {
            Some(enemy) => {
                enemy.take_damage(bullet.damage);
                false
            }
            None => true,
        }
    });

    // ── 9. Level clear ───────────────────────────────────────────────────────
    if next.enemies.is_empty() {
        next.level_cleared();
    }

    next
}
