use std::collections::HashMap;

use platform_shooter::compute::*;
use platform_shooter::entities::*;
use platform_shooter::render::*;

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Rect { x: i32, y: i32, w: u32, h: u32, color: Rgb },
    Circle { cx: i32, cy: i32, r: u32, color: Rgb },
    Blit { image: String, x: i32, y: i32, flip: bool },
    Rotated { image: String, degrees: f32 },
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Recorder {
    fn rects_of(&self, color: Rgb) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Rect { color: c, .. } if *c == color))
            .collect()
    }

    fn blits_of(&self, name: &str) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Blit { image, .. } if image == name))
            .collect()
    }
}

impl Surface for Recorder {
    type Image = String;

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb) {
        self.ops.push(Op::Rect { x, y, w, h, color });
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: u32, color: Rgb) {
        self.ops.push(Op::Circle { cx, cy, r, color });
    }

    fn blit(&mut self, image: &String, x: i32, y: i32, flip: bool) {
        self.ops.push(Op::Blit { image: image.clone(), x, y, flip });
    }

    fn blit_rotated(&mut self, image: &String, _x: i32, _y: i32, degrees: f32) {
        self.ops.push(Op::Rotated { image: image.clone(), degrees });
    }
}

/// Provider with named images; empty by default.
#[derive(Default)]
struct Named {
    sprites: HashMap<SpriteKey, String>,
    animations: HashMap<AnimationKey, Vec<String>>,
}

impl Named {
    fn full() -> Self {
        let mut n = Named::default();
        for (key, name) in [
            (SpriteKey::PlayerIdle, "idle"),
            (SpriteKey::Bullet, "bullet"),
            (SpriteKey::Health, "health"),
            (SpriteKey::Ammo, "ammo"),
        ] {
            n.sprites.insert(key, name.to_string());
        }
        n.animations.insert(AnimationKey::PlayerWalk, vec!["walk0".into(), "walk1".into()]);
        n.animations.insert(AnimationKey::PlayerJump, vec!["jump0".into(), "jump1".into()]);
        n.animations.insert(
            AnimationKey::EnemyWalk,
            (0..4).map(|i| format!("enemy{i}")).collect(),
        );
        n
    }
}

impl ResourceProvider for Named {
    type Image = String;

    fn sprite(&self, key: SpriteKey) -> Option<&String> {
        self.sprites.get(&key)
    }

    fn animation_frames(&self, key: AnimationKey) -> &[String] {
        self.animations.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn reload_for_level(&mut self, _level: u32) {}

    fn poll_loaded(&mut self) -> Option<u32> {
        None
    }
}

fn make_state() -> GameSession {
    start(&assets_loaded(&GameSession::new(SessionSettings::default())), true)
}

fn draw(s: &GameSession, provider: &Named) -> Recorder {
    let mut surface = Recorder::default();
    draw_world(s, &mut surface, provider, LEVEL_HEIGHT as u32);
    surface
}

// ── Fallback shapes ───────────────────────────────────────────────────────────

#[test]
fn background_fills_viewport_first() {
    let surface = draw(&make_state(), &Named::default());
    assert_eq!(
        surface.ops[0],
        Op::Rect { x: 0, y: 0, w: 1200, h: 500, color: C_BACKGROUND }
    );
}

#[test]
fn only_visible_platforms_are_drawn() {
    let surface = draw(&make_state(), &Named::default());
    // Level 1 at camera 0: platforms 1-4 plus the ground.
    assert_eq!(surface.rects_of(C_PLATFORM).len(), 5);
}

#[test]
fn player_fallback_is_drawn_last() {
    let surface = draw(&make_state(), &Named::default());
    assert_eq!(
        surface.ops.last(),
        Some(&Op::Rect { x: 50, y: 400, w: 40, h: 60, color: C_PLAYER })
    );
}

#[test]
fn blinking_player_is_skipped() {
    let mut s = make_state();
    s.player.invulnerable = true;
    s.player.invulnerable_timer = 60;
    let surface = draw(&s, &Named::default());
    assert!(surface.rects_of(C_PLAYER).is_empty());
}

#[test]
fn world_is_offset_by_camera() {
    let mut s = make_state();
    s.camera.x = 100.0;
    let surface = draw(&s, &Named::default());
    assert!(surface.rects_of(C_PLAYER).contains(&&Op::Rect {
        x: -50,
        y: 400,
        w: 40,
        h: 60,
        color: C_PLAYER
    }));
}

#[test]
fn wounded_enemy_shows_health_bar() {
    let mut s = make_state();
    s.pickups.clear();
    s.enemies.truncate(1);
    s.enemies[0].health = 1;
    let surface = draw(&s, &Named::default());
    let fill = surface.rects_of(C_HEALTH_BAR_FILL);
    assert_eq!(fill.len(), 1);
    assert!(matches!(fill[0], Op::Rect { w: 20, h: 5, .. }));
    assert_eq!(surface.rects_of(C_HEALTH_BAR_BACK).len(), 1);
}

#[test]
fn healthy_enemy_has_no_bar() {
    let surface = draw(&make_state(), &Named::default());
    assert_eq!(surface.rects_of(C_ENEMY).len(), 4);
    assert!(surface.rects_of(C_HEALTH_BAR_FILL).is_empty());
}

#[test]
fn bullet_fallbacks_by_kind() {
    let mut s = make_state();
    // Pickups share the bullet colours.
    s.pickups.clear();
    s.bullets.push(Bullet::new(100.0, 100.0, Facing::Right, false, 1, 0.0));
    s.bullets.push(Bullet::new(200.0, 100.0, Facing::Right, false, 1, 0.5));
    s.bullets.push(Bullet::new(300.0, 100.0, Facing::Left, true, 1, 0.0));
    let surface = draw(&s, &Named::default());

    assert_eq!(
        surface.rects_of(C_BULLET_PLAYER),
        vec![&Op::Rect { x: 100, y: 100, w: 8, h: 4, color: C_BULLET_PLAYER }]
    );
    assert!(surface
        .ops
        .contains(&Op::Circle { cx: 204, cy: 102, r: 4, color: C_BULLET_PLAYER }));
    assert_eq!(surface.rects_of(C_BULLET_ENEMY).len(), 1);
}

#[test]
fn pickups_fall_back_to_coloured_squares() {
    let mut s = make_state();
    s.pickups = vec![
        Pickup::new(100.0, 100.0, PickupKind::Health),
        Pickup::new(200.0, 100.0, PickupKind::Ammo),
    ];
    let surface = draw(&s, &Named::default());
    assert!(surface
        .ops
        .contains(&Op::Rect { x: 100, y: 100, w: 20, h: 20, color: C_PICKUP_HEALTH }));
    assert!(surface
        .ops
        .contains(&Op::Rect { x: 200, y: 100, w: 20, h: 20, color: C_PICKUP_AMMO }));
}

#[test]
fn particles_draw_faded_circles() {
    let mut s = make_state();
    s.particles = vec![Particle {
        x: 10.0,
        y: 20.0,
        vx: 0.0,
        vy: 0.0,
        size: 3.0,
        life: PARTICLE_LIFETIME,
        color: (255, 128, 0),
    }];
    let surface = draw(&s, &Named::default());
    assert!(surface
        .ops
        .contains(&Op::Circle { cx: 10, cy: 20, r: 3, color: Rgb(255, 128, 0) }));
}

// ── Sprites ───────────────────────────────────────────────────────────────────

#[test]
fn idle_player_uses_idle_sprite() {
    let surface = draw(&make_state(), &Named::full());
    assert_eq!(
        surface.ops.last(),
        Some(&Op::Blit { image: "idle".into(), x: 50, y: 400, flip: false })
    );
}

#[test]
fn walking_left_player_is_mirrored() {
    let mut s = make_state();
    s.player.animation = AnimationState::Walk;
    s.player.animation_frame = 1;
    s.player.facing = Facing::Left;
    assert_eq!(s.player.sprite_frame(), (AnimationState::Walk, 1));
    let surface = draw(&s, &Named::full());
    assert_eq!(
        surface.ops.last(),
        Some(&Op::Blit { image: "walk1".into(), x: 50, y: 400, flip: true })
    );
}

#[test]
fn jump_frames_mirror_the_other_way() {
    let mut s = make_state();
    s.player.animation = AnimationState::Jump;
    s.player.facing = Facing::Right;
    let surface = draw(&s, &Named::full());
    assert_eq!(
        surface.ops.last(),
        Some(&Op::Blit { image: "jump0".into(), x: 50, y: 400, flip: true })
    );

    s.player.facing = Facing::Left;
    let surface = draw(&s, &Named::full());
    assert_eq!(
        surface.ops.last(),
        Some(&Op::Blit { image: "jump0".into(), x: 50, y: 400, flip: false })
    );
}

#[test]
fn enemies_use_their_animation_frame() {
    let mut s = make_state();
    s.enemies.truncate(1);
    s.enemies[0].animation_frame = 2;
    s.enemies[0].direction = -1.0;
    let surface = draw(&s, &Named::full());
    let blits = surface.blits_of("enemy2");
    assert_eq!(blits.len(), 1);
    assert!(matches!(blits[0], Op::Blit { flip: true, .. }));
}

#[test]
fn angled_bullet_sprite_is_rotated() {
    let mut s = make_state();
    s.bullets.push(Bullet::new(100.0, 100.0, Facing::Right, false, 1, 0.5));
    let surface = draw(&s, &Named::full());
    assert!(surface.ops.iter().any(|op| matches!(
        op,
        Op::Rotated { image, degrees } if image == "bullet" && (*degrees + 0.5f32.to_degrees()).abs() < 1e-3
    )));
}

#[test]
fn enemy_bullets_never_use_sprites() {
    let mut s = make_state();
    s.bullets.push(Bullet::new(100.0, 100.0, Facing::Left, true, 1, 0.0));
    let surface = draw(&s, &Named::full());
    assert!(surface.blits_of("bullet").is_empty());
    assert_eq!(surface.rects_of(C_BULLET_ENEMY).len(), 1);
}

#[test]
fn missing_platform_sprite_falls_back() {
    let surface = draw(&make_state(), &Named::full());
    assert_eq!(surface.rects_of(C_PLATFORM).len(), 5);
    assert_eq!(surface.rects_of(C_BACKGROUND).len(), 1);
}
