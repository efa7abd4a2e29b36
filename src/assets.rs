//! Terminal asset provider. "Images" are coloured glyphs sized in world
//! units; each level gets its own palette, built on a loader thread and
//! handed back over a channel.

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};

use platform_shooter::entities::{
    BULLET_HEIGHT, BULLET_WIDTH, ENEMY_HEIGHT, ENEMY_WIDTH, PICKUP_SIZE, PLAYER_HEIGHT,
    PLAYER_WIDTH,
};
use platform_shooter::render::{AnimationKey, ResourceProvider, Rgb, SpriteKey};

/// A coloured character stamped over a world-sized box.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub ch: char,
    /// Shown instead of `ch` when drawn mirrored.
    pub mirrored: char,
    pub color: Rgb,
    pub width: f32,
    pub height: f32,
}

impl Glyph {
    fn new(ch: char, mirrored: char, color: Rgb, width: f32, height: f32) -> Self {
        Glyph { ch, mirrored, color, width, height }
    }
}

#[derive(Default)]
struct GlyphSet {
    sprites: HashMap<SpriteKey, Glyph>,
    animations: HashMap<AnimationKey, Vec<Glyph>>,
}

impl GlyphSet {
    fn len(&self) -> usize {
        self.sprites.len() + self.animations.values().map(Vec::len).sum::<usize>()
    }
}

// ── Per-level palettes ────────────────────────────────────────────────────────

fn enemy_color(level: u32) -> Rgb {
    match level {
        1 => Rgb(0, 200, 0),
        2 => Rgb(170, 60, 220),
        _ => Rgb(255, 140, 0),
    }
}

/// Platforms and the background are left out on purpose so they take the
/// flat-colour fallback path.
fn build_glyphs(level: u32) -> GlyphSet {
    let player = Rgb(233, 69, 96);
    let mut set = GlyphSet::default();

    set.sprites.insert(
        SpriteKey::PlayerIdle,
        Glyph::new('@', '@', player, PLAYER_WIDTH, PLAYER_HEIGHT),
    );
    set.sprites.insert(
        SpriteKey::Bullet,
        Glyph::new('*', '*', Rgb(255, 255, 0), BULLET_WIDTH, BULLET_HEIGHT),
    );
    set.sprites.insert(
        SpriteKey::Health,
        Glyph::new('+', '+', Rgb(255, 60, 60), PICKUP_SIZE, PICKUP_SIZE),
    );
    set.sprites.insert(
        SpriteKey::Ammo,
        Glyph::new('=', '=', Rgb(255, 220, 0), PICKUP_SIZE, PICKUP_SIZE),
    );

    set.animations.insert(
        AnimationKey::PlayerWalk,
        vec![
            Glyph::new('>', '<', player, PLAYER_WIDTH, PLAYER_HEIGHT),
            Glyph::new(')', '(', player, PLAYER_WIDTH, PLAYER_HEIGHT),
        ],
    );
    set.animations.insert(
        AnimationKey::PlayerJump,
        vec![
            Glyph::new('^', '^', player, PLAYER_WIDTH, PLAYER_HEIGHT),
            Glyph::new('A', 'A', player, PLAYER_WIDTH, PLAYER_HEIGHT),
        ],
    );
    let enemy = enemy_color(level);
    set.animations.insert(
        AnimationKey::EnemyWalk,
        ['M', 'W', 'M', 'W']
            .iter()
            .map(|&ch| Glyph::new(ch, ch, enemy, ENEMY_WIDTH, ENEMY_HEIGHT))
            .collect(),
    );
    set
}

// ── Provider ──────────────────────────────────────────────────────────────────

pub struct GlyphAtlas {
    current: GlyphSet,
    ready: bool,
    /// Glyph count of the last completed load, for the loading screen.
    pub loaded: usize,
    tx: mpsc::Sender<(u32, GlyphSet)>,
    rx: mpsc::Receiver<(u32, GlyphSet)>,
}

impl GlyphAtlas {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        GlyphAtlas {
            current: GlyphSet::default(),
            ready: false,
            loaded: 0,
            tx,
            rx,
        }
    }
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceProvider for GlyphAtlas {
    type Image = Glyph;

    fn sprite(&self, key: SpriteKey) -> Option<&Glyph> {
        self.current.sprites.get(&key)
    }

    fn animation_frames(&self, key: AnimationKey) -> &[Glyph] {
        self.current
            .animations
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn reload_for_level(&mut self, level: u32) {
        info!("loading glyphs for level {level}");
        self.ready = false;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let set = build_glyphs(level);
            if tx.send((level, set)).is_err() {
                debug!("atlas dropped before level {level} finished loading");
            }
        });
    }

    fn poll_loaded(&mut self) -> Option<u32> {
        match self.rx.try_recv() {
            Ok((level, set)) => {
                self.loaded = set.len();
                self.current = set;
                self.ready = true;
                info!("level {level} glyphs ready ({} images)", self.loaded);
                Some(level)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                warn!("asset channel closed");
                None
            }
        }
    }
}
