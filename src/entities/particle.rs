use rand::Rng;

/// Frames a particle stays alive.
pub const PARTICLE_LIFETIME: u32 = 30;

/// Decorative explosion debris. Never takes part in collision.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub life: u32,
    /// Base colour, fixed at creation.
    pub color: (u8, u8, u8),
}

impl Particle {
    /// Spawn at `(x, y)` with a random drift, size and warm explosion colour.
    pub fn spawn(x: f32, y: f32, rng: &mut impl Rng) -> Self {
        let hue = rng.gen_range(0..=60);
        Particle {
            x,
            y,
            vx: rng.gen_range(-2.0..2.0),
            vy: rng.gen_range(-2.0..2.0),
            size: rng.gen_range(1.0..4.0),
            life: PARTICLE_LIFETIME,
            color: hsv_to_rgb(hue, 1.0, 1.0),
        }
    }

    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Base colour darkened linearly by remaining life.
    pub fn faded_color(&self) -> (u8, u8, u8) {
        let alpha = self.life as f32 / PARTICLE_LIFETIME as f32;
        let (r, g, b) = self.color;
        (
            (r as f32 * alpha) as u8,
            (g as f32 * alpha) as u8,
            (b as f32 * alpha) as u8,
        )
    }
}

/// HSV to 8-bit RGB. `hue` in degrees (wrapped to 0..360), `s` and `v` in 0..=1.
pub fn hsv_to_rgb(hue: u32, s: f32, v: f32) -> (u8, u8, u8) {
    let h = hue % 360;
    let c = v * s;
    let x = c * (1.0 - ((h as f32 / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h {
        0..=59 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}
