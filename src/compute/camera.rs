/// Horizontal scroll offset that follows the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub viewport_width: f32,
}

impl Camera {
    pub fn new(viewport_width: f32) -> Self {
        Camera { x: 0.0, viewport_width }
    }

    /// Centre on `player_x`, clamped so the viewport stays inside the level.
    /// A level narrower than the viewport pins the offset to 0.
    pub fn update(&mut self, player_x: f32, level_width: f32) {
        self.x = (player_x - self.viewport_width / 2.0)
            .min(level_width - self.viewport_width)
            .max(0.0);
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
    }
}
