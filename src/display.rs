//! Rendering layer: all terminal I/O lives here.
//!
//! The world is drawn into a `CellCanvas`, a character grid that implements
//! the core's `Surface` by scaling world units down to terminal cells. The
//! HUD and the controls hint are printed straight to the terminal around it.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use platform_shooter::compute::{GameSession, GameState, LEVEL_HEIGHT};
use platform_shooter::input::MouseState;
use platform_shooter::render::{draw_world, Rgb, Surface};

use crate::assets::{Glyph, GlyphAtlas};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_LEVEL: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_HEALTH: Color = Color::Green;
const C_HUD_SCORE: Color = Color::Blue;
const C_HUD_AMMO: Color = Color::Yellow;
const C_HUD_ENEMIES: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

const T_WHITE: Rgb = Rgb(255, 255, 255);
const T_YELLOW: Rgb = Rgb(241, 196, 15);
const T_RED: Rgb = Rgb(231, 76, 60);
const T_GREEN: Rgb = Rgb(46, 204, 113);
const T_BLUE: Rgb = Rgb(52, 152, 219);
const T_PANEL: Rgb = Rgb(26, 26, 46);
const T_EMPTY: Rgb = Rgb(44, 62, 80);

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

// ── Cell canvas ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Rgb,
}

const BLANK: Cell = Cell { ch: ' ', fg: T_WHITE, bg: T_EMPTY };

/// World-space drawing surface backed by a grid of terminal cells.
pub struct CellCanvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    /// Cells per world unit.
    scale_x: f32,
    scale_y: f32,
}

impl CellCanvas {
    pub fn new(cols: u16, rows: u16, viewport_width: f32, viewport_height: f32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        CellCanvas {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
            scale_x: cols as f32 / viewport_width,
            scale_y: rows as f32 / viewport_height,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Cell position to viewport (world-screen) coordinates.
    pub fn viewport_point(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) / self.scale_x,
            (row as f32 + 0.5) / self.scale_y,
        )
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.cells.get_mut(index)
    }

    /// Cell span covered by a world box; always at least one cell.
    fn span(&self, x: i32, y: i32, width: f32, height: f32) -> (i32, i32, i32, i32) {
        let c0 = (x as f32 * self.scale_x).floor() as i32;
        let r0 = (y as f32 * self.scale_y).floor() as i32;
        let c1 = ((x as f32 + width) * self.scale_x).ceil() as i32;
        let r1 = ((y as f32 + height) * self.scale_y).ceil() as i32;
        (c0, r0, c1.max(c0 + 1), r1.max(r0 + 1))
    }

    fn text(&mut self, col: i32, row: i32, text: &str, fg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(col + i as i32, row) {
                *cell = Cell { ch, fg, bg: T_PANEL };
            }
        }
    }

    /// Text centred horizontally, `dy` rows from the vertical middle.
    fn centered(&mut self, dy: i32, text: &str, fg: Rgb) {
        let col = (self.cols as i32 - text.chars().count() as i32) / 2;
        let row = self.rows as i32 / 2 + dy;
        self.text(col, row, text, fg);
    }

    /// Halve every colour, for overlays drawn over the frozen world.
    fn dim(&mut self) {
        let half = |c: Rgb| Rgb(c.0 / 2, c.1 / 2, c.2 / 2);
        for cell in &mut self.cells {
            cell.fg = half(cell.fg);
            cell.bg = half(cell.bg);
        }
    }

    fn flush<W: Write>(&self, out: &mut W, top: u16) -> std::io::Result<()> {
        for (row, line) in self.cells.chunks(self.cols as usize).enumerate() {
            out.queue(cursor::MoveTo(0, top + row as u16))?;
            let mut last: Option<(Rgb, Rgb)> = None;
            for cell in line {
                if last != Some((cell.fg, cell.bg)) {
                    out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                    out.queue(style::SetBackgroundColor(to_color(cell.bg)))?;
                    last = Some((cell.fg, cell.bg));
                }
                out.queue(Print(cell.ch))?;
            }
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

impl Surface for CellCanvas {
    type Image = Glyph;

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb) {
        let (c0, r0, c1, r1) = self.span(x, y, width as f32, height as f32);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = Cell { ch: ' ', fg: color, bg: color };
                }
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgb) {
        let r = radius as i32;
        let (c0, r0, c1, r1) = self.span(cx - r, cy - r, 2.0 * r as f32, 2.0 * r as f32);
        let (mid_x, mid_y) = ((c0 + c1) as f32 / 2.0, (r0 + r1) as f32 / 2.0);
        let (rx, ry) = (((c1 - c0) as f32 / 2.0).max(0.5), ((r1 - r0) as f32 / 2.0).max(0.5));
        for row in r0..r1 {
            for col in c0..c1 {
                let dx = (col as f32 + 0.5 - mid_x) / rx;
                let dy = (row as f32 + 0.5 - mid_y) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    if let Some(cell) = self.cell_mut(col, row) {
                        cell.bg = color;
                    }
                }
            }
        }
    }

    fn blit(&mut self, image: &Glyph, x: i32, y: i32, flip_x: bool) {
        let ch = if flip_x { image.mirrored } else { image.ch };
        let (c0, r0, c1, r1) = self.span(x, y, image.width, image.height);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.ch = ch;
                    cell.fg = image.color;
                }
            }
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: HUD on row 0, the canvas below it, controls
/// hint on the last row.
pub fn render<W: Write>(
    out: &mut W,
    canvas: &mut CellCanvas,
    session: &GameSession,
    atlas: &GlyphAtlas,
    mouse: &MouseState,
    show_help: bool,
) -> std::io::Result<()> {
    canvas.clear();

    match session.state {
        GameState::Loading => draw_loading(canvas, session, atlas),
        GameState::Menu => {
            draw_menu(canvas);
            if show_help {
                draw_help(canvas);
            }
        }
        GameState::Playing => {
            draw_world(session, canvas, atlas, LEVEL_HEIGHT as u32);
            draw_crosshair(canvas, mouse);
        }
        GameState::Paused => {
            draw_world(session, canvas, atlas, LEVEL_HEIGHT as u32);
            canvas.dim();
            canvas.centered(-1, "PAUSED", T_YELLOW);
            canvas.centered(1, "PRESS P TO CONTINUE", T_WHITE);
        }
        GameState::GameOver => {
            draw_world(session, canvas, atlas, LEVEL_HEIGHT as u32);
            canvas.dim();
            canvas.centered(-2, "GAME OVER", T_RED);
            canvas.centered(0, &format!("FINAL SCORE: {}", session.score), T_WHITE);
            canvas.centered(1, &format!("LEVEL: {}", session.level), T_WHITE);
            canvas.centered(3, "PRESS ESC FOR MENU", T_WHITE);
        }
        GameState::Win => {
            draw_world(session, canvas, atlas, LEVEL_HEIGHT as u32);
            canvas.dim();
            canvas.centered(-3, "VICTORY!", T_GREEN);
            canvas.centered(-1, &format!("FINAL SCORE: {}", session.score), T_WHITE);
            canvas.centered(0, &format!("LIVES: {}", session.lives), T_WHITE);
            canvas.centered(1, &format!("LEVELS: {}", session.settings.max_level), T_WHITE);
            canvas.centered(3, "PRESS ESC FOR MENU", T_WHITE);
        }
        GameState::LevelComplete => {
            draw_world(session, canvas, atlas, LEVEL_HEIGHT as u32);
            canvas.dim();
            canvas.centered(-2, "LEVEL COMPLETE!", T_GREEN);
            canvas.centered(0, &format!("SCORE: {}", session.score), T_YELLOW);
            canvas.centered(1, &format!("LIVES: {}", session.lives), T_YELLOW);
            canvas.centered(3, "PRESS ANY KEY TO CONTINUE", T_WHITE);
        }
    }

    draw_hud(out, session)?;
    canvas.flush(out, 1)?;
    draw_controls_hint(out, canvas.size().1 + 1)?;
    out.flush()?;
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_loading(canvas: &mut CellCanvas, session: &GameSession, atlas: &GlyphAtlas) {
    let label = match session.awaiting_level_assets() {
        Some(level) => format!("LOADING LEVEL {level}..."),
        None => "LOADING...".to_string(),
    };
    canvas.centered(-1, &label, T_WHITE);
    if atlas.loaded > 0 {
        canvas.centered(1, &format!("{} images cached", atlas.loaded), T_BLUE);
    }
}

fn draw_menu(canvas: &mut CellCanvas) {
    canvas.centered(-4, "=== CONTRA ===", T_YELLOW);
    canvas.centered(-1, "[ENTER]  INSERT COIN", T_RED);
    canvas.centered(1, "[H]  HOW TO PLAY", T_BLUE);
    canvas.centered(3, "[Q]  QUIT", T_WHITE);
}

fn draw_help(canvas: &mut CellCanvas) {
    canvas.dim();
    let lines = [
        ("HOW TO PLAY", T_BLUE),
        ("", T_WHITE),
        ("<- -> / A D: MOVE", T_WHITE),
        ("SPACE / W / UP: JUMP", T_WHITE),
        ("MOUSE: AIM", T_WHITE),
        ("LEFT CLICK: SHOOT", T_WHITE),
        ("P: PAUSE   ESC: MENU", T_WHITE),
        ("DESTROY ALL ENEMIES!", T_YELLOW),
        ("", T_WHITE),
        ("[H] BACK", T_RED),
    ];
    let top = -(lines.len() as i32) / 2;
    for (i, (line, color)) in lines.iter().enumerate() {
        canvas.centered(top + i as i32, line, *color);
    }
}

fn draw_crosshair(canvas: &mut CellCanvas, mouse: &MouseState) {
    let col = (mouse.x * canvas.scale_x) as i32;
    let row = (mouse.y * canvas.scale_y) as i32;
    if let Some(cell) = canvas.cell_mut(col, row) {
        cell.ch = '+';
        cell.fg = T_WHITE;
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;

    let hud = session.hud();
    let fields = [
        (format!(" LEVEL: {}", hud.level), C_HUD_LEVEL),
        (format!("  LIVES: {}", hud.lives), C_HUD_LIVES),
        (format!("  HEALTH: {}", hud.health), C_HUD_HEALTH),
        (format!("  SCORE: {:06}", hud.score), C_HUD_SCORE),
        (format!("  AMMO: {}", hud.ammo), C_HUD_AMMO),
        (format!("  ENEMIES: {}", hud.enemies), C_HUD_ENEMIES),
    ];
    for (text, color) in fields {
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(" A/D move  SPACE jump  mouse aim+shoot  P pause  ESC menu  Q quit"))?;
    out.queue(style::ResetColor)?;
    Ok(())
}
