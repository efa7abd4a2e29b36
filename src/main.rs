mod assets;
mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal, ExecutableCommand, QueueableCommand,
};
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use platform_shooter::compute::{
    apply_command, assets_loaded, tick, FrameEvent, GameSession, GameState, LEVEL_HEIGHT,
};
use platform_shooter::config::{ConfigSource, GameConfig};
use platform_shooter::input::{Command, InputSnapshot, MouseState};
use platform_shooter::render::ResourceProvider;

use assets::GlyphAtlas;
use display::CellCanvas;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const JUMP_KEYS: [KeyCode; 4] = [
    KeyCode::Char(' '),
    KeyCode::Up,
    KeyCode::Char('w'),
    KeyCode::Char('W'),
];

/// One-shot command for a key press in the given state.
fn command_for(code: KeyCode, modifiers: KeyModifiers, state: GameState) -> Option<Command> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') if state != GameState::Playing => {
            Some(Command::Quit)
        }
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P')
            if state == GameState::LevelComplete =>
        {
            None
        }
        _ if state == GameState::LevelComplete => Some(Command::Continue),
        KeyCode::Enter => Some(Command::Start),
        KeyCode::Esc => Some(Command::Escape),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::Help),
        _ => None,
    }
}

/// Events worth a terminal bell.
fn rings_bell(events: &[FrameEvent]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            FrameEvent::LifeLost { .. } | FrameEvent::GameOver { .. } | FrameEvent::Won { .. }
        )
    })
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so log lines go to a file. `RUST_LOG`
/// overrides the default `info` filter.
fn init_logging(config: &GameConfig) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("creating log file {}", config.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Keyboard state uses a `key_frame` map holding the frame each key was last
/// seen (press or repeat); keys within `HOLD_WINDOW` frames count as held, so
/// movement, jumping and shooting combine freely. The mouse is tracked from
/// press, release, drag and move events.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (cols, rows) = terminal::size()?;
    let mut canvas = CellCanvas::new(
        cols,
        rows.saturating_sub(2),
        config.viewport_width,
        LEVEL_HEIGHT,
    );

    let mut session = GameSession::new(config.session_settings());
    let mut atlas = GlyphAtlas::new();
    atlas.reload_for_level(session.level);

    let frame_time = Duration::from_millis(config.frame_ms.max(1));
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut mouse = MouseState::default();
    let mut show_help = false;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut commands = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        commands.extend(command_for(code, modifiers, session.state));
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    // Row 0 is the HUD.
                    let (x, y) = canvas.viewport_point(column, row.saturating_sub(1));
                    mouse.x = x;
                    mouse.y = y;
                    match kind {
                        MouseEventKind::Down(MouseButton::Left)
                        | MouseEventKind::Drag(MouseButton::Left) => mouse.left_down = true,
                        MouseEventKind::Up(MouseButton::Left) => mouse.left_down = false,
                        _ => {}
                    }
                }
                Event::Resize(cols, rows) => {
                    debug!("terminal resized to {cols}x{rows}");
                    canvas = CellCanvas::new(
                        cols,
                        rows.saturating_sub(2),
                        config.viewport_width,
                        LEVEL_HEIGHT,
                    );
                }
                _ => {}
            }
        }

        // ── One-shot commands ─────────────────────────────────────────────────
        for command in commands {
            match command {
                Command::Quit => {
                    info!("quit requested");
                    return Ok(());
                }
                Command::Help if session.state == GameState::Menu => show_help = !show_help,
                _ => {
                    let was = session.state;
                    session = apply_command(&session, command, atlas.is_ready());
                    if session.state != was {
                        show_help = false;
                    }
                    if let Some(level) = session.awaiting_level_assets() {
                        if was != GameState::Loading {
                            atlas.reload_for_level(level);
                        }
                    }
                }
            }
        }

        if atlas.poll_loaded().is_some() {
            session = assets_loaded(&session);
        }

        // ── Simulation ────────────────────────────────────────────────────────
        let input = InputSnapshot {
            left: any_held(&key_frame, &LEFT_KEYS, frame),
            right: any_held(&key_frame, &RIGHT_KEYS, frame),
            jump: any_held(&key_frame, &JUMP_KEYS, frame),
            mouse,
        };
        session = tick(&session, &input, &mut rng);
        for event in &session.events {
            debug!("frame {}: {event:?}", session.frame);
        }
        if rings_bell(&session.events) {
            out.queue(Print('\x07'))?;
        }

        display::render(out, &mut canvas, &session, &atlas, &mouse, show_help)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let (config, source) = GameConfig::discover()?;
    init_logging(&config)?;
    match &source {
        ConfigSource::Env(path) | ConfigSource::Local(path) => {
            info!("config loaded from {}", path.display())
        }
        ConfigSource::Defaults => info!("no config file found, using defaults"),
    }
    info!("starting with {config:?}");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Terminals without the kitty protocol fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &config, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("exiting with error: {err:#}");
    }
    result
}
