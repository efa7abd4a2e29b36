//! Input as the simulation sees it: a per-tick snapshot of held controls,
//! plus discrete commands that drive menu and pause transitions.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseState {
    /// Pointer position in viewport coordinates.
    pub x: f32,
    pub y: f32,
    /// Primary button currently held.
    pub left_down: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    /// Any of the jump keys.
    pub jump: bool,
    pub mouse: MouseState,
}

impl InputSnapshot {
    /// Snapshot with nothing held.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// One-shot user actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Begin a new session from the menu.
    Start,
    TogglePause,
    Escape,
    /// Any key on the level-complete screen.
    Continue,
    /// Show or hide the how-to-play overlay (menu only).
    Help,
    Quit,
}
