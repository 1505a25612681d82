use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Prev,
    Next,
    TogglePlay,
    /// Activate the currently centered item (opens the full view)
    ActivateCenter,
    /// Activate a specific extended slot (mouse)
    ActivateSlot(usize),
    CloseOverlay,
    /// Open the fullscreen image in the system viewer
    OpenExternal,
    // Fullscreen-only navigation between logical images
    NextImage,
    PrevImage,
    // Pointer entered/left the strip region
    HoverEnter,
    HoverLeave,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if matches!(app.mode, Mode::Fullscreen { .. }) {
        return handle_fullscreen_mode(key);
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Navigation
        (KeyCode::Left, KeyModifiers::NONE) => Action::Prev,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::Prev,
        (KeyCode::Right, KeyModifiers::NONE) => Action::Next,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::Next,

        // Autoplay
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::TogglePlay,

        // Open the centered item full-size
        (KeyCode::Enter, KeyModifiers::NONE) => Action::ActivateCenter,

        // Esc clears transient state (status line); the overlay has its
        // own table below
        (KeyCode::Esc, KeyModifiers::NONE) => Action::CloseOverlay,

        _ => Action::None,
    }
}

/// Key table for the fullscreen viewer
fn handle_fullscreen_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, KeyModifiers::NONE) => Action::CloseOverlay,
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::CloseOverlay,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        // Navigate between logical images without leaving the overlay
        (KeyCode::Right, KeyModifiers::NONE) => Action::NextImage,
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::NextImage,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextImage,
        (KeyCode::Left, KeyModifiers::NONE) => Action::PrevImage,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::PrevImage,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::PrevImage,
        // Open in external viewer
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenExternal,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::OpenExternal,
        _ => Action::None,
    }
}

/// Handle a mouse event: slot clicks and hover enter/leave
pub fn handle_mouse_event(mouse: MouseEvent, app: &App) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if matches!(app.mode, Mode::Fullscreen { .. }) {
                // Clicking anywhere on the overlay closes it
                return Action::CloseOverlay;
            }
            match app.slot_at(mouse.column, mouse.row) {
                Some(ext) => Action::ActivateSlot(ext),
                None => Action::None,
            }
        }
        MouseEventKind::Moved => {
            let inside = app.in_strip(mouse.column, mouse.row);
            if inside && !app.is_hovering() {
                Action::HoverEnter
            } else if !inside && app.is_hovering() {
                Action::HoverLeave
            } else {
                Action::None
            }
        }
        _ => Action::None,
    }
}
