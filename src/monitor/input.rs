//! Key bindings for the dashboard.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::channel::Channel;

/// Input action resulting from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Show the given channel.
    Select(Channel),
    /// Switch to the other channel.
    ToggleChannel,
    /// Run a tick now instead of waiting for the interval.
    Refresh,
    /// Toggle help.
    Help,
    /// No action.
    None,
}

/// Maps key events to actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Handles a key event and returns the corresponding action.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> Action {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') | KeyCode::Char('q') => Action::Quit,
                _ => Action::None,
            };
        }

        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

            KeyCode::Char('d') => Action::Select(Channel::Day),
            KeyCode::Char('n') => Action::Select(Channel::Night),
            KeyCode::Char('t') | KeyCode::Tab => Action::ToggleChannel,

            KeyCode::Char('r') | KeyCode::F(5) => Action::Refresh,

            KeyCode::Char('?') | KeyCode::F(1) => Action::Help,

            _ => Action::None,
        }
    }
}
