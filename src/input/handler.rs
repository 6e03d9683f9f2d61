use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKey {
    /// A key the engine understands
    Game(Key),
    Quit,
    Ignored,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> HostKey {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return HostKey::Quit;
        }

        match key.code {
            KeyCode::Char(' ') => HostKey::Game(Key::Space),
            KeyCode::Up => HostKey::Game(Key::ArrowUp),
            KeyCode::Down => HostKey::Game(Key::ArrowDown),
            KeyCode::Left => HostKey::Game(Key::ArrowLeft),
            KeyCode::Right => HostKey::Game(Key::ArrowRight),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => HostKey::Quit,

            _ => HostKey::Ignored,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
