//! Key bindings and the non-blocking keyboard source.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Player command decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Quit,
}

/// Yields at most one pending command per call without waiting.
pub trait InputSource {
    fn poll_command(&mut self) -> Result<Option<Command>>;
}

/// Map key event to command. WASD and arrow keys; anything else is ignored.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    let KeyEvent {
        code, modifiers, ..
    } = key;
    if modifiers == KeyModifiers::CONTROL {
        return match code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }
    if !modifiers.is_empty() && modifiers != KeyModifiers::SHIFT {
        return None;
    }
    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Left | KeyCode::Char('a') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::SoftDrop),
        KeyCode::Up | KeyCode::Char('w') => Some(Command::Rotate),
        _ => None,
    }
}

/// The command for one tick out of everything queued since the last one.
/// Only the first key press counts; releases, repeats and non-key events are
/// skipped, and an unbound first press yields nothing.
pub fn first_command(events: impl IntoIterator<Item = Event>) -> Option<Command> {
    events
        .into_iter()
        .find_map(|event| match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
            _ => None,
        })
        .and_then(key_to_command)
}

/// Crossterm keyboard. Drains the whole queue each poll so stale input
/// never carries into the next tick.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn poll_command(&mut self) -> Result<Option<Command>> {
        let mut pending = Vec::new();
        while event::poll(Duration::ZERO)? {
            pending.push(event::read()?);
        }
        Ok(first_command(pending))
    }
}
