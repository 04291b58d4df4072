use crate::game::{InputEvent, InputSource, Turn};
use crate::options::{Player, Players};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use std::io;
use std::time::{Duration, Instant};

/// A game action bound to a key
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Pause,
    Turn(Player, Turn),
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('n')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('p')) | (_, KeyCode::Esc) => Some(Command::Pause),
            (_, KeyCode::Left) => Some(Command::Turn(Player::One, Turn::Left)),
            (_, KeyCode::Right) => Some(Command::Turn(Player::One, Turn::Right)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Turn(Player::Two, Turn::Left)),
            (KeyModifiers::NONE, KeyCode::Char('s')) => Some(Command::Turn(Player::Two, Turn::Right)),
            _ => None,
        }
    }
}

/// Reads game input from the terminal via crossterm
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct KeyboardInput {
    players: Players,
}

impl KeyboardInput {
    pub(crate) fn new(players: Players) -> KeyboardInput {
        KeyboardInput { players }
    }

    /// Translate a terminal event.  Returns `None` for events that are not
    /// key presses (other than losing focus, which pauses).
    fn translate(&self, event: &Event) -> Option<InputEvent> {
        if *event == Event::FocusLost {
            return Some(InputEvent::Pause);
        }
        let key = event.as_key_press_event()?;
        Some(match Command::from_key_event(key) {
            Some(Command::Quit) => InputEvent::Quit,
            Some(Command::Pause) => InputEvent::Pause,
            Some(Command::Turn(player, side)) if player.number() <= self.players.count() => {
                InputEvent::Turn(player, side)
            }
            _ => InputEvent::Other,
        })
    }
}

impl InputSource for KeyboardInput {
    fn next_event(&mut self, timeout: Option<Duration>) -> io::Result<InputEvent> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            if let Some(when) = deadline {
                let wait = when.saturating_duration_since(Instant::now());
                if wait.is_zero() || !poll(wait)? {
                    return Ok(InputEvent::Timeout);
                }
            }
            if let Some(ev) = self.translate(&read()?) {
                return Ok(ev);
            }
        }
    }
}
