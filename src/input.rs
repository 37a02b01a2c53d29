use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::components::Direction;
use crate::player::HeldKeys;

/// What a key press asks the front end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Restart,
    Quit,
}

pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Steer(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Steer(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Steer(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Steer(Direction::Right)),
        _ => None,
    }
}

/// Terminals only report presses and auto-repeats, so a key counts as held
/// while its last press is younger than the hold window.
#[derive(Debug, Clone)]
pub struct KeyLatch {
    hold: Duration,
    last_seen: [Option<Instant>; 4],
}

impl KeyLatch {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            last_seen: [None; 4],
        }
    }

    pub fn press(&mut self, dir: Direction, at: Instant) {
        if let Some(idx) = slot(dir) {
            self.last_seen[idx] = Some(at);
        }
    }

    pub fn clear(&mut self) {
        self.last_seen = [None; 4];
    }

    pub fn held(&self, now: Instant) -> HeldKeys {
        let live = |idx: usize| {
            self.last_seen[idx].is_some_and(|t| now.saturating_duration_since(t) <= self.hold)
        };
        HeldKeys {
            up: live(0),
            down: live(1),
            left: live(2),
            right: live(3),
        }
    }
}

fn slot(dir: Direction) -> Option<usize> {
    match dir {
        Direction::Up => Some(0),
        Direction::Down => Some(1),
        Direction::Left => Some(2),
        Direction::Right => Some(3),
        Direction::None => None,
    }
}
