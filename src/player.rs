use crate::components::{try_move, Direction, PixelPos};
use crate::constants::PLAYER_SPEED;
use crate::level::Maze;

/// Directional keys held during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn only(dir: Direction) -> Self {
        let mut keys = Self::default();
        match dir {
            Direction::Up => keys.up = true,
            Direction::Down => keys.down = true,
            Direction::Left => keys.left = true,
            Direction::Right => keys.right = true,
            Direction::None => {}
        }
        keys
    }

    /// The key that steers this tick. Up beats down beats left beats right.
    pub fn steer(&self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub pos: PixelPos,
    pub facing: Direction,
    pub mouth_open: bool,
}

impl Player {
    pub fn new(pos: PixelPos) -> Self {
        Self {
            pos,
            facing: Direction::None,
            mouth_open: true,
        }
    }

    /// Applies one tick of input. The pressed key turns the player even
    /// when the step itself is blocked.
    pub fn apply_input(&mut self, maze: &Maze, keys: HeldKeys) {
        if let Some(dir) = keys.steer() {
            self.facing = dir;
            self.pos = try_move(maze, self.pos, dir, PLAYER_SPEED);
        }
    }

    pub fn toggle_mouth(&mut self) {
        self.mouth_open = !self.mouth_open;
    }
}
