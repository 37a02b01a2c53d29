use crate::level::Maze;

/// A pixel position on the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dir: Direction, dist: i32) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx * dist,
            y: self.y + dy * dist,
        }
    }

    /// Axis-aligned proximity: both axes strictly closer than `reach`.
    pub fn within(self, other: PixelPos, reach: i32) -> bool {
        (self.x - other.x).abs() < reach && (self.y - other.y).abs() < reach
    }
}

/// A maze cell, column first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

impl Cell {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    pub fn manhattan(self, other: Cell) -> usize {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Cardinal directions in tie-break order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }
}

/// Moves `pos` by `speed` pixels toward `dir`, or leaves it where it is if
/// the destination is not passable.
pub fn try_move(maze: &Maze, pos: PixelPos, dir: Direction, speed: i32) -> PixelPos {
    let candidate = pos.offset(dir, speed);
    if maze.is_passable(candidate) {
        candidate
    } else {
        pos
    }
}
