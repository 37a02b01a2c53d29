use crate::components::{try_move, Cell, Direction, PixelPos};
use crate::constants::GHOST_SPEED;
use crate::level::Maze;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ghost {
    pub pos: PixelPos,
}

impl Ghost {
    pub fn new(pos: PixelPos) -> Self {
        Self { pos }
    }

    /// One greedy pursuit step toward `target`.
    pub fn chase(&mut self, maze: &Maze, target: PixelPos) {
        if let Some(dir) = pursuit_dir(maze, self.pos, target) {
            self.pos = try_move(maze, self.pos, dir, GHOST_SPEED);
        }
    }
}

/// Picks the open direction whose neighbouring cell is closest (Manhattan,
/// in cells) to the target's cell. Once the ghost shares the target's cell
/// every neighbour scores the same, so candidates are scored by pixel
/// distance instead. Ties go to the earlier entry of `Direction::CARDINAL`.
pub fn pursuit_dir(maze: &Maze, from: PixelPos, target: PixelPos) -> Option<Direction> {
    let here = maze.cell_at(from)?;
    let goal = maze.cell_at(target)?;
    let same_cell = here == goal;

    let mut best: Option<(Direction, usize)> = None;
    for dir in Direction::CARDINAL {
        let step = from.offset(dir, GHOST_SPEED);
        if !maze.is_passable(step) {
            continue;
        }
        let d = if same_cell {
            step.x.abs_diff(target.x) as usize + step.y.abs_diff(target.y) as usize
        } else {
            let Some(next) = neighbour(here, dir) else {
                continue;
            };
            next.manhattan(goal)
        };
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((dir, d)),
        }
    }
    best.map(|(dir, _)| dir)
}

fn neighbour(cell: Cell, dir: Direction) -> Option<Cell> {
    let (dx, dy) = dir.delta();
    let col = cell.col.checked_add_signed(dx as isize)?;
    let row = cell.row.checked_add_signed(dy as isize)?;
    Some(Cell::new(col, row))
}

/// Periodic ghost release, measured in ticks since the last release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRamp {
    interval: u64,
    last_spawn: u64,
}

impl SpawnRamp {
    pub fn new(interval: u64, start_tick: u64) -> Self {
        Self {
            interval: interval.max(1),
            last_spawn: start_tick,
        }
    }

    pub fn last_spawn(&self) -> u64 {
        self.last_spawn
    }

    /// Returns true, and restarts the interval, once `interval` ticks have
    /// passed since the previous release.
    pub fn poll(&mut self, tick: u64) -> bool {
        if tick.saturating_sub(self.last_spawn) >= self.interval {
            self.last_spawn = tick;
            true
        } else {
            false
        }
    }
}
