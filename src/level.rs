use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::components::{Cell, PixelPos};
use crate::constants::CELL_SIZE;

const WALL: char = '#';
const OPEN: char = '.';

/// The compiled-in playfield, 12 cells wide and 11 tall.
pub const CLASSIC_LAYOUT: [&str; 11] = [
    "############",
    "#..........#",
    "#.##.#.###.#",
    "#.#..#.....#",
    "#.#.##.#.#.#",
    "#........#.#",
    "#.##.#.#.#.#",
    "#.#..#.#.#.#",
    "#.#.##.#.#.#",
    "#..........#",
    "############",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze layout has no rows")]
    Empty,
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile {glyph:?} at column {col}, row {row}")]
    UnknownTile { glyph: char, col: usize, row: usize },
    #[error("maze layout has no passable cell")]
    NoPassableCells,
    #[error("cell at column {col}, row {row} is a wall or off the grid")]
    ClosedCell { col: usize, row: usize },
}

/// Static passability table for the playfield.
#[derive(Debug, Clone)]
pub struct Maze {
    cols: usize,
    rows: usize,
    open: Vec<bool>,
    open_cells: Vec<Cell>,
}

impl Maze {
    pub fn classic() -> Result<Self, MazeError> {
        Self::from_rows(&CLASSIC_LAYOUT)
    }

    /// Builds a maze from text rows where `#` is a wall and `.` a passage.
    pub fn from_rows<S: AsRef<str>>(layout: &[S]) -> Result<Self, MazeError> {
        let first = layout.first().ok_or(MazeError::Empty)?;
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(MazeError::Empty);
        }

        let mut open = Vec::with_capacity(cols * layout.len());
        for (row, line) in layout.iter().enumerate() {
            let found = line.as_ref().chars().count();
            if found != cols {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, glyph) in line.as_ref().chars().enumerate() {
                match glyph {
                    WALL => open.push(false),
                    OPEN => open.push(true),
                    _ => return Err(MazeError::UnknownTile { glyph, col, row }),
                }
            }
        }

        let open_cells: Vec<Cell> = open
            .iter()
            .enumerate()
            .filter(|(_, passable)| **passable)
            .map(|(idx, _)| Cell::new(idx % cols, idx / cols))
            .collect();
        if open_cells.is_empty() {
            return Err(MazeError::NoPassableCells);
        }

        Ok(Self {
            cols,
            rows: layout.len(),
            open,
            open_cells,
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The cell containing `pos`, or `None` when `pos` is off the grid.
    pub fn cell_at(&self, pos: PixelPos) -> Option<Cell> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let col = (pos.x / CELL_SIZE) as usize;
        let row = (pos.y / CELL_SIZE) as usize;
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(Cell::new(col, row))
    }

    pub fn is_open(&self, cell: Cell) -> bool {
        cell.col < self.cols && cell.row < self.rows && self.open[cell.row * self.cols + cell.col]
    }

    /// Whether an entity centred on `pos` may stand there.
    pub fn is_passable(&self, pos: PixelPos) -> bool {
        self.cell_at(pos).is_some_and(|cell| self.is_open(cell))
    }

    pub fn center_of(&self, cell: Cell) -> PixelPos {
        PixelPos::new(
            cell.col as i32 * CELL_SIZE + CELL_SIZE / 2,
            cell.row as i32 * CELL_SIZE + CELL_SIZE / 2,
        )
    }

    /// Passable cells in row-major order.
    pub fn passable_cells(&self) -> &[Cell] {
        &self.open_cells
    }

    pub fn random_open_cell(&self, rng: &mut impl Rng) -> Cell {
        // open_cells is non-empty by construction
        *self
            .open_cells
            .choose(rng)
            .unwrap_or(&self.open_cells[0])
    }
}
