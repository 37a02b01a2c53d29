//! Dot layout and the eat/respawn cycle.
//!
//! Every dot placed at session start keeps its slot for the whole session.
//! A slot is either active or eaten, never both, so the set of dots on the
//! board plus the set waiting to respawn is always the original layout.

use crate::components::PixelPos;
use crate::constants::DOT_RADIUS;
use crate::level::Maze;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Active,
    Eaten { at: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dot {
    pos: PixelPos,
    state: DotState,
}

#[derive(Debug, Clone)]
pub struct Pellets {
    dots: Vec<Dot>,
}

impl Pellets {
    /// One active dot at the centre of every passable cell.
    pub fn for_maze(maze: &Maze) -> Self {
        Self::from_positions(maze.passable_cells().iter().map(|c| maze.center_of(*c)))
    }

    pub fn from_positions(positions: impl IntoIterator<Item = PixelPos>) -> Self {
        let dots = positions
            .into_iter()
            .map(|pos| Dot {
                pos,
                state: DotState::Active,
            })
            .collect();
        Self { dots }
    }

    /// Eats every active dot within reach of `player`, stamping it with
    /// `tick`. Returns how many were eaten.
    pub fn consume_near(&mut self, player: PixelPos, tick: u64) -> u32 {
        let mut eaten = 0;
        for dot in &mut self.dots {
            if dot.state == DotState::Active && dot.pos.within(player, DOT_RADIUS) {
                dot.state = DotState::Eaten { at: tick };
                eaten += 1;
            }
        }
        eaten
    }

    /// Puts back every dot eaten at least `delay` ticks before `tick`.
    pub fn respawn_due(&mut self, tick: u64, delay: u64) -> usize {
        let mut restored = 0;
        for dot in &mut self.dots {
            if let DotState::Eaten { at } = dot.state {
                if tick.saturating_sub(at) >= delay {
                    dot.state = DotState::Active;
                    restored += 1;
                }
            }
        }
        restored
    }

    pub fn active(&self) -> impl Iterator<Item = PixelPos> + '_ {
        self.dots
            .iter()
            .filter(|d| d.state == DotState::Active)
            .map(|d| d.pos)
    }

    /// Eaten dots with the tick they were eaten on.
    pub fn pending(&self) -> impl Iterator<Item = (PixelPos, u64)> + '_ {
        self.dots.iter().filter_map(|d| match d.state {
            DotState::Eaten { at } => Some((d.pos, at)),
            DotState::Active => None,
        })
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn pending_count(&self) -> usize {
        self.dots.len() - self.active_count()
    }

    /// Size of the full layout.
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// Every layout position regardless of state, in layout order.
    pub fn layout(&self) -> impl Iterator<Item = PixelPos> + '_ {
        self.dots.iter().map(|d| d.pos)
    }
}
