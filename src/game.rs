//! One play session: owns every piece of mutable game state and advances it
//! a tick at a time.

use log::{debug, info, warn};
use rand::Rng;

use crate::components::{Cell, Direction, PixelPos};
use crate::constants::{Timing, CATCH_RADIUS};
use crate::ghost::{Ghost, SpawnRamp};
use crate::level::{Maze, MazeError};
use crate::pellets::Pellets;
use crate::player::{HeldKeys, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// What changed during a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub dots_eaten: u32,
    pub dots_respawned: usize,
    pub ghost_spawned: bool,
    pub caught: bool,
}

/// Read-only view handed to the front end once per tick.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub maze: &'a Maze,
    pub player: PixelPos,
    pub facing: Direction,
    pub mouth_open: bool,
    pub ghosts: Vec<PixelPos>,
    pub dots: Vec<PixelPos>,
    pub score: u32,
    pub game_over: bool,
    pub tick: u64,
}

pub struct Game {
    maze: Maze,
    timing: Timing,
    player: Player,
    ghosts: Vec<Ghost>,
    pellets: Pellets,
    ramp: SpawnRamp,
    score: u32,
    phase: Phase,
    tick: u64,
}

impl Game {
    /// Starts a session with the player and the first ghost on random open
    /// cells.
    pub fn new(maze: Maze, timing: Timing, rng: &mut impl Rng) -> Self {
        let player = maze.random_open_cell(rng);
        let ghost = maze.random_open_cell(rng);
        Self::place(maze, timing, player, &[ghost])
    }

    /// Starts a session from fixed cells. Every cell must be open.
    pub fn with_layout(
        maze: Maze,
        timing: Timing,
        player: Cell,
        ghosts: &[Cell],
    ) -> Result<Self, MazeError> {
        if let Some(closed) = std::iter::once(&player)
            .chain(ghosts)
            .find(|c| !maze.is_open(**c))
        {
            warn!("rejecting layout: {closed:?} is not open");
            return Err(MazeError::ClosedCell {
                col: closed.col,
                row: closed.row,
            });
        }
        Ok(Self::place(maze, timing, player, ghosts))
    }

    fn place(maze: Maze, timing: Timing, player_cell: Cell, ghosts: &[Cell]) -> Self {
        let player = Player::new(maze.center_of(player_cell));
        let ghosts = ghosts
            .iter()
            .map(|c| Ghost::new(maze.center_of(*c)))
            .collect();
        let pellets = Pellets::for_maze(&maze);
        info!(
            "session start: player at {:?}, {} dots, tick rate {} Hz",
            player_cell,
            pellets.len(),
            timing.tick_hz
        );
        Self {
            ramp: SpawnRamp::new(timing.spawn_interval, 0),
            maze,
            timing,
            player,
            ghosts,
            pellets,
            score: 0,
            phase: Phase::Playing,
            tick: 0,
        }
    }

    /// Advances one tick. A finished game ignores further steps.
    pub fn step(&mut self, keys: HeldKeys, rng: &mut impl Rng) -> TickReport {
        let mut report = TickReport::default();
        if self.phase == Phase::GameOver {
            return report;
        }
        self.tick += 1;

        self.player.apply_input(&self.maze, keys);

        let target = self.player.pos;
        for ghost in &mut self.ghosts {
            ghost.chase(&self.maze, target);
        }

        report.dots_eaten = self.pellets.consume_near(self.player.pos, self.tick);
        self.score += report.dots_eaten;

        report.dots_respawned = self
            .pellets
            .respawn_due(self.tick, self.timing.respawn_delay);

        if self
            .ghosts
            .iter()
            .any(|g| g.pos.within(self.player.pos, CATCH_RADIUS))
        {
            self.phase = Phase::GameOver;
            report.caught = true;
            info!("caught at tick {} with score {}", self.tick, self.score);
        }

        if self.ramp.poll(self.tick) {
            let cell = self.maze.random_open_cell(rng);
            self.ghosts.push(Ghost::new(self.maze.center_of(cell)));
            report.ghost_spawned = true;
            debug!(
                "ghost {} released at {:?} on tick {}",
                self.ghosts.len(),
                cell,
                self.tick
            );
        }

        if self.tick % self.timing.mouth_period == 0 {
            self.player.toggle_mouth();
        }

        report
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            maze: &self.maze,
            player: self.player.pos,
            facing: self.player.facing,
            mouth_open: self.player.mouth_open,
            ghosts: self.ghosts.iter().map(|g| g.pos).collect(),
            dots: self.pellets.active().collect(),
            score: self.score,
            game_over: self.phase == Phase::GameOver,
            tick: self.tick,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn pellets(&self) -> &Pellets {
        &self.pellets
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}
