//! Maze chase: a terminal arcade game where a player eats dots in a fixed
//! maze while a growing pack of ghosts hunts them down.
//!
//! - `level`: the maze and its passability oracle
//! - `components`: positions, directions and the shared motion rule
//! - `player`, `ghost`, `pellets`: the moving parts of a session
//! - `game`: the tick-by-tick session
//! - `input`, `render`, `screen`, `config`: the terminal front end

pub mod components;
pub mod config;
pub mod constants;
pub mod game;
pub mod ghost;
pub mod input;
pub mod level;
pub mod pellets;
pub mod player;
pub mod render;
pub mod screen;

pub use components::{Cell, Direction, PixelPos};
pub use config::{Config, ConfigError};
pub use constants::Timing;
pub use game::{Game, Phase, Snapshot, TickReport};
pub use level::{Maze, MazeError};
pub use player::HeldKeys;
