use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use maze_chase::input::{command_for, Command, KeyLatch};
use maze_chase::render::Renderer;
use maze_chase::screen::ScreenGuard;
use maze_chase::{Config, Game, Maze, Timing};

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::from_env().context("reading settings from the environment")?;
    let maze = Maze::classic().context("building the maze")?;

    let mut screen = ScreenGuard::enter(io::stdout()).context("preparing the terminal")?;
    run(screen.out(), &config, maze)
}

fn run<W: Write>(out: &mut W, config: &Config, maze: Maze) -> Result<()> {
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("rng seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let timing = Timing::from_tick_rate(config.tick_hz);
    let mut renderer = Renderer::new(maze.cols(), maze.rows());
    let mut game = Game::new(maze.clone(), timing, &mut rng);
    let mut latch = KeyLatch::new(config.hold);
    let tick_time = config.tick_time();
    let frame_time = config.frame_time();
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => match command_for(&key) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Restart) if game.is_over() => {
                        game = Game::new(maze.clone(), timing, &mut rng);
                        latch.clear();
                        renderer.invalidate();
                        last_tick = Instant::now();
                    }
                    Some(Command::Steer(dir)) => latch.press(dir, Instant::now()),
                    _ => {}
                },
                Event::Resize(..) => renderer.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_time {
            last_tick += tick_time;
            // after a long stall, resync rather than replaying missed ticks
            if last_tick.elapsed() >= tick_time {
                warn!("tick loop fell behind, resyncing");
                last_tick = Instant::now();
            }
            let report = game.step(latch.held(Instant::now()), &mut rng);
            if report.dots_eaten > 0 || report.dots_respawned > 0 {
                trace!(
                    "tick {}: ate {}, respawned {}",
                    game.tick(),
                    report.dots_eaten,
                    report.dots_respawned
                );
            }
        }

        renderer
            .draw(out, &game.snapshot())
            .context("drawing the frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
