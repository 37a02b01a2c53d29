use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::{Cell as GridCell, Direction};
use crate::game::Snapshot;

/// Terminal columns per maze cell.
pub const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Glyph {
    Player { facing: Direction, mouth_open: bool },
    Ghost,
    Wall,
    Empty,
    Dot,
}

impl Glyph {
    fn text(self) -> &'static str {
        match self {
            Glyph::Player {
                mouth_open: false, ..
            } => "● ",
            Glyph::Player { facing, .. } => match facing {
                Direction::Up => "ᗢ ",
                Direction::Down => "ᗣ ",
                Direction::Left => "ᗤ ",
                Direction::Right | Direction::None => "ᗧ ",
            },
            Glyph::Ghost => "👻",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Dot => "· ",
        }
    }

    fn color(self) -> Color {
        match self {
            Glyph::Player { .. } => Color::Yellow,
            Glyph::Ghost => Color::Red,
            Glyph::Wall => Color::Blue,
            Glyph::Empty => Color::Reset,
            Glyph::Dot => Color::White,
        }
    }
}

/// Which glyph a cell shows. The player is drawn over ghosts, ghosts over
/// dots.
pub fn glyph_at(snapshot: &Snapshot<'_>, cell: GridCell) -> Glyph {
    let maze = snapshot.maze;
    if maze.cell_at(snapshot.player) == Some(cell) {
        return Glyph::Player {
            facing: snapshot.facing,
            mouth_open: snapshot.mouth_open,
        };
    }
    if snapshot
        .ghosts
        .iter()
        .any(|g| maze.cell_at(*g) == Some(cell))
    {
        return Glyph::Ghost;
    }
    if !maze.is_open(cell) {
        return Glyph::Wall;
    }
    if snapshot.dots.iter().any(|d| maze.cell_at(*d) == Some(cell)) {
        return Glyph::Dot;
    }
    Glyph::Empty
}

/// Redraws only the cells that changed since the previous frame.
pub struct Renderer {
    last: Vec<Glyph>,
    last_hud: String,
    needs_full: bool,
    showing_game_over: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            last: vec![Glyph::Empty; cols * rows],
            last_hud: String::new(),
            needs_full: true,
            showing_game_over: false,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Forces the next frame to repaint everything.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
        self.showing_game_over = false;
    }

    pub fn draw<W: Write>(&mut self, out: &mut W, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let (term_w, term_h) = terminal::size()?;
        self.draw_sized(out, snapshot, term_w, term_h)
    }

    pub fn draw_sized<W: Write>(
        &mut self,
        out: &mut W,
        snapshot: &Snapshot<'_>,
        term_w: u16,
        term_h: u16,
    ) -> io::Result<()> {
        let cols = snapshot.maze.cols();
        let rows = snapshot.maze.rows();
        let needed_w = (cols * CELL_W) as u16;
        let needed_h = (rows + 2) as u16;

        if term_w < needed_w || term_h < needed_h {
            out.queue(MoveTo(0, 0))?;
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            out.flush()?;
            self.invalidate();
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.invalidate();
        }

        if snapshot.game_over {
            return self.draw_game_over(out, snapshot, needed_w, needed_h);
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Score: {}  Ghosts: {}  (q to quit)",
            snapshot.score,
            snapshot.ghosts.len()
        );
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for row in 0..rows {
            for col in 0..cols {
                let glyph = glyph_at(snapshot, GridCell::new(col, row));
                let idx = row * cols + col;
                if self.needs_full || glyph != self.last[idx] {
                    self.last[idx] = glyph;
                    self.draw_cell(out, col, row, glyph)?;
                }
            }
        }
        self.needs_full = false;

        out.flush()
    }

    fn draw_cell<W: Write>(&self, out: &mut W, col: usize, row: usize, glyph: Glyph) -> io::Result<()> {
        let text = glyph.text();
        let x = self.origin_x + (col * CELL_W) as u16;
        let y = self.origin_y + row as u16;
        out.queue(MoveTo(x, y))?;
        out.queue(SetForegroundColor(glyph.color()))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_game_over<W: Write>(
        &mut self,
        out: &mut W,
        snapshot: &Snapshot<'_>,
        needed_w: u16,
        needed_h: u16,
    ) -> io::Result<()> {
        if self.showing_game_over {
            return Ok(());
        }
        out.queue(Clear(ClearType::All))?;
        let banner = "GAME OVER";
        let detail = format!("Final score: {}", snapshot.score);
        let hint = "r to play again, q to quit";
        let mid_y = self.origin_y + needed_h / 2 - 1;
        for (offset, (text, color)) in [
            (banner, Color::Red),
            (detail.as_str(), Color::White),
            (hint, Color::DarkGrey),
        ]
        .into_iter()
        .enumerate()
        {
            let w = UnicodeWidthStr::width(text) as u16;
            let x = self.origin_x + needed_w.saturating_sub(w) / 2;
            out.queue(MoveTo(x, mid_y + offset as u16))?;
            out.queue(SetForegroundColor(color))?;
            out.queue(Print(text))?;
        }
        out.queue(ResetColor)?;
        out.flush()?;
        self.showing_game_over = true;
        // the board must be repainted in full if play resumes
        self.needs_full = true;
        self.last_hud.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::Timing;
    use crate::game::Game;
    use crate::level::Maze;
    use crate::player::HeldKeys;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game() -> Game {
        Game::with_layout(
            Maze::classic().unwrap(),
            Timing::default(),
            GridCell::new(1, 1),
            &[GridCell::new(10, 9)],
        )
        .unwrap()
    }

    #[test]
    fn player_and_ghost_cover_their_cells() {
        let game = game();
        let snap = game.snapshot();
        assert!(matches!(
            glyph_at(&snap, GridCell::new(1, 1)),
            Glyph::Player {
                facing: Direction::None,
                mouth_open: true
            }
        ));
        assert_eq!(glyph_at(&snap, GridCell::new(10, 9)), Glyph::Ghost);
        assert_eq!(glyph_at(&snap, GridCell::new(0, 0)), Glyph::Wall);
        assert_eq!(glyph_at(&snap, GridCell::new(2, 1)), Glyph::Dot);
    }

    #[test]
    fn eaten_dot_leaves_empty_cell() {
        let mut game = game();
        let mut rng = StdRng::seed_from_u64(3);
        game.step(HeldKeys::default(), &mut rng);
        for _ in 0..13 {
            game.step(HeldKeys::only(Direction::Right), &mut rng);
        }
        let snap = game.snapshot();
        assert_eq!(glyph_at(&snap, GridCell::new(1, 1)), Glyph::Empty);
        assert!(!snap.dots.contains(&game.maze().center_of(GridCell::new(1, 1))));
    }

    #[test]
    fn glyphs_fill_two_columns() {
        for glyph in [
            Glyph::Ghost,
            Glyph::Wall,
            Glyph::Empty,
            Glyph::Dot,
            Glyph::Player {
                facing: Direction::Left,
                mouth_open: true,
            },
        ] {
            assert!(UnicodeWidthStr::width(glyph.text()) <= CELL_W);
        }
    }

    #[test]
    fn small_terminal_gets_a_notice() {
        let game = game();
        let mut renderer = Renderer::new(12, 11);
        let mut out = Vec::new();
        renderer
            .draw_sized(&mut out, &game.snapshot(), 10, 5)
            .unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Terminal too small"));
    }

    #[test]
    fn second_frame_only_redraws_changes() {
        let mut game = game();
        let mut rng = StdRng::seed_from_u64(3);
        let mut renderer = Renderer::new(12, 11);
        let mut first = Vec::new();
        renderer
            .draw_sized(&mut first, &game.snapshot(), 80, 24)
            .unwrap();
        game.step(HeldKeys::default(), &mut rng);
        let mut second = Vec::new();
        renderer
            .draw_sized(&mut second, &game.snapshot(), 80, 24)
            .unwrap();
        assert!(second.len() < first.len());
        assert!(String::from_utf8_lossy(&first).contains("Score: 0"));
        assert!(String::from_utf8_lossy(&second).contains("Score: 1"));
    }

    #[test]
    fn game_over_banner_shows_score() {
        let mut game = Game::with_layout(
            Maze::classic().unwrap(),
            Timing::default(),
            GridCell::new(5, 5),
            &[GridCell::new(5, 5)],
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        game.step(HeldKeys::default(), &mut rng);
        let mut renderer = Renderer::new(12, 11);
        let mut out = Vec::new();
        renderer
            .draw_sized(&mut out, &game.snapshot(), 80, 24)
            .unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final score: 1"));
    }
}
