//! Raw-mode, alternate-screen session for the terminal front end.

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::warn;

/// Owns the terminal while the game runs. Dropping it restores the cursor,
/// the main screen and cooked mode, even when setup stopped halfway.
pub struct ScreenGuard<W: Write> {
    out: W,
    raw_mode: bool,
}

impl<W: Write> ScreenGuard<W> {
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self {
            out,
            raw_mode: true,
        };
        guard.out.execute(EnterAlternateScreen)?;
        guard.out.execute(Hide)?;
        Ok(guard)
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for ScreenGuard<W> {
    fn drop(&mut self) {
        // every step is attempted even if an earlier one failed
        if let Err(err) = self.out.execute(Show) {
            warn!("could not show the cursor: {err}");
        }
        if let Err(err) = self.out.execute(LeaveAlternateScreen) {
            warn!("could not leave the alternate screen: {err}");
        }
        if self.raw_mode {
            if let Err(err) = terminal::disable_raw_mode() {
                warn!("could not leave raw mode: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_CURSOR: &str = "\x1b[?25h";
    const LEAVE_ALT_SCREEN: &str = "\x1b[?1049l";

    /// Rejects the first write, then records everything.
    struct FlakyWriter {
        failed: bool,
        written: Vec<u8>,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
            }
            self.written.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn drop_restores_cursor_and_main_screen() {
        let mut out = Vec::new();
        drop(ScreenGuard {
            out: &mut out,
            raw_mode: false,
        });
        let text = String::from_utf8_lossy(&out);
        let show = text.find(SHOW_CURSOR).unwrap();
        let leave = text.find(LEAVE_ALT_SCREEN).unwrap();
        assert!(show < leave);
    }

    #[test]
    fn failed_step_does_not_skip_the_rest() {
        let mut out = FlakyWriter {
            failed: false,
            written: Vec::new(),
        };
        drop(ScreenGuard {
            out: &mut out,
            raw_mode: false,
        });
        let text = String::from_utf8_lossy(&out.written);
        assert!(!text.contains(SHOW_CURSOR));
        assert!(text.contains(LEAVE_ALT_SCREEN));
    }
}
