use std::io::{Stdout, Write};

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use terminal_size::{Width, terminal_size};

use crate::ports::ProgressPort;

const BAR_SIZE: usize = 40;
const COMPLETE_CHAR: char = '\u{2588}';
const INCOMPLETE_CHAR: char = '\u{2591}';

/// Single-line progress bar redrawn in place on stdout.
pub struct TerminalProgressBar {
    out: Stdout,
    total: usize,
    active: bool,
}

impl TerminalProgressBar {
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: std::io::stdout(),
            total: 0,
            active: false,
        }
    }

    fn draw(&mut self, current: usize, context: &str) {
        let width = match terminal_size() {
            Some((Width(w), _)) => usize::from(w),
            None => 80,
        };
        let line = render_line(current, self.total, context, width);
        // Drawing errors only cost us the bar, never the upload
        let _ = write!(self.out, "\r{line}");
        let _ = execute!(self.out, Clear(ClearType::UntilNewLine));
        let _ = self.out.flush();
    }
}

impl Default for TerminalProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressPort for TerminalProgressBar {
    fn start(&mut self, total: usize) {
        self.total = total;
        self.active = true;
        let _ = execute!(self.out, cursor::Hide);
        self.draw(0, "Starting...");
    }

    fn update(&mut self, current: usize, context: &str) {
        if self.active {
            self.draw(current, context);
        }
    }

    fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = writeln!(self.out);
        let _ = execute!(self.out, cursor::Show);
    }
}

impl Drop for TerminalProgressBar {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Progress sink used when output is quiet.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenProgress;

impl ProgressPort for HiddenProgress {
    fn start(&mut self, _total: usize) {}
    fn update(&mut self, _current: usize, _context: &str) {}
    fn stop(&mut self) {}
}

/// Format `Progress | {bar} | {percentage}% | {context}`, cut to `max_width` chars.
#[must_use]
pub fn render_line(current: usize, total: usize, context: &str, max_width: usize) -> String {
    let current = current.min(total);
    let (filled, percentage) = if total == 0 {
        (BAR_SIZE, 100)
    } else {
        (BAR_SIZE * current / total, 100 * current / total)
    };

    let bar: String = std::iter::repeat_n(COMPLETE_CHAR, filled)
        .chain(std::iter::repeat_n(INCOMPLETE_CHAR, BAR_SIZE - filled))
        .collect();

    let line = format!("Progress | {bar} | {percentage}% | {context}");
    line.chars().take(max_width.max(1)).collect()
}
