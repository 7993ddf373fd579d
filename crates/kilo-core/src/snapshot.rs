//! Screen snapshot: everything a display surface needs to draw one frame.

use std::time::Instant;

use crate::editor::Editor;
use crate::highlight::{Highlight, is_printable};

/// Version shown on the welcome line.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One drawn cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Render byte.
    pub ch: u8,
    /// Classification, with the match overlay applied.
    pub hl: Highlight,
}

impl Cell {
    fn plain(ch: u8) -> Self {
        Self {
            ch,
            hl: Highlight::Normal,
        }
    }

    /// Character to draw: `'?'` for non-printable bytes.
    pub fn glyph(&self) -> char {
        if !is_printable(self.ch) {
            '?'
        } else {
            char::from(self.ch)
        }
    }
}

/// A frame of the editor: text area, status bar, message bar and cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenSnapshot {
    /// One entry per text area row, at most `screen_cols` cells each.
    pub lines: Vec<Vec<Cell>>,
    /// Left part of the status bar.
    pub status_left: String,
    /// Right part of the status bar.
    pub status_right: String,
    /// Message bar text, if a message is still fresh.
    pub message: Option<String>,
    /// Cursor position within the text area as `(row, col)`.
    pub cursor: (usize, usize),
}

fn truncate_str(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn welcome_line(cols: usize) -> Vec<Cell> {
    let text = format!("Kilo editor -- version {VERSION}");
    let text = truncate_str(&text, cols);
    let mut padding = (cols - text.len()) / 2;
    let mut line = Vec::with_capacity(cols);
    if padding > 0 {
        line.push(Cell::plain(b'~'));
        padding -= 1;
    }
    line.extend(std::iter::repeat_n(Cell::plain(b' '), padding));
    line.extend(text.bytes().map(Cell::plain));
    line
}

impl Editor {
    /// Snapshot of the current frame.
    pub fn snapshot(&self) -> ScreenSnapshot {
        self.snapshot_at(Instant::now())
    }

    /// Snapshot of the frame as it should look at `now`.
    pub fn snapshot_at(&self, now: Instant) -> ScreenSnapshot {
        let buffer = self.buffer();
        let cursor = self.cursor();
        let rows = cursor.screen_rows();
        let cols = cursor.screen_cols();

        let mut lines = Vec::with_capacity(rows);
        for y in 0..rows {
            let file_row = cursor.row_offset() + y;
            let Some(row) = buffer.row(file_row) else {
                if buffer.is_empty() && y == rows / 3 {
                    lines.push(welcome_line(cols));
                } else {
                    lines.push(vec![Cell::plain(b'~')]);
                }
                continue;
            };
            let hl = buffer.display_highlight(file_row).unwrap_or_default();
            let line = row
                .render()
                .iter()
                .zip(hl.iter())
                .skip(cursor.col_offset())
                .take(cols)
                .map(|(&ch, &hl)| Cell { ch, hl })
                .collect();
            lines.push(line);
        }

        let name = buffer
            .filename()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "[No Name]".to_string());
        let status_left = format!(
            "{} - {} lines {}",
            truncate_str(&name, 20),
            buffer.len(),
            if buffer.is_dirty() { "(modified)" } else { "" }
        );
        let status_right = format!("{}/{}", cursor.row() + 1, buffer.len());

        ScreenSnapshot {
            lines,
            status_left,
            status_right,
            message: self
                .status()
                .visible_at(now, self.config().status_timeout)
                .map(str::to_string),
            cursor: cursor.screen_position(buffer),
        }
    }
}
