//! Cursor and viewport.
//!
//! The cursor is tracked as a buffer position (`row`, `col` in raw bytes) plus scroll offsets.
//! The row offset counts rows; the column offset counts render cells, so horizontal scrolling
//! stays aligned on rows with tabs. The row may be `buffer.len()`: the virtual empty line past the
//! end of the document.

use crate::buffer::Buffer;

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// One column left, wrapping to the end of the previous row.
    Left,
    /// One column right, wrapping to the start of the next row.
    Right,
    /// One row up.
    Up,
    /// One row down.
    Down,
}

/// Cursor position and scroll offsets over a text area of `screen_rows` x `screen_cols`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    row: usize,
    col: usize,
    row_offset: usize,
    col_offset: usize,
    screen_rows: usize,
    screen_cols: usize,
}

fn row_len(buffer: &Buffer, row: usize) -> usize {
    buffer.row(row).map_or(0, |r| r.len())
}

impl Cursor {
    /// Cursor at the document start.
    pub fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            row: 0,
            col: 0,
            row_offset: 0,
            col_offset: 0,
            screen_rows: screen_rows.max(1),
            screen_cols: screen_cols.max(1),
        }
    }

    /// Buffer row.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Raw column within the row.
    pub fn col(&self) -> usize {
        self.col
    }

    /// `(row, col)` in buffer space.
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// First buffer row on screen.
    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// First render column on screen.
    pub fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Text area height.
    pub fn screen_rows(&self) -> usize {
        self.screen_rows
    }

    /// Text area width.
    pub fn screen_cols(&self) -> usize {
        self.screen_cols
    }

    /// Cursor position relative to the top-left of the text area.
    pub fn screen_position(&self, buffer: &Buffer) -> (usize, usize) {
        (
            self.row.saturating_sub(self.row_offset),
            self.render_x(buffer).saturating_sub(self.col_offset),
        )
    }

    fn render_x(&self, buffer: &Buffer) -> usize {
        buffer
            .row(self.row)
            .map_or(self.col, |r| r.render_x(self.col, buffer.tab_stop()))
    }

    /// Move one step in `direction`.
    pub fn move_cursor(&mut self, buffer: &Buffer, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = row_len(buffer, self.row);
                }
            }
            Direction::Right => {
                if self.row < buffer.len() {
                    if self.col < row_len(buffer, self.row) {
                        self.col += 1;
                    } else {
                        self.row += 1;
                        self.col = 0;
                    }
                }
            }
            Direction::Up => self.row = self.row.saturating_sub(1),
            Direction::Down => {
                if self.row < buffer.len() {
                    self.row += 1;
                }
            }
        }
        self.clamp(buffer);
    }

    /// Jump to the top of the screen, then move up one screen height.
    pub fn page_up(&mut self, buffer: &Buffer) {
        self.row = self.row_offset;
        for _ in 0..self.screen_rows {
            self.move_cursor(buffer, Direction::Up);
        }
    }

    /// Jump to the bottom of the screen, then move down one screen height.
    pub fn page_down(&mut self, buffer: &Buffer) {
        self.row = (self.row_offset + self.screen_rows - 1).min(buffer.len());
        for _ in 0..self.screen_rows {
            self.move_cursor(buffer, Direction::Down);
        }
    }

    /// Clamp the position to the buffer and scroll it into view.
    pub fn clamp(&mut self, buffer: &Buffer) {
        self.row = self.row.min(buffer.len());
        self.col = self.col.min(row_len(buffer, self.row));
        self.scroll(buffer);
    }

    /// Place the cursor at (`row`, `col`) with minimal scrolling.
    pub fn scroll_to(&mut self, buffer: &Buffer, row: usize, col: usize) {
        self.row = row;
        self.col = col;
        self.clamp(buffer);
    }

    /// Place the cursor at (`row`, `col`) with `row` at the top of the screen.
    pub fn jump_to_match(&mut self, buffer: &Buffer, row: usize, col: usize) {
        self.row = row.min(buffer.len());
        self.row_offset = self.row;
        self.scroll_to(buffer, row, col);
    }

    /// Change the text area size.
    pub fn resize(&mut self, buffer: &Buffer, screen_rows: usize, screen_cols: usize) {
        self.screen_rows = screen_rows.max(1);
        self.screen_cols = screen_cols.max(1);
        self.clamp(buffer);
    }

    fn scroll(&mut self, buffer: &Buffer) {
        if self.row < self.row_offset {
            self.row_offset = self.row;
        }
        if self.row >= self.row_offset + self.screen_rows {
            self.row_offset = self.row + 1 - self.screen_rows;
        }
        let rx = self.render_x(buffer);
        if rx < self.col_offset {
            self.col_offset = rx;
        }
        if rx >= self.col_offset + self.screen_cols {
            self.col_offset = rx + 1 - self.screen_cols;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> Buffer {
        Buffer::from_lines(["abc", "", "a longer line"], None)
    }

    #[test]
    fn test_horizontal_wrap() {
        let buffer = buffer();
        let mut cursor = Cursor::new(10, 80);
        cursor.move_cursor(&buffer, Direction::Left);
        assert_eq!(cursor.position(), (0, 0));
        for _ in 0..4 {
            cursor.move_cursor(&buffer, Direction::Right);
        }
        assert_eq!(cursor.position(), (1, 0));
        cursor.move_cursor(&buffer, Direction::Left);
        assert_eq!(cursor.position(), (0, 3));
    }

    #[test]
    fn test_vertical_clamps_column_and_allows_virtual_row() {
        let buffer = buffer();
        let mut cursor = Cursor::new(10, 80);
        cursor.scroll_to(&buffer, 2, 10);
        cursor.move_cursor(&buffer, Direction::Up);
        assert_eq!(cursor.position(), (1, 0));
        cursor.move_cursor(&buffer, Direction::Down);
        cursor.move_cursor(&buffer, Direction::Down);
        cursor.move_cursor(&buffer, Direction::Down);
        assert_eq!(cursor.position(), (3, 0));
    }

    #[test]
    fn test_scrolls_to_keep_cursor_visible() {
        let lines: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
        let buffer = Buffer::from_lines(&lines, None);
        let mut cursor = Cursor::new(10, 4);
        cursor.scroll_to(&buffer, 20, 6);
        assert_eq!(cursor.row_offset(), 11);
        assert_eq!(cursor.col_offset(), 3);
        assert_eq!(cursor.screen_position(&buffer), (9, 3));

        cursor.page_up(&buffer);
        assert_eq!(cursor.row(), 1);
        cursor.page_down(&buffer);
        assert_eq!(cursor.row(), 20);
    }

    #[test]
    fn test_tabs_shift_screen_column() {
        let buffer = Buffer::from_lines(["\tx"], None);
        let mut cursor = Cursor::new(10, 80);
        cursor.scroll_to(&buffer, 0, 1);
        assert_eq!(cursor.screen_position(&buffer), (0, 4));
    }
}
