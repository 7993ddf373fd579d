//! Rows: one logical line of the document plus its derived display state.
//!
//! A [`Row`] owns its raw bytes and two arrays derived from them:
//!
//! - the *render* buffer, where every `'\t'` is expanded to spaces up to the next tab stop
//! - the *classification* array, one [`Highlight`] per render byte
//!
//! The derived arrays are only ever rebuilt by the owning [`Buffer`](crate::Buffer), which does
//! so before any mutating call returns, so readers never observe them out of sync.

use crate::highlight::{self, Highlight};
use kilo_lang::SyntaxDescriptor;

/// Expand tabs in `chars` to spaces, aligning each tab to the next multiple of `tab_stop`.
pub fn expand_tabs(chars: &[u8], tab_stop: usize) -> Vec<u8> {
    let tab_stop = tab_stop.max(1);
    let tabs = chars.iter().filter(|&&b| b == b'\t').count();
    let mut render = Vec::with_capacity(chars.len() + tabs * (tab_stop - 1));
    for &b in chars {
        if b == b'\t' {
            render.push(b' ');
            while render.len() % tab_stop != 0 {
                render.push(b' ');
            }
        } else {
            render.push(b);
        }
    }
    render
}

fn cell_width_at(b: u8, x: usize, tab_stop: usize) -> usize {
    if b == b'\t' {
        let tab_stop = tab_stop.max(1);
        tab_stop - x % tab_stop
    } else {
        1
    }
}

/// A single line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    idx: usize,
    chars: Vec<u8>,
    render: Vec<u8>,
    hl: Vec<Highlight>,
    /// Row ends inside an unterminated block comment.
    open_comment: bool,
    /// Open-comment state this row was last highlighted with.
    hl_seed: bool,
}

impl Row {
    pub(crate) fn new(idx: usize, content: &[u8]) -> Self {
        Self {
            idx,
            chars: content.to_vec(),
            render: Vec::new(),
            hl: Vec::new(),
            open_comment: false,
            hl_seed: false,
        }
    }

    /// Zero-based index of the row in its buffer.
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Raw content, without the line terminator.
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// Raw size in bytes.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the row has no content.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Tab-expanded, display-ready content.
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Stored classification, one entry per render byte.
    ///
    /// This never contains [`Highlight::Match`]; see
    /// [`Buffer::display_highlight`](crate::Buffer::display_highlight) for the overlaid view.
    pub fn highlight(&self) -> &[Highlight] {
        &self.hl
    }

    /// Returns `true` if the row ends inside an unterminated block comment.
    pub fn has_open_comment(&self) -> bool {
        self.open_comment
    }

    /// Render column of raw column `col`. Columns past the end count one cell each.
    pub fn render_x(&self, col: usize, tab_stop: usize) -> usize {
        let mut x = 0usize;
        for &b in self.chars.iter().take(col) {
            x += cell_width_at(b, x, tab_stop);
        }
        x + col.saturating_sub(self.chars.len())
    }

    /// Raw column containing render column `render_x`.
    pub fn chars_col(&self, render_x: usize, tab_stop: usize) -> usize {
        let mut x = 0usize;
        for (col, &b) in self.chars.iter().enumerate() {
            let width = cell_width_at(b, x, tab_stop);
            if x + width > render_x {
                return col;
            }
            x += width;
        }
        self.chars.len() + (render_x - x)
    }

    pub(crate) fn set_index(&mut self, idx: usize) {
        self.idx = idx;
    }

    pub(crate) fn hl_seed(&self) -> bool {
        self.hl_seed
    }

    pub(crate) fn chars_mut(&mut self) -> &mut Vec<u8> {
        &mut self.chars
    }

    pub(crate) fn update_render(&mut self, tab_stop: usize) {
        self.render = expand_tabs(&self.chars, tab_stop);
    }

    pub(crate) fn rehighlight(&mut self, seed: bool, syntax: Option<&SyntaxDescriptor>) {
        let line = highlight::highlight_line(&self.render, seed, syntax);
        self.hl = line.hl;
        self.open_comment = line.open_comment;
        self.hl_seed = seed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tabs_aligns_to_stride() {
        assert_eq!(expand_tabs(b"\tx", 4), b"    x");
        assert_eq!(expand_tabs(b"ab\tc", 4), b"ab  c");
        assert_eq!(expand_tabs(b"abc\td", 4), b"abc d");
        assert_eq!(expand_tabs(b"abcd\te", 4), b"abcd    e");
        assert_eq!(expand_tabs(b"\t\t", 2), b"    ");
        assert_eq!(expand_tabs(b"no tabs", 4), b"no tabs");
    }

    #[test]
    fn test_render_x_and_chars_col_round_trip_over_tabs() {
        let mut row = Row::new(0, b"a\tbc");
        row.update_render(4);
        assert_eq!(row.render(), b"a   bc");

        assert_eq!(row.render_x(0, 4), 0);
        assert_eq!(row.render_x(1, 4), 1);
        assert_eq!(row.render_x(2, 4), 4);
        assert_eq!(row.render_x(4, 4), 6);
        assert_eq!(row.render_x(6, 4), 8);

        assert_eq!(row.chars_col(0, 4), 0);
        assert_eq!(row.chars_col(2, 4), 1);
        assert_eq!(row.chars_col(4, 4), 2);
        assert_eq!(row.chars_col(5, 4), 3);
        assert_eq!(row.chars_col(7, 4), 5);
    }
}
