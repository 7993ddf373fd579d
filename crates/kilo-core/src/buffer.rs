//! Row store.
//!
//! [`Buffer`] keeps an ordered sequence of [`Row`]s and every piece of state derived from them.
//! All mutations follow the same contract:
//!
//! - out-of-range positions are ignored (no error, no dirty bump)
//! - every row's index equals its position once the call returns
//! - render and highlight arrays are rebuilt before the call returns, including any rows further
//!   down whose block-comment seed changed
//! - the search-match overlay is dropped

use std::borrow::Cow;
use std::collections::VecDeque;
use std::ops::Range;
use std::path::{Path, PathBuf};

use kilo_lang::SyntaxDescriptor;

use crate::config::DEFAULT_TAB_STOP;
use crate::highlight::Highlight;
use crate::row::Row;

/// Transient search-match span drawn on top of the stored classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOverlay {
    /// Row holding the match.
    pub row: usize,
    /// Render byte span of the match.
    pub span: Range<usize>,
}

/// An ordered collection of rows with a dirty counter and an optional syntax.
#[derive(Debug, Clone)]
pub struct Buffer {
    rows: Vec<Row>,
    dirty: u64,
    filename: Option<PathBuf>,
    syntax: Option<&'static SyntaxDescriptor>,
    tab_stop: usize,
    overlay: Option<MatchOverlay>,
    last_highlight: Option<Range<usize>>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Create an empty buffer with the default tab stop.
    pub fn new() -> Self {
        Self::with_tab_stop(DEFAULT_TAB_STOP)
    }

    /// Create an empty buffer expanding tabs to multiples of `tab_stop`.
    pub fn with_tab_stop(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            dirty: 0,
            filename: None,
            syntax: None,
            tab_stop: tab_stop.max(1),
            overlay: None,
            last_highlight: None,
        }
    }

    /// Build a clean buffer from `lines`, e.g. for tests or scratch documents.
    pub fn from_lines<I, L>(lines: I, syntax: Option<&'static SyntaxDescriptor>) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut buffer = Self::new();
        buffer.syntax = syntax;
        for line in lines {
            buffer.insert_row(buffer.len(), line.as_ref());
        }
        buffer.dirty = 0;
        buffer.last_highlight = None;
        buffer
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the buffer has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `idx`.
    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    /// All rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of mutations since the last load or successful save.
    pub fn dirty(&self) -> u64 {
        self.dirty
    }

    /// Returns `true` if there are unsaved mutations.
    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    /// File the buffer is saved to.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Set the file name used by [`Buffer::save`].
    pub fn set_filename(&mut self, filename: impl Into<PathBuf>) {
        self.filename = Some(filename.into());
    }

    /// Tab stop used by the row renderer.
    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Selected syntax, if any.
    pub fn syntax(&self) -> Option<&'static SyntaxDescriptor> {
        self.syntax
    }

    /// Select a syntax (or none) and re-highlight every row.
    pub fn set_syntax(&mut self, syntax: Option<&'static SyntaxDescriptor>) {
        self.syntax = syntax;
        self.overlay = None;
        let mut seed = false;
        for row in &mut self.rows {
            row.rehighlight(seed, syntax);
            seed = row.has_open_comment();
        }
        self.last_highlight = (!self.rows.is_empty()).then(|| 0..self.rows.len());
        tracing::debug!(
            syntax = syntax.map(|s| s.name),
            rows = self.rows.len(),
            "syntax selected"
        );
    }

    /// Rows touched by the highlight pass(es) of the most recent mutation.
    pub fn last_highlight(&self) -> Option<Range<usize>> {
        self.last_highlight.clone()
    }

    /// Insert a row holding `content` at `pos` (`0..=len`).
    pub fn insert_row(&mut self, pos: usize, content: &[u8]) {
        if pos > self.rows.len() {
            return;
        }
        self.begin_mutation();
        let mut row = Row::new(pos, content);
        row.update_render(self.tab_stop);
        self.rows.insert(pos, row);
        self.renumber_from(pos + 1);
        self.rehighlight_from(pos);
    }

    /// Remove the row at `pos`.
    pub fn delete_row(&mut self, pos: usize) {
        if pos >= self.rows.len() {
            return;
        }
        self.begin_mutation();
        self.rows.remove(pos);
        self.renumber_from(pos);
        self.refresh_seed_at(pos);
    }

    /// Insert `ch` at `col` of `row`, padding with spaces when `col` is past the end.
    pub fn insert_char(&mut self, row: usize, col: usize, ch: u8) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        let chars = r.chars_mut();
        if col > chars.len() {
            chars.resize(col, b' ');
        }
        chars.insert(col, ch);
        self.begin_mutation();
        self.refresh_row(row);
    }

    /// Remove the byte at `at` of `row`.
    pub fn row_delete_char(&mut self, row: usize, at: usize) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        if at >= r.len() {
            return;
        }
        r.chars_mut().remove(at);
        self.begin_mutation();
        self.refresh_row(row);
    }

    /// Append `bytes` to the end of `row`.
    pub fn append_string(&mut self, row: usize, bytes: &[u8]) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        r.chars_mut().extend_from_slice(bytes);
        self.begin_mutation();
        self.refresh_row(row);
    }

    /// Delete backward from (`row`, `col`).
    ///
    /// At column 0 the row is joined onto the previous one. Returns the position the cursor
    /// should take afterwards, or `None` if nothing was deleted.
    pub fn delete_char(&mut self, row: usize, col: usize) -> Option<(usize, usize)> {
        let len = self.rows.get(row)?.len();
        if col == 0 {
            if row == 0 {
                return None;
            }
            let prev_len = self.rows[row - 1].len();
            let moved = self.rows[row].chars().to_vec();
            self.append_string(row - 1, &moved);
            let span = self.last_highlight.take();
            self.delete_row(row);
            self.last_highlight = merge_spans(span, self.last_highlight.take());
            return Some((row - 1, prev_len));
        }
        if col > len {
            return None;
        }
        self.row_delete_char(row, col - 1);
        Some((row, col - 1))
    }

    /// Break the line at (`row`, `col`).
    ///
    /// Column 0 inserts an empty row before, a column at or past the end inserts one after, and
    /// anything in between splits the row. `row == len` appends an empty row. Returns the
    /// position of the start of the following line.
    pub fn newline(&mut self, row: usize, col: usize) -> Option<(usize, usize)> {
        if row > self.rows.len() {
            return None;
        }
        if row == self.rows.len() {
            self.insert_row(row, b"");
            return Some((row + 1, 0));
        }
        let len = self.rows[row].len();
        if col == 0 {
            self.insert_row(row, b"");
        } else if col >= len {
            self.insert_row(row + 1, b"");
        } else {
            let tail = self.rows[row].chars_mut().split_off(col);
            self.begin_mutation();
            self.refresh_row(row);
            let span = self.last_highlight.take();
            self.insert_row(row + 1, &tail);
            self.last_highlight = merge_spans(span, self.last_highlight.take());
        }
        Some((row + 1, 0))
    }

    /// Every row followed by `'\n'`.
    pub fn serialize(&self) -> Vec<u8> {
        let total = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.chars());
            out.push(b'\n');
        }
        out
    }

    /// Show a search match over `span` of `row`, replacing any previous one.
    pub fn set_match_overlay(&mut self, row: usize, span: Range<usize>) {
        let Some(r) = self.rows.get(row) else {
            return;
        };
        let end = span.end.min(r.render().len());
        let start = span.start.min(end);
        self.overlay = Some(MatchOverlay {
            row,
            span: start..end,
        });
    }

    /// Remove the search match overlay.
    pub fn clear_match_overlay(&mut self) {
        self.overlay = None;
    }

    /// Current search match overlay.
    pub fn match_overlay(&self) -> Option<&MatchOverlay> {
        self.overlay.as_ref()
    }

    /// Classification of `row` as it should be displayed, with the match overlay applied.
    pub fn display_highlight(&self, row: usize) -> Option<Cow<'_, [Highlight]>> {
        let r = self.rows.get(row)?;
        match &self.overlay {
            Some(overlay) if overlay.row == row => {
                let mut hl = r.highlight().to_vec();
                hl[overlay.span.clone()].fill(Highlight::Match);
                Some(Cow::Owned(hl))
            }
            _ => Some(Cow::Borrowed(r.highlight())),
        }
    }

    fn begin_mutation(&mut self) {
        self.dirty += 1;
        self.overlay = None;
        self.last_highlight = None;
    }

    fn renumber_from(&mut self, start: usize) {
        for (idx, row) in self.rows.iter_mut().enumerate().skip(start) {
            row.set_index(idx);
        }
    }

    fn refresh_row(&mut self, idx: usize) {
        if let Some(row) = self.rows.get_mut(idx) {
            row.update_render(self.tab_stop);
        }
        self.rehighlight_from(idx);
    }

    fn seed_for(&self, idx: usize) -> bool {
        idx > 0 && self.rows[idx - 1].has_open_comment()
    }

    /// Re-highlight the row now at `idx` if its predecessor changed underneath it.
    fn refresh_seed_at(&mut self, idx: usize) {
        if let Some(row) = self.rows.get(idx)
            && row.hl_seed() != self.seed_for(idx)
        {
            self.rehighlight_from(idx);
        }
    }

    /// Highlight `start`, then every following row whose seed no longer matches.
    fn rehighlight_from(&mut self, start: usize) {
        let mut pending = VecDeque::from([start]);
        let mut end = start;
        while let Some(idx) = pending.pop_front() {
            if idx >= self.rows.len() {
                break;
            }
            let seed = self.seed_for(idx);
            let syntax = self.syntax;
            let row = &mut self.rows[idx];
            row.rehighlight(seed, syntax);
            let open = row.has_open_comment();
            end = idx + 1;
            if self.rows.get(idx + 1).is_some_and(|next| next.hl_seed() != open) {
                pending.push_back(idx + 1);
            }
        }
        if end > start + 1 {
            tracing::trace!(rows = ?(start..end), "block comment state cascaded");
        }
        self.last_highlight = merge_spans(self.last_highlight.take(), Some(start..end));
    }
}

fn merge_spans(a: Option<Range<usize>>, b: Option<Range<usize>>) -> Option<Range<usize>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.start.min(b.start)..a.end.max(b.end)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kilo_lang::C_SYNTAX;

    fn contents(buffer: &Buffer) -> Vec<&[u8]> {
        buffer.rows().iter().map(Row::chars).collect()
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut buffer = Buffer::from_lines(["a"], None);
        buffer.insert_row(3, b"x");
        buffer.delete_row(1);
        buffer.insert_char(1, 0, b'x');
        buffer.row_delete_char(0, 1);
        buffer.append_string(5, b"x");
        assert_eq!(buffer.delete_char(0, 0), None);
        assert_eq!(buffer.newline(2, 0), None);
        assert_eq!(contents(&buffer), [b"a".as_slice()]);
        assert_eq!(buffer.dirty(), 0);
    }

    #[test]
    fn test_newline_splits_and_appends() {
        let mut buffer = Buffer::from_lines(["hello"], None);
        assert_eq!(buffer.newline(0, 2), Some((1, 0)));
        assert_eq!(contents(&buffer), [b"he".as_slice(), b"llo"]);
        assert_eq!(buffer.newline(0, 0), Some((1, 0)));
        assert_eq!(contents(&buffer), [b"".as_slice(), b"he", b"llo"]);
        assert_eq!(buffer.newline(2, 9), Some((3, 0)));
        assert_eq!(buffer.newline(4, 0), Some((5, 0)));
        assert_eq!(buffer.len(), 5);
        assert!(buffer.rows().iter().enumerate().all(|(i, r)| r.index() == i));
    }

    #[test]
    fn test_serialize_terminates_every_row() {
        let buffer = Buffer::from_lines(["a", "", "b"], None);
        assert_eq!(buffer.serialize(), b"a\n\nb\n");
        assert_eq!(Buffer::new().serialize(), b"");
    }

    #[test]
    fn test_mutation_drops_overlay() {
        let mut buffer = Buffer::from_lines(["int x;"], Some(&C_SYNTAX));
        buffer.set_match_overlay(0, 4..5);
        assert_eq!(buffer.display_highlight(0).unwrap()[4], Highlight::Match);
        buffer.insert_char(0, 0, b' ');
        assert!(buffer.match_overlay().is_none());
    }

    #[test]
    fn test_deleting_opener_row_recolors_following_rows() {
        let mut buffer = Buffer::from_lines(["/*", "a", "b */", "c"], Some(&C_SYNTAX));
        assert_eq!(buffer.row(1).unwrap().highlight(), [Highlight::MlComment]);
        buffer.delete_row(0);
        assert_eq!(buffer.row(0).unwrap().highlight(), [Highlight::Normal]);
        assert_eq!(buffer.row(1).unwrap().highlight()[0], Highlight::Normal);
        assert_eq!(buffer.last_highlight(), Some(0..2));
    }
}
