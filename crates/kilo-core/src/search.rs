//! Incremental find.
//!
//! A [`FindSession`] owns the query and the last matched row. The query is matched as a plain
//! substring (escaped and compiled into a byte regex) against each row's render bytes, one row at
//! a time, wrapping around the document. A hit moves the cursor and installs the buffer's match
//! overlay; the stored classification is never touched.

use regex::bytes::{Regex, RegexBuilder};

use crate::buffer::Buffer;
use crate::cursor::Cursor;

/// Direction to look for the next match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindDirection {
    /// Towards the end of the document.
    Forward,
    /// Towards the start of the document.
    Backward,
}

/// A match located by [`FindSession::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FindMatch {
    /// Buffer row.
    pub row: usize,
    /// Render byte where the match starts.
    pub start: usize,
    /// Render byte one past the end of the match.
    pub end: usize,
}

/// State of an active find prompt.
#[derive(Debug, Clone)]
pub struct FindSession {
    query: String,
    capacity: usize,
    last_match: Option<usize>,
    saved: Cursor,
}

fn compile_search_regex(query: &str) -> Option<Regex> {
    match RegexBuilder::new(&regex::escape(query)).unicode(false).build() {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(%err, "search query did not compile");
            None
        }
    }
}

impl FindSession {
    /// Start a session, remembering `cursor` so it can be restored on cancel.
    pub fn start(cursor: &Cursor, capacity: usize) -> Self {
        Self {
            query: String::new(),
            capacity,
            last_match: None,
            saved: cursor.clone(),
        }
    }

    /// Current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Row of the last match.
    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    /// Prompt shown in the message bar.
    pub fn prompt(&self) -> String {
        format!("Search: {} (Use ESC/Arrows/Enter)", self.query)
    }

    /// Append a printable byte to the query. Returns `false` if the query is full.
    pub fn push(&mut self, ch: u8) -> bool {
        if self.query.len() >= self.capacity || !(0x20..=0x7e).contains(&ch) {
            return false;
        }
        self.query.push(char::from(ch));
        self.last_match = None;
        true
    }

    /// Remove the last query byte. Returns `false` if the query was empty.
    pub fn pop(&mut self) -> bool {
        let popped = self.query.pop().is_some();
        if popped {
            self.last_match = None;
        }
        popped
    }

    /// Look for the next match in `direction`, starting after the last match.
    ///
    /// Without a previous match the search starts at the top and goes forward. On a hit the
    /// cursor jumps to the match and the overlay is placed on it; on a miss the overlay is
    /// removed and the cursor stays where it is.
    pub fn search(
        &mut self,
        buffer: &mut Buffer,
        cursor: &mut Cursor,
        direction: FindDirection,
    ) -> Option<FindMatch> {
        buffer.clear_match_overlay();
        if self.query.is_empty() || buffer.is_empty() {
            self.last_match = None;
            return None;
        }
        let re = compile_search_regex(&self.query)?;

        let rows = buffer.len();
        let (mut current, direction) = match self.last_match {
            Some(row) => (row, direction),
            None => (rows - 1, FindDirection::Forward),
        };
        for _ in 0..rows {
            current = match direction {
                FindDirection::Forward => (current + 1) % rows,
                FindDirection::Backward => (current + rows - 1) % rows,
            };
            let Some(row) = buffer.row(current) else {
                continue;
            };
            let Some(m) = re.find(row.render()) else {
                continue;
            };
            let found = FindMatch {
                row: current,
                start: m.start(),
                end: m.end(),
            };
            let col = row.chars_col(found.start, buffer.tab_stop());
            self.last_match = Some(current);
            cursor.jump_to_match(buffer, current, col);
            buffer.set_match_overlay(current, found.start..found.end);
            return Some(found);
        }
        None
    }

    /// Start over from the top with the current query.
    pub fn restart(&mut self, buffer: &mut Buffer, cursor: &mut Cursor) -> Option<FindMatch> {
        self.last_match = None;
        self.search(buffer, cursor, FindDirection::Forward)
    }

    /// Leave find mode keeping the cursor on the match.
    pub fn accept(self, buffer: &mut Buffer) {
        buffer.clear_match_overlay();
    }

    /// Leave find mode, restoring the cursor and scroll offsets.
    pub fn cancel(self, buffer: &mut Buffer, cursor: &mut Cursor) {
        buffer.clear_match_overlay();
        *cursor = self.saved;
    }
}
