//! Editor context and command interface.
//!
//! [`Editor`] owns everything an editing session needs and is driven by discrete
//! [`EditorCommand`]s. Hosts decode their input into commands, call [`Editor::execute`], and draw
//! [`Editor::snapshot`](crate::Editor::snapshot) between commands.

use std::path::Path;

use kilo_lang::SyntaxRegistry;

use crate::buffer::Buffer;
use crate::config::EditorConfig;
use crate::cursor::{Cursor, Direction};
use crate::error::KiloError;
use crate::search::{FindDirection, FindSession};
use crate::status::StatusMessage;

/// Message shown when a session starts.
pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// A discrete editing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    /// Insert a byte at the cursor.
    InsertChar(u8),
    /// Break the line at the cursor.
    InsertNewline,
    /// Delete the byte before the cursor, joining lines at column 0.
    DeleteBackward,
    /// Move the cursor one step.
    Move(Direction),
    /// Move up one screen.
    PageUp,
    /// Move down one screen.
    PageDown,
    /// Write the buffer to its file.
    Save,
    /// Enter find mode.
    Find,
    /// Leave find mode, restoring the cursor.
    Cancel,
    /// Quit, asking for confirmation when there are unsaved changes.
    Quit,
}

/// What the host should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorFlow {
    /// Keep running.
    Continue,
    /// Exit.
    Quit,
}

/// A single-buffer editing session.
#[derive(Debug, Clone)]
pub struct Editor {
    buffer: Buffer,
    cursor: Cursor,
    config: EditorConfig,
    status: StatusMessage,
    quit_times: u8,
    find: Option<FindSession>,
}

impl Editor {
    /// Start a session on `buffer`.
    pub fn new(buffer: Buffer, config: EditorConfig) -> Self {
        let cursor = Cursor::new(config.screen_rows, config.screen_cols);
        let mut status = StatusMessage::new(config.status_capacity);
        status.set(HELP_MESSAGE);
        Self {
            buffer,
            cursor,
            quit_times: config.quit_times,
            status,
            config,
            find: None,
        }
    }

    /// Start a session on an empty, unnamed buffer.
    pub fn empty(config: EditorConfig) -> Self {
        let buffer = Buffer::with_tab_stop(config.tab_stop);
        Self::new(buffer, config)
    }

    /// Open `path` and start a session on it.
    pub fn open(
        path: impl AsRef<Path>,
        registry: &SyntaxRegistry,
        config: EditorConfig,
    ) -> Result<Self, KiloError> {
        let buffer = Buffer::open(path, registry, config.tab_stop)?;
        Ok(Self::new(buffer, config))
    }

    /// The document.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Cursor and viewport.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Session configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Message bar state.
    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    /// Active find session, if any.
    pub fn find_session(&self) -> Option<&FindSession> {
        self.find.as_ref()
    }

    /// Replace the status message.
    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.status.set(text);
    }

    /// Change the text area size.
    pub fn resize(&mut self, screen_rows: usize, screen_cols: usize) {
        self.config = self.config.clone().with_screen_size(screen_rows, screen_cols);
        self.cursor
            .resize(&self.buffer, self.config.screen_rows, self.config.screen_cols);
    }

    /// Run one command.
    pub fn execute(&mut self, command: EditorCommand) -> EditorFlow {
        if command != EditorCommand::Quit {
            self.quit_times = self.config.quit_times;
        }
        if self.find.is_some() {
            self.execute_find(command);
            return EditorFlow::Continue;
        }

        match command {
            EditorCommand::InsertChar(ch) => self.insert_char(ch),
            EditorCommand::InsertNewline => {
                let (row, col) = self.cursor.position();
                if let Some((row, col)) = self.buffer.newline(row, col) {
                    self.cursor.scroll_to(&self.buffer, row, col);
                }
            }
            EditorCommand::DeleteBackward => {
                let (row, col) = self.cursor.position();
                if let Some((row, col)) = self.buffer.delete_char(row, col) {
                    self.cursor.scroll_to(&self.buffer, row, col);
                }
            }
            EditorCommand::Move(direction) => self.cursor.move_cursor(&self.buffer, direction),
            EditorCommand::PageUp => self.cursor.page_up(&self.buffer),
            EditorCommand::PageDown => self.cursor.page_down(&self.buffer),
            EditorCommand::Save => self.save(),
            EditorCommand::Find => {
                let find = FindSession::start(&self.cursor, self.config.query_capacity);
                self.status.set(find.prompt());
                self.find = Some(find);
            }
            EditorCommand::Cancel => {}
            EditorCommand::Quit => return self.quit(),
        }
        EditorFlow::Continue
    }

    fn insert_char(&mut self, ch: u8) {
        let (row, col) = self.cursor.position();
        while self.buffer.len() <= row {
            self.buffer.insert_row(self.buffer.len(), b"");
        }
        self.buffer.insert_char(row, col, ch);
        self.cursor.scroll_to(&self.buffer, row, col + 1);
    }

    fn save(&mut self) {
        match self.buffer.save() {
            Ok(written) => self.set_status_message(format!("{written} bytes written on disk")),
            Err(err) => self.set_status_message(format!("Can't save! I/O error: {err}")),
        }
    }

    fn quit(&mut self) -> EditorFlow {
        if self.buffer.is_dirty() && self.quit_times > 0 {
            self.set_status_message(format!(
                "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                self.quit_times
            ));
            self.quit_times -= 1;
            return EditorFlow::Continue;
        }
        tracing::debug!(dirty = self.buffer.dirty(), "quit");
        EditorFlow::Quit
    }

    fn execute_find(&mut self, command: EditorCommand) {
        let Some(mut find) = self.find.take() else {
            return;
        };
        let (buffer, cursor) = (&mut self.buffer, &mut self.cursor);
        match command {
            EditorCommand::InsertChar(ch) => {
                if find.push(ch) {
                    find.restart(buffer, cursor);
                }
            }
            EditorCommand::DeleteBackward => {
                if find.pop() {
                    find.restart(buffer, cursor);
                }
            }
            EditorCommand::Move(Direction::Right | Direction::Down) => {
                find.search(buffer, cursor, FindDirection::Forward);
            }
            EditorCommand::Move(Direction::Left | Direction::Up) => {
                find.search(buffer, cursor, FindDirection::Backward);
            }
            EditorCommand::InsertNewline => {
                find.accept(buffer);
                self.status.clear();
                return;
            }
            EditorCommand::Cancel => {
                find.cancel(buffer, cursor);
                self.status.clear();
                return;
            }
            EditorCommand::PageUp
            | EditorCommand::PageDown
            | EditorCommand::Save
            | EditorCommand::Find
            | EditorCommand::Quit => {}
        }
        self.status.set(find.prompt());
        self.find = Some(find);
    }
}
