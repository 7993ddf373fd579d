#![warn(missing_docs)]
//! Kilo Core - row buffer and incremental syntax highlighter for a small screen editor
//!
//! # Overview
//!
//! `kilo-core` holds all editing state of a kilo session and none of the terminal handling.
//! A host decodes input into [`EditorCommand`]s, runs them through [`Editor::execute`], and draws
//! the [`ScreenSnapshot`] the editor produces between commands.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Editor context & commands                  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Screen snapshot (cells + colors)           │  ← Rendering Data
//! ├─────────────────────────────────────────────┤
//! │  Cursor / viewport      Find session        │  ← Navigation
//! ├─────────────────────────────────────────────┤
//! │  Buffer (rows, dirty counter, propagation)  │  ← Row Store
//! ├─────────────────────────────────────────────┤
//! │  Row renderer          Highlighter          │  ← Derived State
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use kilo_core::{Buffer, Highlight};
//! use kilo_lang::C_SYNTAX;
//!
//! let mut buffer = Buffer::from_lines(["int x;", "x = 1;"], Some(&C_SYNTAX));
//! assert_eq!(buffer.row(0).unwrap().highlight()[0], Highlight::Keyword2);
//!
//! // Opening a block comment recolors the rows below it.
//! buffer.insert_char(0, 6, b'/');
//! buffer.insert_char(0, 7, b'*');
//! assert_eq!(buffer.row(1).unwrap().highlight()[0], Highlight::MlComment);
//! assert_eq!(buffer.last_highlight(), Some(0..2));
//! ```
//!
//! ## Driving an editor
//!
//! ```rust
//! use kilo_core::{Direction, Editor, EditorCommand, EditorConfig, EditorFlow};
//!
//! let mut editor = Editor::empty(EditorConfig::default());
//! for &b in b"hello" {
//!     editor.execute(EditorCommand::InsertChar(b));
//! }
//! editor.execute(EditorCommand::Move(Direction::Left));
//! editor.execute(EditorCommand::InsertNewline);
//! assert_eq!(editor.buffer().serialize(), b"hell\no\n");
//!
//! // Unsaved changes need confirmation.
//! assert_eq!(editor.execute(EditorCommand::Quit), EditorFlow::Continue);
//! ```

pub mod buffer;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod row;
pub mod search;
pub mod snapshot;
pub mod status;
mod storage;

pub use buffer::{Buffer, MatchOverlay};
pub use config::EditorConfig;
pub use cursor::{Cursor, Direction};
pub use editor::{Editor, EditorCommand, EditorFlow, HELP_MESSAGE};
pub use error::KiloError;
pub use highlight::{DisplayColor, Highlight, LineHighlight, highlight_line};
pub use row::Row;
pub use search::{FindDirection, FindMatch, FindSession};
pub use snapshot::{Cell, ScreenSnapshot};
pub use status::StatusMessage;
