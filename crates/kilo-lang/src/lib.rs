#![warn(missing_docs)]
//! `kilo-lang` - declarative language descriptors for the kilo editor core.
//!
//! This crate intentionally stays lightweight and does **not** scan text. It provides the small,
//! immutable tables the highlighter in `kilo-core` is driven by:
//!
//! - [`SyntaxDescriptor`]: filename patterns, keywords, comment markers and flags for one language
//! - [`SyntaxRegistry`]: an ordered list of descriptors, searched first-match-wins by file name
//!
//! Keywords are stored the way they are written in the tables: a trailing `|` moves a keyword into
//! the second keyword class (typically used for type names).
//!
//! ```rust
//! use kilo_lang::{KeywordClass, SyntaxRegistry};
//!
//! let registry = SyntaxRegistry::builtin();
//! let c = registry.select("main.c").unwrap();
//! assert_eq!(c.name, "c");
//!
//! let int = c.keywords().find(|k| k.word == b"int").unwrap();
//! assert_eq!(int.class, KeywordClass::Secondary);
//! assert!(registry.select("notes.txt").is_none());
//! ```

mod builtin;
mod registry;

pub use builtin::{C_SYNTAX, RUST_SYNTAX};
pub use registry::SyntaxRegistry;

use bitflags::bitflags;

/// Marker appended to a stored keyword to place it in [`KeywordClass::Secondary`].
pub const SECONDARY_KEYWORD_MARKER: u8 = b'|';

/// Leading character that turns a file pattern into an extension pattern.
pub const EXTENSION_DELIMITER: char = '.';

/// Comment markers for a given language.
///
/// Markers are exactly two bytes long. A language without line or block comments leaves the
/// corresponding field empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommentConfig {
    /// Line comment marker (e.g. `//`).
    pub line: Option<[u8; 2]>,
    /// Block comment start marker (e.g. `/*`).
    pub block_start: Option<[u8; 2]>,
    /// Block comment end marker (e.g. `*/`).
    pub block_end: Option<[u8; 2]>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub const fn line(marker: [u8; 2]) -> Self {
        Self {
            line: Some(marker),
            block_start: None,
            block_end: None,
        }
    }

    /// Create a config that supports only block comments.
    pub const fn block(start: [u8; 2], end: [u8; 2]) -> Self {
        Self {
            line: None,
            block_start: Some(start),
            block_end: Some(end),
        }
    }

    /// Create a config that supports both line and block comments.
    pub const fn line_and_block(line: [u8; 2], block_start: [u8; 2], block_end: [u8; 2]) -> Self {
        Self {
            line: Some(line),
            block_start: Some(block_start),
            block_end: Some(block_end),
        }
    }

    /// Returns `true` if a line comment marker is configured.
    pub fn has_line(&self) -> bool {
        self.line.is_some()
    }

    /// Returns `true` if both block comment markers are configured.
    pub fn has_block(&self) -> bool {
        self.block_start.is_some() && self.block_end.is_some()
    }

    /// Returns the block markers as a `(start, end)` pair when both are configured.
    pub fn block_markers(&self) -> Option<([u8; 2], [u8; 2])> {
        self.block_start.zip(self.block_end)
    }
}

bitflags! {
    /// Optional highlighting passes enabled for a language.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SyntaxFlags: u8 {
        /// Highlight `"..."` and `'...'` literals.
        const HIGHLIGHT_STRINGS = 1 << 0;
        /// Highlight numeric literals.
        const HIGHLIGHT_NUMBERS = 1 << 1;
    }
}

/// Which of the two keyword classes a keyword belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordClass {
    /// Plain keywords (control flow, declarations).
    Primary,
    /// Keywords stored with a trailing [`SECONDARY_KEYWORD_MARKER`] (usually type names).
    Secondary,
}

/// A keyword with its marker stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword<'a> {
    /// The bytes that must appear in the text.
    pub word: &'a [u8],
    /// The keyword class.
    pub class: KeywordClass,
}

impl<'a> Keyword<'a> {
    /// Parse a keyword in its stored form (`"if"`, `"int|"`).
    pub fn parse(stored: &'a str) -> Self {
        let bytes = stored.as_bytes();
        match bytes.split_last() {
            Some((&SECONDARY_KEYWORD_MARKER, word)) => Self {
                word,
                class: KeywordClass::Secondary,
            },
            _ => Self {
                word: bytes,
                class: KeywordClass::Primary,
            },
        }
    }

    /// Length of the keyword in bytes, marker excluded.
    pub fn len(&self) -> usize {
        self.word.len()
    }

    /// Returns `true` if the keyword has no bytes.
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// Immutable description of how to highlight one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxDescriptor {
    /// Short language name, for status display and logging.
    pub name: &'static str,
    /// File name patterns. Patterns starting with [`EXTENSION_DELIMITER`] must match the end of
    /// the file name; other patterns may appear anywhere in it.
    pub file_patterns: &'static [&'static str],
    /// Keywords in stored form (see [`Keyword::parse`]).
    pub keywords: &'static [&'static str],
    /// Comment markers.
    pub comments: CommentConfig,
    /// Enabled highlighting passes.
    pub flags: SyntaxFlags,
}

impl SyntaxDescriptor {
    /// Returns `true` if `filename` matches any of this descriptor's patterns.
    pub fn matches_filename(&self, filename: &str) -> bool {
        self.file_patterns
            .iter()
            .any(|pattern| pattern_matches(pattern, filename))
    }

    /// Iterate over the keywords with markers stripped, in table order.
    pub fn keywords(&self) -> impl Iterator<Item = Keyword<'static>> + '_ {
        self.keywords.iter().copied().map(Keyword::parse)
    }

    /// Returns `true` if string literals are highlighted.
    pub fn highlights_strings(&self) -> bool {
        self.flags.contains(SyntaxFlags::HIGHLIGHT_STRINGS)
    }

    /// Returns `true` if numeric literals are highlighted.
    pub fn highlights_numbers(&self) -> bool {
        self.flags.contains(SyntaxFlags::HIGHLIGHT_NUMBERS)
    }
}

fn pattern_matches(pattern: &str, filename: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    if pattern.starts_with(EXTENSION_DELIMITER) {
        filename.ends_with(pattern)
    } else {
        filename.contains(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_marker_selects_secondary_class() {
        let kw = Keyword::parse("int|");
        assert_eq!(kw.word, b"int");
        assert_eq!(kw.class, KeywordClass::Secondary);
        assert_eq!(kw.len(), 3);

        let kw = Keyword::parse("while");
        assert_eq!(kw.word, b"while");
        assert_eq!(kw.class, KeywordClass::Primary);
    }

    #[test]
    fn test_extension_pattern_is_anchored_at_end() {
        assert!(pattern_matches(".c", "main.c"));
        assert!(pattern_matches(".c", "dir.c/archive.c.c"));
        assert!(!pattern_matches(".c", "main.cc"));
        assert!(!pattern_matches(".c", "main.c.bak"));
    }

    #[test]
    fn test_plain_pattern_matches_anywhere() {
        assert!(pattern_matches("Makefile", "Makefile"));
        assert!(pattern_matches("Makefile", "build/Makefile.in"));
        assert!(!pattern_matches("", "anything"));
    }

    #[test]
    fn test_comment_config_helpers() {
        let cfg = CommentConfig::line_and_block(*b"//", *b"/*", *b"*/");
        assert!(cfg.has_line());
        assert!(cfg.has_block());
        assert_eq!(cfg.block_markers(), Some((*b"/*", *b"*/")));

        let cfg = CommentConfig::line(*b"--");
        assert!(!cfg.has_block());
        assert_eq!(cfg.block_markers(), None);
    }
}
