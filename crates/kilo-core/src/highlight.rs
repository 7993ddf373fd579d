//! Row highlighter.
//!
//! A single left-to-right scan over a row's render bytes, seeded with whether the previous row
//! ended inside an unterminated block comment. The scan is a pure function of its inputs; the
//! forward propagation across rows lives in [`Buffer`](crate::Buffer).

use kilo_lang::SyntaxDescriptor;

/// Classification of a single render byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    /// Plain text.
    #[default]
    Normal,
    /// A byte outside the printable ASCII range.
    NonPrint,
    /// Single-line comment.
    Comment,
    /// Block comment.
    MlComment,
    /// Primary keyword.
    Keyword1,
    /// Secondary keyword (usually a type name).
    Keyword2,
    /// String or character literal.
    String,
    /// Numeric literal.
    Number,
    /// Current search match. Only ever produced by the match overlay.
    Match,
}

/// Display color a surface should use for a [`Highlight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayColor {
    /// The surface's default foreground.
    Default,
    /// Cyan.
    Cyan,
    /// Yellow.
    Yellow,
    /// Green.
    Green,
    /// Magenta.
    Magenta,
    /// Red.
    Red,
    /// Blue.
    Blue,
}

impl Highlight {
    /// Fixed color table.
    pub fn color(self) -> DisplayColor {
        match self {
            Highlight::Comment | Highlight::MlComment => DisplayColor::Cyan,
            Highlight::Keyword1 => DisplayColor::Yellow,
            Highlight::Keyword2 => DisplayColor::Green,
            Highlight::String => DisplayColor::Magenta,
            Highlight::Number => DisplayColor::Red,
            Highlight::Match => DisplayColor::Blue,
            Highlight::Normal | Highlight::NonPrint => DisplayColor::Default,
        }
    }
}

/// Returns `true` for bytes that end a word: NUL, ASCII whitespace and `,.()+-/*=~%[];`.
pub fn is_separator(b: u8) -> bool {
    b == 0 || b.is_ascii_whitespace() || b",.()+-/*=~%[];".contains(&b)
}

/// Returns `true` for printable ASCII (`0x20..=0x7e`).
pub fn is_printable(b: u8) -> bool {
    (0x20..=0x7e).contains(&b)
}

/// Output of [`highlight_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHighlight {
    /// One classification per render byte.
    pub hl: Vec<Highlight>,
    /// The row ends inside an unterminated block comment.
    pub open_comment: bool,
}

/// Classify `render`.
///
/// `in_comment` is the trailing open-comment flag of the previous row. Without a descriptor
/// every byte is [`Highlight::Normal`] and the row never ends inside a comment.
pub fn highlight_line(
    render: &[u8],
    in_comment: bool,
    syntax: Option<&SyntaxDescriptor>,
) -> LineHighlight {
    let mut hl = vec![Highlight::Normal; render.len()];
    let Some(syntax) = syntax else {
        return LineHighlight {
            hl,
            open_comment: false,
        };
    };

    let line_marker = syntax.comments.line;
    let block_markers = syntax.comments.block_markers();
    let strings = syntax.highlights_strings();
    let numbers = syntax.highlights_numbers();

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = in_comment && block_markers.is_some();

    let mut i = 0;
    while i < render.len() {
        let c = render[i];
        let rest = &render[i..];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if prev_sep && line_marker.is_some_and(|m| rest.starts_with(&m)) {
            hl[i..].fill(Highlight::Comment);
            break;
        }

        if let Some((start, end)) = block_markers {
            if in_comment {
                hl[i] = Highlight::MlComment;
                if rest.starts_with(&end) {
                    hl[i + 1] = Highlight::MlComment;
                    i += 2;
                    in_comment = false;
                    prev_sep = true;
                } else {
                    i += 1;
                    prev_sep = false;
                }
                continue;
            }
            if rest.starts_with(&start) {
                hl[i..i + 2].fill(Highlight::MlComment);
                i += 2;
                in_comment = true;
                prev_sep = false;
                continue;
            }
        }

        if strings {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == b'\\' && i + 1 < render.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    prev_sep = false;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                continue;
            }
            if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                prev_sep = false;
                continue;
            }
        }

        if !is_printable(c) {
            hl[i] = Highlight::NonPrint;
            i += 1;
            prev_sep = false;
            continue;
        }

        if numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep && let Some((len, class)) = match_keyword(rest, syntax) {
            hl[i..i + len].fill(class);
            i += len;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    // A row ending on the closer never leaves a comment open, even when that closer shares its
    // `*` with the opener.
    let open_comment =
        in_comment && block_markers.is_none_or(|(_, end)| !render.ends_with(&end));
    LineHighlight { hl, open_comment }
}

/// Longest keyword at the start of `rest` that is followed by a separator or the row end.
fn match_keyword(rest: &[u8], syntax: &SyntaxDescriptor) -> Option<(usize, Highlight)> {
    syntax
        .keywords()
        .filter(|kw| !kw.is_empty() && rest.starts_with(kw.word))
        .filter(|kw| rest.get(kw.len()).is_none_or(|&b| is_separator(b)))
        .max_by_key(|kw| kw.len())
        .map(|kw| {
            let class = match kw.class {
                kilo_lang::KeywordClass::Primary => Highlight::Keyword1,
                kilo_lang::KeywordClass::Secondary => Highlight::Keyword2,
            };
            (kw.len(), class)
        })
}
