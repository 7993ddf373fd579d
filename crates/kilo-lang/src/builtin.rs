//! Built-in language descriptors.

use crate::{CommentConfig, SyntaxDescriptor, SyntaxFlags};

const C_PATTERNS: &[&str] = &[".c", ".h", ".cpp"];

const C_KEYWORDS: &[&str] = &[
    // C / C++ keywords
    "switch", "if", "while", "for", "break", "continue", "return", "else", "struct", "union",
    "typedef", "static", "enum", "class",
    // C types
    "int|", "long|", "double|", "float|", "char|", "unsigned|", "signed|", "void|",
];

/// C / C++.
pub const C_SYNTAX: SyntaxDescriptor = SyntaxDescriptor {
    name: "c",
    file_patterns: C_PATTERNS,
    keywords: C_KEYWORDS,
    comments: CommentConfig::line_and_block(*b"//", *b"/*", *b"*/"),
    flags: SyntaxFlags::HIGHLIGHT_STRINGS.union(SyntaxFlags::HIGHLIGHT_NUMBERS),
};

const RUST_PATTERNS: &[&str] = &[".rs"];

const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "fn", "for", "if",
    "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "self",
    "static", "struct", "super", "trait", "type", "unsafe", "use", "where", "while",
    // Primitive types
    "bool|", "char|", "str|", "u8|", "u16|", "u32|", "u64|", "u128|", "usize|", "i8|", "i16|",
    "i32|", "i64|", "i128|", "isize|", "f32|", "f64|", "Self|",
];

/// Rust.
pub const RUST_SYNTAX: SyntaxDescriptor = SyntaxDescriptor {
    name: "rust",
    file_patterns: RUST_PATTERNS,
    keywords: RUST_KEYWORDS,
    comments: CommentConfig::line_and_block(*b"//", *b"/*", *b"*/"),
    flags: SyntaxFlags::HIGHLIGHT_STRINGS.union(SyntaxFlags::HIGHLIGHT_NUMBERS),
};
