use std::fs;

use kilo_core::{Buffer, Highlight, KiloError};
use kilo_lang::SyntaxRegistry;
use pretty_assertions::assert_eq;

#[test]
fn test_round_trip_is_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.c");
    let original = b"#include <stdio.h>\n\nint main(void) {\n\tprintf(\"hi\\n\");\n}\n";
    fs::write(&path, original).unwrap();

    let mut buffer = Buffer::open(&path, &SyntaxRegistry::builtin(), 4).unwrap();
    assert_eq!(buffer.len(), 5);
    assert_eq!(buffer.dirty(), 0);
    assert_eq!(buffer.syntax().map(|s| s.name), Some("c"));
    assert_eq!(buffer.serialize(), original);

    buffer.insert_char(1, 0, b' ');
    let written = buffer.save().unwrap();
    assert_eq!(written, original.len() + 1);
    assert_eq!(buffer.dirty(), 0);
    assert_eq!(fs::read(&path).unwrap().len(), written);
}

#[test]
fn test_save_truncates_longer_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "a much longer line\nand another\n").unwrap();

    let mut buffer = Buffer::open(&path, &SyntaxRegistry::builtin(), 4).unwrap();
    buffer.delete_row(1);
    buffer.delete_row(0);
    buffer.insert_row(0, b"ok");
    assert_eq!(buffer.save().unwrap(), 3);
    assert_eq!(fs::read(&path).unwrap(), b"ok\n");
}

#[test]
fn test_missing_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.rs");

    let buffer = Buffer::open(&path, &SyntaxRegistry::builtin(), 4).unwrap();
    assert!(buffer.is_empty());
    assert_eq!(buffer.dirty(), 0);
    assert_eq!(buffer.filename(), Some(path.as_path()));
    assert_eq!(buffer.syntax().map(|s| s.name), Some("rust"));
    assert!(!path.exists());
}

#[test]
fn test_unreadable_path_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Buffer::open(dir.path(), &SyntaxRegistry::builtin(), 4).unwrap_err();
    assert!(matches!(err, KiloError::Open { .. }));
}

#[test]
fn test_carriage_returns_are_stripped_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dos.c");
    fs::write(&path, b"a\r\nb\r").unwrap();

    let buffer = Buffer::open(&path, &SyntaxRegistry::builtin(), 4).unwrap();
    assert_eq!(buffer.row(0).unwrap().chars(), b"a\r");
    assert_eq!(buffer.row(0).unwrap().highlight()[1], Highlight::NonPrint);
    assert_eq!(buffer.row(1).unwrap().chars(), b"b");
}

#[test]
fn test_failed_save_keeps_dirty_counter() {
    let dir = tempfile::tempdir().unwrap();
    let mut buffer = Buffer::from_lines(["x"], None);
    buffer.set_filename(dir.path().join("missing").join("file.txt"));
    buffer.insert_char(0, 1, b'y');

    let err = buffer.save().unwrap_err();
    assert!(matches!(err, KiloError::Save { .. }));
    assert_eq!(buffer.dirty(), 1);
}
