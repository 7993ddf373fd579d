use kilo_core::{Buffer, Highlight, highlight_line};
use kilo_lang::C_SYNTAX;
use pretty_assertions::assert_eq;

use Highlight::{Keyword2, MlComment, Normal};

fn hl(buffer: &Buffer, row: usize) -> Vec<Highlight> {
    buffer.row(row).unwrap().highlight().to_vec()
}

#[test]
fn test_block_comment_across_three_rows() {
    let buffer = Buffer::from_lines(
        ["int x = 1; /* start", "still comment", "end */ int y;"],
        Some(&C_SYNTAX),
    );

    let row0 = hl(&buffer, 0);
    assert_eq!(&row0[..3], &[Keyword2; 3]);
    assert_eq!(&row0[11..], &[MlComment; 8]);
    assert!(buffer.row(0).unwrap().has_open_comment());

    assert_eq!(hl(&buffer, 1), vec![MlComment; 13]);

    let row2 = hl(&buffer, 2);
    assert_eq!(&row2[..6], &[MlComment; 6]);
    assert_eq!(&row2[7..10], &[Keyword2; 3]);
    assert_eq!(row2[11], Normal);
    assert!(!buffer.row(2).unwrap().has_open_comment());
}

#[test]
fn test_row_ending_on_closer_does_not_open_comment() {
    let buffer = Buffer::from_lines(["x /*/", "int y;"], Some(&C_SYNTAX));
    assert_eq!(&hl(&buffer, 0)[2..], &[MlComment; 3]);
    assert!(!buffer.row(0).unwrap().has_open_comment());
    assert_eq!(&hl(&buffer, 1)[..3], &[Keyword2; 3]);
    assert_eq!(hl(&buffer, 1)[5], Normal);
}

#[test]
fn test_propagation_touches_exactly_the_comment_span() {
    let lines = ["a", "b", "c", "d */", "e", "f"];
    let mut buffer = Buffer::from_lines(lines, Some(&C_SYNTAX));
    let before: Vec<_> = (0..buffer.len()).map(|r| hl(&buffer, r)).collect();

    // Open a comment on row 1; it closes on row 3.
    buffer.insert_char(1, 1, b'/');
    buffer.insert_char(1, 2, b'*');

    assert_eq!(buffer.last_highlight(), Some(1..4));
    assert_eq!(hl(&buffer, 2), [MlComment]);
    assert_eq!(&hl(&buffer, 3)[..4], &[MlComment; 4]);
    assert_eq!(hl(&buffer, 0), before[0]);
    assert_eq!(hl(&buffer, 4), before[4]);
    assert_eq!(hl(&buffer, 5), before[5]);

    // Removing the opener restores the rows below.
    buffer.row_delete_char(1, 2);
    assert_eq!(buffer.last_highlight(), Some(1..4));
    assert_eq!(hl(&buffer, 2), before[2]);
}

#[test]
fn test_unterminated_comment_runs_to_end_of_buffer() {
    let lines: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
    let mut buffer = Buffer::from_lines(&lines, Some(&C_SYNTAX));
    buffer.insert_row(10, b"/*");

    assert_eq!(buffer.last_highlight(), Some(10..101));
    assert!(
        buffer.rows()[11..]
            .iter()
            .all(|r| r.highlight().iter().all(|&h| h == MlComment))
    );
}

#[test]
fn test_structural_edits_reseed_following_rows() {
    let mut buffer = Buffer::from_lines(["x /*", "y", "z */ w"], Some(&C_SYNTAX));
    assert_eq!(hl(&buffer, 1), [MlComment]);

    // Joining "y" onto the opener keeps it inside the comment.
    buffer.delete_char(1, 0);
    assert_eq!(buffer.row(0).unwrap().chars(), b"x /*y");
    assert_eq!(hl(&buffer, 1)[..4], [MlComment; 4]);

    // Splitting before the opener moves it to the next row.
    buffer.newline(0, 2);
    assert_eq!(hl(&buffer, 0), [Normal, Normal]);
    assert_eq!(hl(&buffer, 1), [Normal, MlComment, MlComment, MlComment]);
    assert_eq!(hl(&buffer, 2)[..4], [MlComment; 4]);
    assert_eq!(hl(&buffer, 2)[5], Normal);
}

#[test]
fn test_secondary_keyword_needs_trailing_separator() {
    let buffer = Buffer::from_lines(["int;", "integer", "int"], Some(&C_SYNTAX));
    assert_eq!(hl(&buffer, 0), [Keyword2, Keyword2, Keyword2, Normal]);
    assert_eq!(hl(&buffer, 1), vec![Normal; 7]);
    assert_eq!(hl(&buffer, 2), vec![Keyword2; 3]);
}

#[test]
fn test_rehighlight_is_idempotent() {
    let render = b"  return (a + 0.5) * 'c'; // done";
    let first = highlight_line(render, false, Some(&C_SYNTAX));
    let second = highlight_line(render, false, Some(&C_SYNTAX));
    assert_eq!(first, second);

    let mut buffer = Buffer::from_lines(["/* a", "b */ int c;"], Some(&C_SYNTAX));
    let stored = hl(&buffer, 1);
    buffer.set_syntax(Some(&C_SYNTAX));
    assert_eq!(hl(&buffer, 1), stored);
}

#[test]
fn test_switching_syntax_off_clears_classes() {
    let mut buffer = Buffer::from_lines(["/* int */"], Some(&C_SYNTAX));
    buffer.set_syntax(None);
    assert_eq!(hl(&buffer, 0), vec![Normal; 9]);
    assert!(!buffer.row(0).unwrap().has_open_comment());
}

#[test]
fn test_match_overlay_never_touches_stored_classes() {
    let mut buffer = Buffer::from_lines(["int value;"], Some(&C_SYNTAX));
    let stored = hl(&buffer, 0);

    buffer.set_match_overlay(0, 0..3);
    let shown = buffer.display_highlight(0).unwrap();
    assert_eq!(&shown[..3], &[Highlight::Match; 3]);
    assert_eq!(hl(&buffer, 0), stored);

    buffer.clear_match_overlay();
    assert_eq!(buffer.display_highlight(0).unwrap().to_vec(), stored);
}
