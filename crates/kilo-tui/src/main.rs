//! Terminal front end for kilo
//!
//! Decodes crossterm key events into kilo-core commands and draws the editor snapshot with
//! ratatui.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p kilo-tui -- <file_path>
//! ```
//!
//! `KILO_TAB_STOP` and `KILO_QUIT_TIMES` override the defaults.
//!
//! # Keys
//!
//! - Arrows: move the cursor
//! - PageUp/PageDown: scroll one screen
//! - Backspace/Delete/Ctrl+H: delete backward
//! - Enter: insert a newline
//! - Ctrl+S: save
//! - Ctrl+F: find (arrows for next/previous, Enter to accept, Esc to cancel)
//! - Ctrl+Q: quit

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use kilo_core::{
    Cell, Direction as Move, DisplayColor, Editor, EditorCommand, EditorConfig, EditorFlow,
    Highlight, ScreenSnapshot, highlight::is_printable,
};
use kilo_lang::SyntaxRegistry;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::{
    env,
    io::{self, stdout},
    path::PathBuf,
    process,
    time::Duration,
};

/// Rows reserved below the text area: status bar and message bar.
const BAR_ROWS: u16 = 2;

fn text_area_size(cols: u16, rows: u16) -> (usize, usize) {
    (rows.saturating_sub(BAR_ROWS) as usize, cols as usize)
}

/// Map a key press to the commands it stands for.
fn commands_for_key(key: KeyEvent) -> Vec<EditorCommand> {
    let command = match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => EditorCommand::Save,
        (KeyModifiers::CONTROL, KeyCode::Char('f')) => EditorCommand::Find,
        (KeyModifiers::CONTROL, KeyCode::Char('q')) => EditorCommand::Quit,
        (KeyModifiers::CONTROL, KeyCode::Char('h')) => EditorCommand::DeleteBackward,
        (_, KeyCode::Backspace | KeyCode::Delete) => EditorCommand::DeleteBackward,
        (_, KeyCode::Enter) => EditorCommand::InsertNewline,
        (_, KeyCode::Esc) => EditorCommand::Cancel,
        (_, KeyCode::Left) => EditorCommand::Move(Move::Left),
        (_, KeyCode::Right) => EditorCommand::Move(Move::Right),
        (_, KeyCode::Up) => EditorCommand::Move(Move::Up),
        (_, KeyCode::Down) => EditorCommand::Move(Move::Down),
        (_, KeyCode::PageUp) => EditorCommand::PageUp,
        (_, KeyCode::PageDown) => EditorCommand::PageDown,
        (_, KeyCode::Tab) => EditorCommand::InsertChar(b'\t'),
        (mods, KeyCode::Char(c))
            if !mods.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let mut buf = [0u8; 4];
            return c
                .encode_utf8(&mut buf)
                .bytes()
                .map(EditorCommand::InsertChar)
                .collect();
        }
        _ => return Vec::new(),
    };
    vec![command]
}

fn color_for(hl: Highlight) -> Option<Color> {
    match hl.color() {
        DisplayColor::Default => None,
        DisplayColor::Cyan => Some(Color::Cyan),
        DisplayColor::Yellow => Some(Color::Yellow),
        DisplayColor::Green => Some(Color::Green),
        DisplayColor::Magenta => Some(Color::Magenta),
        DisplayColor::Red => Some(Color::Red),
        DisplayColor::Blue => Some(Color::Blue),
    }
}

fn style_for(cell: &Cell) -> Style {
    if !is_printable(cell.ch) {
        return Style::default().add_modifier(Modifier::REVERSED);
    }
    match color_for(cell.hl) {
        Some(fg) => Style::default().fg(fg),
        None => Style::default(),
    }
}

/// Group runs of equally styled cells into spans.
fn line_for(cells: &[Cell]) -> Line<'static> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for cell in cells {
        let style = style_for(cell);
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(cell.glyph());
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

fn status_line(snapshot: &ScreenSnapshot, width: usize) -> Line<'static> {
    let left = &snapshot.status_left;
    let right = &snapshot.status_right;
    let mut text = left.chars().take(width).collect::<String>();
    let used = text.chars().count();
    if used + right.len() <= width {
        text.push_str(&" ".repeat(width - used - right.len()));
        text.push_str(right);
    } else {
        text.push_str(&" ".repeat(width - used));
    }
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::REVERSED),
    ))
}

fn render(frame: &mut Frame, snapshot: &ScreenSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let lines: Vec<Line> = snapshot.lines.iter().map(|cells| line_for(cells)).collect();
    frame.render_widget(Paragraph::new(lines), chunks[0]);
    frame.render_widget(
        Paragraph::new(status_line(snapshot, chunks[1].width as usize)),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(snapshot.message.clone().unwrap_or_default()),
        chunks[2],
    );

    let (row, col) = snapshot.cursor;
    frame.set_cursor_position(Position::new(
        chunks[0].x + col as u16,
        chunks[0].y + row as u16,
    ));
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <filename>", args[0]);
        process::exit(1);
    }
    let file_path = PathBuf::from(&args[1]);

    let (cols, rows) = terminal::size()?;
    let (screen_rows, screen_cols) = text_area_size(cols, rows);
    let config = EditorConfig::default()
        .with_env()
        .with_screen_size(screen_rows, screen_cols);

    let mut editor = match Editor::open(&file_path, &SyntaxRegistry::builtin(), config) {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut editor);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    editor: &mut Editor,
) -> io::Result<()> {
    loop {
        let snapshot = editor.snapshot();
        terminal.draw(|f| render(f, &snapshot))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                for command in commands_for_key(key) {
                    if editor.execute(command) == EditorFlow::Quit {
                        return Ok(());
                    }
                }
            }
            Event::Resize(cols, rows) => {
                let (screen_rows, screen_cols) = text_area_size(cols, rows);
                editor.resize(screen_rows, screen_cols);
            }
            _ => {}
        }
    }
}
