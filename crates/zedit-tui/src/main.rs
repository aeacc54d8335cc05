//! Terminal front-end for the zedit editor kernel.
//!
//! Built with crossterm and ratatui. All editing logic lives in
//! `zedit-core`; this binary decodes terminal events into [`EditorKey`]
//! values, feeds them to the session, and draws the buffer, status bar, and
//! message line.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p zedit-tui -- [options] [file]
//! ```
//!
//! # Key bindings
//!
//! - `c c` (quickly) or Enter: insert mode
//! - Esc: back to normal mode
//! - `v`: selection mode, `y`/`d`: copy/delete selection
//! - `:`: command mode (`:w`, `:q`, `:q!`, `:wq`, `:e <file>`)
//! - `h j k l` / arrows, `0`/`$`, Home/End, PageUp/PageDown: movement
//! - Ctrl+K / Ctrl+V: copy / paste
//! - Ctrl+Z / Ctrl+Y: undo / redo
//! - Ctrl+A: select all, Ctrl+H: help, Ctrl+Q: quit

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::{
    env,
    io::{self, stdout},
    path::PathBuf,
    process,
    time::{Duration, Instant},
};
use unicode_width::UnicodeWidthChar;
use zedit_core::{EditSession, EditorKey, KeyOutcome, Mode, Position, TAB_STOP};

/// How long a status message stays on screen.
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

struct App {
    session: EditSession,
    row_offset: usize,
    col_offset: usize,
    show_line_numbers: bool,
    should_quit: bool,
}

impl App {
    fn new(show_line_numbers: bool) -> Self {
        Self {
            session: EditSession::new(),
            row_offset: 0,
            col_offset: 0,
            show_line_numbers,
            should_quit: false,
        }
    }

    fn handle_key_event(&mut self, event: KeyEvent) {
        if event.kind == KeyEventKind::Release {
            return;
        }
        let Some(key) = map_key(event) else {
            return;
        };
        if self.session.process_key(key, Instant::now()) == KeyOutcome::Quit {
            self.should_quit = true;
        }
    }

    fn gutter_width(&self) -> usize {
        if !self.show_line_numbers {
            return 0;
        }
        let digits = self.session.buffer().line_count().max(1).ilog10() as usize + 1;
        digits + 1
    }

    /// Keep the cursor inside the visible window, adjusting the offsets.
    fn scroll(&mut self, text_rows: usize, text_cols: usize) {
        let cursor = self.session.cursor();
        if cursor.line < self.row_offset {
            self.row_offset = cursor.line;
        }
        if text_rows > 0 && cursor.line >= self.row_offset + text_rows {
            self.row_offset = cursor.line - text_rows + 1;
        }

        let visual_x = self
            .session
            .buffer()
            .row(cursor.line)
            .map(|row| row.visual_x(cursor.column, TAB_STOP))
            .unwrap_or(0);
        if visual_x < self.col_offset {
            self.col_offset = visual_x;
        }
        if text_cols > 0 && visual_x >= self.col_offset + text_cols {
            self.col_offset = visual_x - text_cols + 1;
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let text_area = chunks[0];
        let gutter = self.gutter_width();
        let text_cols = (text_area.width as usize).saturating_sub(gutter);
        self.session.set_page_rows(text_area.height as usize);
        self.scroll(text_area.height as usize, text_cols);

        self.render_text(frame, text_area, gutter, text_cols);
        self.render_status_bar(frame, chunks[1]);
        self.render_message_line(frame, chunks[2]);
        self.position_cursor(frame, text_area, gutter);
    }

    fn render_text(&self, frame: &mut Frame, area: Rect, gutter: usize, text_cols: usize) {
        let buffer = self.session.buffer();
        let line_count = buffer.line_count();
        let mut lines = Vec::with_capacity(area.height as usize);

        for screen_row in 0..area.height as usize {
            let file_row = self.row_offset + screen_row;
            if file_row >= line_count {
                if line_count == 0 && screen_row == area.height as usize / 3 {
                    lines.push(welcome_line(area.width as usize));
                } else {
                    lines.push(Line::from("~"));
                }
                continue;
            }

            let mut spans = Vec::new();
            if gutter > 0 {
                spans.push(Span::styled(
                    format!("{:>width$} ", file_row + 1, width = gutter - 1),
                    Style::default().add_modifier(Modifier::DIM),
                ));
            }
            spans.extend(self.row_spans(file_row, text_cols));
            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Expand one buffer row into styled spans, applying the horizontal
    /// offset and inverting selected runs.
    fn row_spans(&self, file_row: usize, text_cols: usize) -> Vec<Span<'static>> {
        let Some(row) = self.session.buffer().row(file_row) else {
            return Vec::new();
        };
        let selected_style = Style::default().add_modifier(Modifier::REVERSED);

        let mut spans = Vec::new();
        let mut run = String::new();
        let mut run_selected = false;
        let mut visual_x = 0usize;

        for (column, ch) in row.text().chars().enumerate() {
            let width = if ch == '\t' {
                TAB_STOP - (visual_x % TAB_STOP)
            } else {
                ch.width().unwrap_or(0)
            };
            let start = visual_x;
            visual_x += width;
            if visual_x <= self.col_offset {
                continue;
            }
            if start >= self.col_offset + text_cols {
                break;
            }

            let selected = self
                .session
                .selection()
                .contains(Position::new(file_row, column));
            if selected != run_selected && !run.is_empty() {
                let style = if run_selected {
                    selected_style
                } else {
                    Style::default()
                };
                spans.push(Span::styled(std::mem::take(&mut run), style));
            }
            run_selected = selected;
            if ch == '\t' {
                for _ in 0..width {
                    run.push(' ');
                }
            } else {
                run.push(ch);
            }
        }
        if !run.is_empty() {
            let style = if run_selected {
                selected_style
            } else {
                Style::default()
            };
            spans.push(Span::styled(run, style));
        }
        spans
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let session = &self.session;
        let name = session
            .filename()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "[No Name]".to_string());
        let dirty = if session.is_dirty() { " (modified)" } else { "" };
        let left = format!("{name} - {} lines{dirty}", session.buffer().line_count());

        let cursor = session.cursor();
        let percent = if session.buffer().line_count() == 0 {
            100
        } else {
            ((cursor.line + 1) * 100) / session.buffer().line_count()
        };
        let right = format!(
            "{} | {}:{} | {percent}%",
            session.mode().label(),
            cursor.line + 1,
            cursor.column + 1
        );

        let width = area.width as usize;
        let padding = width.saturating_sub(left.len() + right.len());
        let bar = format!("{left}{}{right}", " ".repeat(padding));
        frame.render_widget(
            Paragraph::new(bar).style(Style::default().add_modifier(Modifier::REVERSED)),
            area,
        );
    }

    fn render_message_line(&self, frame: &mut Frame, area: Rect) {
        let text = if self.session.mode() == Mode::Command {
            self.session.command_line().to_string()
        } else if self.session.status().since().elapsed() < STATUS_TIMEOUT {
            self.session.status().text().to_string()
        } else {
            String::new()
        };
        frame.render_widget(Paragraph::new(text), area);
    }

    fn position_cursor(&self, frame: &mut Frame, text_area: Rect, gutter: usize) {
        let cursor = self.session.cursor();
        let visual_x = self
            .session
            .buffer()
            .row(cursor.line)
            .map(|row| row.visual_x(cursor.column, TAB_STOP))
            .unwrap_or(0);
        let x = text_area.x
            + gutter as u16
            + visual_x.saturating_sub(self.col_offset) as u16;
        let y = text_area.y + cursor.line.saturating_sub(self.row_offset) as u16;
        frame.set_cursor_position(ratatui::layout::Position::new(x, y));
    }
}

fn welcome_line(width: usize) -> Line<'static> {
    let message = format!("zedit -- version {}", env!("CARGO_PKG_VERSION"));
    let padding = width.saturating_sub(message.len()) / 2;
    Line::from(format!("~{}{message}", " ".repeat(padding.saturating_sub(1))))
}

/// Decode a crossterm key event into the backend-independent key type.
fn map_key(event: KeyEvent) -> Option<EditorKey> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(c) = event.code {
            return Some(EditorKey::Ctrl(c.to_ascii_lowercase()));
        }
    }
    match event.code {
        KeyCode::Char(c) => Some(EditorKey::Char(c)),
        KeyCode::Tab => Some(EditorKey::Char('\t')),
        KeyCode::Enter => Some(EditorKey::Enter),
        KeyCode::Esc => Some(EditorKey::Esc),
        KeyCode::Backspace => Some(EditorKey::Backspace),
        KeyCode::Delete => Some(EditorKey::Delete),
        KeyCode::Left => Some(EditorKey::Left),
        KeyCode::Right => Some(EditorKey::Right),
        KeyCode::Up => Some(EditorKey::Up),
        KeyCode::Down => Some(EditorKey::Down),
        KeyCode::Home => Some(EditorKey::Home),
        KeyCode::End => Some(EditorKey::End),
        KeyCode::PageUp => Some(EditorKey::PageUp),
        KeyCode::PageDown => Some(EditorKey::PageDown),
        _ => None,
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} [options] [file]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -n, --line-numbers   show a line-number gutter");
    eprintln!("  -v, --version        print version and exit");
    eprintln!("  -h, --help           print this help and exit");
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let mut show_line_numbers = false;
    let mut file: Option<PathBuf> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "-n" | "--line-numbers" => show_line_numbers = true,
            "-v" | "--version" => {
                println!("zedit {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "-h" | "--help" => {
                print_usage(&args[0]);
                return Ok(());
            }
            _ if arg.starts_with('-') => {
                eprintln!("Unknown option: {arg}");
                print_usage(&args[0]);
                process::exit(1);
            }
            _ => file = Some(PathBuf::from(arg)),
        }
    }

    let mut app = App::new(show_line_numbers);
    if let Some(path) = file
        && let Err(err) = app.session.open_file(&path)
    {
        app.session
            .set_status(format!("Can't open {}: {err} (new file)", path.display()));
    }

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_map_key_basics() {
        assert_eq!(map_key(key(KeyCode::Char('a'))), Some(EditorKey::Char('a')));
        assert_eq!(map_key(key(KeyCode::Tab)), Some(EditorKey::Char('\t')));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(EditorKey::Esc));
        assert_eq!(map_key(key(KeyCode::F(1))), None);
    }

    #[test]
    fn test_map_key_control_chord_lowercases() {
        let event = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event), Some(EditorKey::Ctrl('q')));
    }
}
