//! Full-screen task board

use crate::task::TaskStatus;
use crate::task_list::TaskList;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Write};

const COLUMNS: [TaskStatus; 2] = [TaskStatus::Pending, TaskStatus::Completed];

#[derive(Debug, Default)]
pub struct BoardState {
    pub selected_status: usize,
    pub selected_task: usize,
    pub message: Option<String>,
}

impl BoardState {
    fn column_len(&self, list: &TaskList) -> usize {
        list.get_tasks_by_status(COLUMNS[self.selected_status]).len()
    }

    fn clamp_selection(&mut self, list: &TaskList) {
        let len = self.column_len(list);
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }
}

pub fn draw_board(f: &mut Frame, list: &TaskList, board: &BoardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    for (i, status) in COLUMNS.iter().enumerate() {
        let tasks = list.get_tasks_by_status(*status);
        let items: Vec<ListItem> = tasks
            .iter()
            .map(|(position, t)| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{}. ", position)),
                    Span::styled(t.title.as_str(), Style::default().fg(Color::White)),
                    Span::raw(format!(" (Due: {})", t.due_date)),
                ]))
            })
            .collect();

        let focused = board.selected_status == i;
        let title = format!("{} ({})", status, tasks.len());
        let column = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(if focused {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    }),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if focused && !tasks.is_empty() {
            state.select(Some(board.selected_task));
        }
        f.render_stateful_widget(column, chunks[i], &mut state);
    }

    let footer = board
        .message
        .clone()
        .unwrap_or_else(|| "←/→ column  ↑/↓ task  Enter toggle  q back".to_string());
    f.render_widget(Paragraph::new(footer), rows[1]);
}

pub fn run_board<B: Backend>(terminal: &mut Terminal<B>, list: &mut TaskList) -> io::Result<()> {
    let mut board = BoardState::default();
    loop {
        terminal.draw(|f| draw_board(f, list, &board))?;

        if let Event::Key(key) = event::read()? {
            if handle_key(&mut board, list, key) {
                return Ok(());
            }
        }
    }
}

/// Apply one key press to the board. Returns true when the board should close.
fn handle_key(board: &mut BoardState, list: &mut TaskList, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        // Raw mode delivers Ctrl+C as a key instead of SIGINT.
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Left => {
            if board.selected_status > 0 {
                board.selected_status -= 1;
                board.clamp_selection(list);
            }
        }
        KeyCode::Right => {
            if board.selected_status < COLUMNS.len() - 1 {
                board.selected_status += 1;
                board.clamp_selection(list);
            }
        }
        KeyCode::Up => {
            if board.selected_task > 0 {
                board.selected_task -= 1;
            }
        }
        KeyCode::Down => {
            if board.selected_task + 1 < board.column_len(list) {
                board.selected_task += 1;
            }
        }
        KeyCode::Enter => {
            board.message = toggle_selected(list, board);
            board.clamp_selection(list);
        }
        _ => {}
    }
    false
}

/// Flip the highlighted task. Returns a footer message on failure.
fn toggle_selected(list: &mut TaskList, board: &BoardState) -> Option<String> {
    let position = list
        .get_tasks_by_status(COLUMNS[board.selected_status])
        .get(board.selected_task)
        .map(|(position, _)| *position)?;

    list.toggle(position).err().map(|e| e.to_string())
}

/// Undoes raw mode and the alternate screen when dropped, even if setup
/// failed halfway.
struct TerminalGuard<W: Write> {
    writer: W,
    raw: bool,
}

impl<W: Write> TerminalGuard<W> {
    fn new(writer: W) -> Self {
        Self { writer, raw: false }
    }

    fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        self.raw = true;
        execute!(self.writer, EnterAlternateScreen)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.raw {
            let _ = disable_raw_mode();
        }
        let _ = execute!(self.writer, LeaveAlternateScreen, Show);
    }
}

/// Take over the terminal, show the board, and restore the terminal.
pub fn show_board(list: &mut TaskList) -> io::Result<()> {
    let mut guard = TerminalGuard::new(io::stdout());
    guard.enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    run_board(&mut terminal, list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_store::RecordStore;
    use ratatui::backend::TestBackend;
    use tempfile::tempdir;

    fn render_to_string(list: &TaskList, board: &BoardState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw_board(f, list, board)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut lines = Vec::new();
        for y in 0..height {
            let mut line = String::new();
            for x in 0..width {
                line.push_str(buffer[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    #[test]
    fn board_splits_tasks_by_status() {
        let temp = tempdir().unwrap();
        let mut list = TaskList::open(RecordStore::new(temp.path().join("tasks.json")));
        list.add("Write report", "2024-05-01").unwrap();
        list.add("Pay rent", "2024-05-03").unwrap();
        list.toggle(2).unwrap();

        let output = render_to_string(&list, &BoardState::default(), 80, 8);
        let first_task_line = output.lines().find(|l| l.contains("Write report")).unwrap();
        let done_line = output.lines().find(|l| l.contains("Pay rent")).unwrap();

        assert!(output.contains("Pending (1)"), "{output}");
        assert!(output.contains("Completed (1)"), "{output}");
        assert!(first_task_line.find("Write report") < Some(40));
        assert!(done_line.find("Pay rent") > Some(40));
    }

    #[test]
    fn board_footer_shows_message() {
        let temp = tempdir().unwrap();
        let list = TaskList::open(RecordStore::new(temp.path().join("tasks.json")));
        let board = BoardState {
            message: Some("Failed to save".to_string()),
            ..BoardState::default()
        };

        let output = render_to_string(&list, &board, 60, 6);
        assert!(output.lines().last().unwrap().starts_with("Failed to save"));
    }

    #[test]
    fn toggle_selected_moves_task_between_columns() {
        let temp = tempdir().unwrap();
        let mut list = TaskList::open(RecordStore::new(temp.path().join("tasks.json")));
        list.add("a", "2024-01-01").unwrap();
        list.add("b", "2024-01-02").unwrap();
        let board = BoardState {
            selected_task: 1,
            ..BoardState::default()
        };

        assert_eq!(toggle_selected(&mut list, &board), None);
        assert_eq!(list.tasks()[1].status, TaskStatus::Completed);
        assert_eq!(list.tasks()[0].status, TaskStatus::Pending);
    }

    #[test]
    fn toggle_selected_on_empty_column_is_noop() {
        let temp = tempdir().unwrap();
        let mut list = TaskList::open(RecordStore::new(temp.path().join("tasks.json")));
        let board = BoardState {
            selected_status: 1,
            ..BoardState::default()
        };

        assert_eq!(toggle_selected(&mut list, &board), None);
        assert!(list.tasks().is_empty());
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_c_closes_board() {
        let temp = tempdir().unwrap();
        let mut list = TaskList::open(RecordStore::new(temp.path().join("tasks.json")));
        let mut board = BoardState::default();

        assert!(handle_key(&mut board, &mut list, press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(handle_key(&mut board, &mut list, press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!handle_key(&mut board, &mut list, press(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn enter_key_toggles_selected_task() {
        let temp = tempdir().unwrap();
        let mut list = TaskList::open(RecordStore::new(temp.path().join("tasks.json")));
        list.add("a", "2024-01-01").unwrap();
        let mut board = BoardState::default();

        assert!(!handle_key(&mut board, &mut list, press(KeyCode::Enter, KeyModifiers::NONE)));
        assert_eq!(list.tasks()[0].status, TaskStatus::Completed);
        assert_eq!(board.message, None);
    }

    #[test]
    fn guard_restores_screen_without_entering() {
        let mut out = Vec::new();
        {
            let _guard = TerminalGuard::new(&mut out);
        }
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\u{1b}[?1049l"), "{written:?}");
        assert!(written.contains("\u{1b}[?25h"), "{written:?}");
    }
}
