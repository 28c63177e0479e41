//! TUI (Terminal User Interface) module for Biz Wordle
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Layout
//! Title, search box, a dropdown of matching companies while typing, the
//! results table, an information panel and a key-help line. The
//! instructions open as a popup over everything else.
//!
//! # State Machine
//! - `Searching`: typing filters candidates, ENTER submits the selected one
//! - `GameOver`: entered once the session is won, lost or given up; `N` starts over
//!
//! The state is re-derived from the session every time the game loop asks for input.

use crate::dataset::CompanyRecord;
use crate::error::{ClipboardError, SessionError};
use crate::evaluator::{Field, FieldResults};
use crate::game_state::{GameInterface, UserAction, game_over_message};
use crate::search::{best_candidate, filter_candidates};
use crate::session::Session;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};
use std::io;

const MAX_CANDIDATES_DISPLAY: usize = 10;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const MATCH_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Green);
const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Searching,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BoardCell {
    text: String,
    matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BoardRow {
    name: String,
    cells: Vec<BoardCell>,
}

impl BoardRow {
    fn from_results(guess: &CompanyRecord, results: &FieldResults) -> Self {
        let cells = results
            .iter()
            .map(|r| {
                let mut text = r.field.value(guess);
                if let Some(hint) = r.hint {
                    text.push(' ');
                    text.push(hint.arrow());
                }
                BoardCell {
                    text,
                    matched: r.matched,
                }
            })
            .collect();
        Self {
            name: guess.name.clone(),
            cells,
        }
    }
}

/// Snapshot of the session taken whenever the game loop hands one over.
#[derive(Debug, Default)]
struct SessionView {
    board: Vec<BoardRow>,
    guess_count: usize,
    max_guesses: usize,
    can_give_up: bool,
    target: String,
    summary: String,
}

/// Query, matching candidates and the highlighted row of the search dropdown.
#[derive(Debug, Default)]
struct SearchBox {
    query: String,
    candidates: Vec<String>,
    selected: usize,
}

impl SearchBox {
    fn refresh(&mut self, session: &Session) {
        let guessed = session.guessed_names();
        let matches = filter_candidates(&self.query, session.dataset(), &guessed);
        self.selected = best_candidate(&self.query, &matches)
            .and_then(|best| matches.iter().position(|c| c.name == best.name))
            .unwrap_or(0);
        self.candidates = matches.iter().map(|c| c.name.clone()).collect();
        debug_log!(
            "SearchBox::refresh() - '{}' -> {} matches",
            self.query,
            self.candidates.len()
        );
    }

    fn clear(&mut self) {
        self.query.clear();
        self.candidates.clear();
        self.selected = 0;
    }
}

/// Applies a key pressed while searching. `Err` carries a notice for the player.
fn handle_search_key(
    search: &mut SearchBox,
    key: KeyEvent,
    session: &Session,
) -> Result<Option<UserAction>, &'static str> {
    match key.code {
        KeyCode::Char(c) => {
            if has_modifier_keys(&key) {
                debug_log!(
                    "handle_search_key() - Ignoring character with modifier: {:?}",
                    key.modifiers
                );
            } else {
                search.query.push(c);
                search.refresh(session);
            }
        }
        KeyCode::Backspace if !search.query.is_empty() => {
            search.query.pop();
            search.refresh(session);
        }
        KeyCode::Up => {
            search.selected = search.selected.saturating_sub(1);
        }
        KeyCode::Down if search.selected + 1 < search.candidates.len() => {
            search.selected += 1;
        }
        KeyCode::Enter => {
            let Some(name) = search.candidates.get(search.selected).cloned() else {
                return Err("No matching company to guess");
            };
            info_log!("handle_search_key() - Guessing '{}'", name);
            search.clear();
            return Ok(Some(UserAction::Guess(name)));
        }
        KeyCode::F(1) => return Ok(Some(UserAction::ToggleInstructions)),
        KeyCode::F(2) => {
            if session.can_give_up() {
                return Ok(Some(UserAction::GiveUp));
            }
            return Err("Make at least one guess before giving up");
        }
        KeyCode::Esc => {
            info_log!("handle_search_key() - ESC pressed, returning Exit");
            return Ok(Some(UserAction::Exit));
        }
        _ => {
            debug_log!("handle_search_key() - Ignoring key: {:?}", key.code);
        }
    }
    Ok(None)
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(event::KeyModifiers::ALT)
        || key.modifiers.contains(event::KeyModifiers::CONTROL)
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: &'a SessionView,
    state: TuiState,
    query: &'a str,
    candidates: &'a [String],
    selected: usize,
    show_instructions: bool,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: SessionView,
    state: TuiState,
    search: SearchBox,
    show_instructions: bool,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            view: SessionView::default(),
            state: TuiState::Searching,
            search: SearchBox::default(),
            show_instructions: false,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: &self.view,
            state: self.state,
            query: &self.search.query,
            candidates: &self.search.candidates,
            selected: self.search.selected,
            show_instructions: self.show_instructions,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn sync(&mut self, session: &Session) {
        self.view = SessionView {
            board: session
                .evaluations()
                .map(|(guess, results)| BoardRow::from_results(guess, &results))
                .collect(),
            guess_count: session.guesses().len(),
            max_guesses: session.max_guesses(),
            can_give_up: session.can_give_up(),
            target: session.target().name.clone(),
            summary: game_over_message(session),
        };
        self.state = if session.status().is_over() {
            TuiState::GameOver
        } else {
            TuiState::Searching
        };
    }

    /// Render the complete UI layout using the provided context.
    #[allow(clippy::cast_possible_truncation)]
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let dropdown_height = if ctx.candidates.is_empty() {
            0
        } else {
            ctx.candidates.len().min(MAX_CANDIDATES_DISPLAY) as u16 + 2
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),               // Title
                Constraint::Length(3),               // Search / summary
                Constraint::Length(dropdown_height), // Candidates
                Constraint::Min(6),                  // Results table
                Constraint::Length(5),               // Info panel
                Constraint::Length(3),               // Status line
                Constraint::Length(3),               // Key help
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        match ctx.state {
            TuiState::Searching => Self::render_search(f, chunks[1], ctx.query),
            TuiState::GameOver => Self::render_summary(f, chunks[1], ctx.view),
        }
        if dropdown_height > 0 {
            Self::render_candidates(f, chunks[2], ctx.candidates, ctx.selected);
        }
        Self::render_board(f, chunks[3], &ctx.view.board);
        Self::render_info(f, chunks[4], ctx);
        Self::render_status(f, chunks[5], ctx.status);
        Self::render_key_help(f, chunks[6], ctx.state, ctx.view.can_give_up);

        if ctx.show_instructions {
            Self::render_instructions_popup(f, ctx.view.max_guesses);
        }
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("BIZ WORDLE")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_search(f: &mut Frame, area: Rect, query: &str) {
        let line = if query.is_empty() {
            Line::from(Span::styled(
                "Start typing to guess a business...",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(vec![Span::raw(query.to_string()), Span::styled("_", INFO_STYLE)])
        };
        let paragraph =
            Paragraph::new(line).block(Block::default().title("Search").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_summary(f: &mut Frame, area: Rect, view: &SessionView) {
        let line = Line::from(vec![
            Span::raw("The mystery business was: "),
            Span::styled(view.target.clone(), SUCCESS_STYLE),
            Span::raw(format!("  {}", view.summary)),
        ]);
        let paragraph =
            Paragraph::new(line).block(Block::default().title("Game Over").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_candidates(f: &mut Frame, area: Rect, candidates: &[String], selected: usize) {
        let items: Vec<ListItem> = candidates
            .iter()
            .map(|name| ListItem::new(name.as_str()))
            .collect();
        let title = if candidates.len() > MAX_CANDIDATES_DISPLAY {
            format!("Matches ({})", candidates.len())
        } else {
            "Matches".to_string()
        };
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(SELECTED_STYLE);
        let mut state = ListState::default().with_selected(Some(selected));
        f.render_stateful_widget(list, area, &mut state);
    }

    fn render_board(f: &mut Frame, area: Rect, board: &[BoardRow]) {
        let mut header = vec![Cell::from("Name")];
        header.extend(Field::ALL.iter().map(|field| Cell::from(field.label())));

        let rows: Vec<Row> = board
            .iter()
            .map(|row| {
                let mut cells = vec![Cell::from(row.name.clone())];
                cells.extend(row.cells.iter().map(|cell| {
                    let style = if cell.matched {
                        MATCH_STYLE
                    } else {
                        Style::default()
                    };
                    Cell::from(cell.text.clone()).style(style)
                }));
                Row::new(cells)
            })
            .collect();

        let widths = [
            Constraint::Percentage(18),
            Constraint::Percentage(16),
            Constraint::Percentage(12),
            Constraint::Percentage(16),
            Constraint::Percentage(16),
            Constraint::Percentage(22),
        ];
        let table = Table::new(rows, widths)
            .header(Row::new(header).style(HEADER_STYLE))
            .column_spacing(1)
            .block(Block::default().title("Guesses").borders(Borders::ALL));
        f.render_widget(table, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = vec![Line::from(Span::styled(
            format!("Guesses: {}/{}", ctx.view.guess_count, ctx.view.max_guesses),
            INFO_STYLE,
        ))];

        if !ctx.message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.message, MESSAGE_STYLE)));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_key_help(f: &mut Frame, area: Rect, state: TuiState, can_give_up: bool) {
        let text = match state {
            TuiState::Searching if can_give_up => {
                "Type to search | UP/DOWN: Select | ENTER: Guess | F2: Give up | F1: Help | ESC: Quit"
            }
            TuiState::Searching => {
                "Type to search | UP/DOWN: Select | ENTER: Guess | F1: Help | ESC: Quit"
            }
            TuiState::GameOver => "S: Share results | N: New Game | F1: Help | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions_popup(f: &mut Frame, max_guesses: usize) {
        let area = centered_rect(70, 50, f.area());
        let labels: Vec<&str> = Field::ALL.iter().map(|field| field.label()).collect();
        let lines = vec![
            Line::from(Span::styled("How to play", HEADER_STYLE)),
            Line::from(""),
            Line::from(format!(
                "Guess the mystery business in {max_guesses} tries or less!"
            )),
            Line::from(format!("Each guess is compared on: {}.", labels.join(", "))),
            Line::from(vec![
                Span::styled(" Green ", MATCH_STYLE),
                Span::raw(" cells indicate a match with the mystery business."),
            ]),
            Line::from(
                "For numeric values, arrows indicate if the mystery business's value is higher (↑) or lower (↓).",
            ),
            Line::from(""),
            Line::from(Span::styled("Press any key to start", INFO_STYLE)),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Instructions").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(Clear, area);
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self, session: &Session) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let event = event::read()?;
        debug_log!("handle_input() - Event received: {:?}", event);

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if self.show_instructions {
                    self.show_instructions = false;
                    return Ok(None);
                }
                match self.state {
                    TuiState::Searching => Ok(self.handle_search_input(key, session)),
                    TuiState::GameOver => Ok(Self::handle_game_over_input(key)),
                }
            }
            _ => Ok(None),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent, session: &Session) -> Option<UserAction> {
        self.error_message.clear();
        match handle_search_key(&mut self.search, key, session) {
            Ok(action) => action,
            Err(notice) => {
                self.error_message = notice.to_string();
                None
            }
        }
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('s' | 'S') => Some(UserAction::Share),
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::F(1) => Some(UserAction::ToggleInstructions),
            KeyCode::Esc => Some(UserAction::Exit),
            _ => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_instructions(&mut self, max_guesses: usize) {
        self.view.max_guesses = max_guesses;
        self.show_instructions = !self.show_instructions;
        self.draw_or_log();
    }

    fn read_action(&mut self, session: &Session) -> Option<UserAction> {
        self.sync(session);
        self.status = match self.state {
            TuiState::Searching => "Waiting for guess...".to_string(),
            TuiState::GameOver => format!("Game Over - {}", self.view.target),
        };
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input(session) {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(_e) => {
                    info_log!("read_action() - Error handling input, returning Exit");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_board(&mut self, session: &Session) {
        self.sync(session);
        if let Some(last) = session.guesses().last() {
            self.message = format!("Guessed {}", last.name);
        }
        self.draw_or_log();
    }

    fn display_rejection(&mut self, error: &SessionError) {
        self.error_message = error.to_string();
        self.draw_or_log();
    }

    fn display_unknown_company(&mut self, name: &str) {
        self.error_message = format!("Unknown company: {name}");
        self.draw_or_log();
    }

    fn display_game_over(&mut self, session: &Session) {
        self.sync(session);
        self.search.clear();
        self.message = game_over_message(session);
        self.status = format!("Game Over - {}", session.target().name);
        self.draw_or_log();
    }

    fn display_share_result(&mut self, _text: &str, result: &Result<(), ClipboardError>) {
        match result {
            Ok(()) => {
                self.message = "Results copied to clipboard!".to_string();
                self.error_message.clear();
            }
            Err(_) => {
                self.error_message = "Failed to copy results. Please try again.".to_string();
            }
        }
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, company_count: usize) {
        self.search.clear();
        self.view.board.clear();
        self.view.guess_count = 0;
        self.state = TuiState::Searching;
        self.message = format!("New game started. Pick from {company_count} companies.");
        self.status = "New game - Enter your first guess".to_string();
        self.error_message.clear();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// A rectangle of the given percentage size centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
