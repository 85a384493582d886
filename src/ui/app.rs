//! Main TUI application state and logic

use crate::diagnostics::Diagnostics;
use crate::parser::ast::Expr;
use crate::parser::lexer::{tokenize, Token};
use crate::parser::parse::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tokens,
    Tree,
    Diagnostics,
}

impl FocusedPane {
    /// Move focus to the next pane (tokens -> tree -> diagnostics)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Tokens,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Tokens => FocusedPane::Diagnostics,
            FocusedPane::Tree => FocusedPane::Tokens,
            FocusedPane::Diagnostics => FocusedPane::Tree,
        }
    }
}

/// Result of one lex/parse cycle over the input line
#[derive(Debug, Clone)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    /// Present only when no diagnostics were recorded
    pub tree: Option<Expr>,
    pub diagnostics: Diagnostics,
}

impl Analysis {
    pub fn of(source: &str) -> Self {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut diagnostics);
        let result = Parser::new(tokens.clone(), &mut diagnostics).parse();
        let tree = match result {
            Ok(expr) if !diagnostics.had_error() => Some(expr),
            _ => None,
        };

        Analysis {
            tokens,
            tree,
            diagnostics,
        }
    }
}

/// The main application state
pub struct App {
    /// The expression being edited
    pub input: String,

    /// Cursor position in `input`, counted in chars
    pub cursor: usize,

    /// Tokens, tree and diagnostics for the current input
    pub analysis: Analysis,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub tokens_scroll: usize,
    pub tree_scroll: usize,
    pub diagnostics_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app with `input` preloaded
    pub fn new(input: String) -> Self {
        let cursor = input.chars().count();
        let analysis = Analysis::of(&input);
        App {
            input,
            cursor,
            analysis,
            focused_pane: FocusedPane::Tree,
            tokens_scroll: 0,
            tree_scroll: 0,
            diagnostics_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Input on top, panes in the middle, printed form and status bar at the bottom
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);

        // Right column: Tree (top) | Diagnostics (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        super::panes::render_tokens_pane(
            frame,
            columns[0],
            &self.analysis.tokens,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            right_rows[0],
            self.analysis.tree.as_ref(),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_diagnostics_pane(
            frame,
            right_rows[1],
            &self.analysis.diagnostics,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        super::panes::render_printed_pane(frame, rows[2], self.analysis.tree.as_ref());

        super::panes::render_status_bar(
            frame,
            rows[3],
            &self.status_message,
            self.analysis.diagnostics.len(),
        );

        // Drawn last so the terminal cursor ends up in the input line
        super::panes::render_input_pane(frame, rows[0], &self.input, self.cursor);
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c' | 'q') = key.code {
                self.should_quit = true;
            }
            return;
        }

        match key.code {
            KeyCode::Char(c) => {
                let at = self.byte_index();
                self.input.insert(at, c);
                self.cursor += 1;
                self.reanalyze();
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.input.remove(at);
                    self.reanalyze();
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.input.chars().count() {
                    let at = self.byte_index();
                    self.input.remove(at);
                    self.reanalyze();
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.input.chars().count());
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.input.chars().count();
            }
            KeyCode::Esc => {
                self.input.clear();
                self.cursor = 0;
                self.reanalyze();
                self.status_message = "Cleared".to_string();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
            FocusedPane::Diagnostics => &mut self.diagnostics_scroll,
        }
    }

    /// Byte offset of the cursor in `input`
    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map_or(self.input.len(), |(i, _)| i)
    }

    /// Rerun the lex/parse cycle after an edit
    fn reanalyze(&mut self) {
        self.analysis = Analysis::of(&self.input);
        self.status_message = match (&self.analysis.tree, self.analysis.diagnostics.len()) {
            (Some(_), _) => "Parsed".to_string(),
            (None, 1) => "1 error".to_string(),
            (None, n) => format!("{} errors", n),
        };
    }
}
