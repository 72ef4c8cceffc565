use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame, Terminal, TerminalOptions, Viewport,
};
use std::io;
use tracing::debug;

use crate::services::{filter_options, Prompter};

const MAX_VISIBLE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    Pending,
    Selected(usize),
    Cancelled,
}

/// Keyboard state of a fuzzy single-choice list.
pub struct Picker<'a> {
    options: &'a [String],
    query: String,
    matches: Vec<usize>,
    cursor: usize,
}

impl<'a> Picker<'a> {
    pub fn new(options: &'a [String]) -> Self {
        Self {
            options,
            query: String::new(),
            matches: (0..options.len()).collect(),
            cursor: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Indices into the options that match the query, best first.
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerEvent {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return PickerEvent::Cancelled,
            KeyCode::Char('c') if ctrl => return PickerEvent::Cancelled,
            KeyCode::Enter => {
                if let Some(&index) = self.matches.get(self.cursor) {
                    return PickerEvent::Selected(index);
                }
            }
            KeyCode::Up | KeyCode::BackTab => self.move_up(),
            KeyCode::Char('p') if ctrl => self.move_up(),
            KeyCode::Down | KeyCode::Tab => self.move_down(),
            KeyCode::Char('n') if ctrl => self.move_down(),
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                self.query.push(c);
                self.refilter();
            }
            _ => {}
        }
        PickerEvent::Pending
    }

    fn move_up(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        self.cursor = match self.cursor {
            0 => self.matches.len() - 1,
            n => n - 1,
        };
    }

    fn move_down(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.matches.len();
    }

    fn refilter(&mut self) {
        self.matches = filter_options(self.options, &self.query);
        self.cursor = 0;
    }
}

/// Interactive picker drawn inline on stderr, so stdout stays clean for output.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, options: &[String]) -> io::Result<usize> {
        if options.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "nothing to choose from",
            ));
        }

        enable_raw_mode()?;
        let outcome = run_picker(message, options);
        disable_raw_mode()?;

        let index = outcome?;
        debug!(prompt = message, choice = %options[index], "picked option");
        eprintln!("? {message} {}", options[index]);
        Ok(index)
    }
}

fn run_picker(message: &str, options: &[String]) -> io::Result<usize> {
    let height = options.len().min(MAX_VISIBLE) as u16 + 1;
    let backend = CrosstermBackend::new(io::stderr());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )?;

    let mut picker = Picker::new(options);
    let outcome = loop {
        terminal.draw(|f| draw(f, message, &picker))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match picker.handle_key(key) {
                PickerEvent::Pending => {}
                PickerEvent::Selected(index) => break Ok(index),
                PickerEvent::Cancelled => {
                    break Err(io::Error::new(
                        io::ErrorKind::Interrupted,
                        "selection cancelled",
                    ))
                }
            }
        }
    };

    terminal.clear()?;
    outcome
}

fn draw(f: &mut Frame, message: &str, picker: &Picker) {
    let [prompt_area, list_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(f.area());

    let prompt = Line::from(vec![
        Span::styled("? ", Style::default().fg(Color::Green).bold()),
        Span::styled(message, Style::default().bold()),
        Span::raw(" "),
        Span::styled(picker.query(), Style::default().fg(Color::Cyan)),
    ]);
    f.render_widget(Paragraph::new(prompt), prompt_area);

    let items: Vec<ListItem> = picker
        .matches()
        .iter()
        .map(|&i| ListItem::new(picker.options[i].as_str()))
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(picker.cursor()));
    f.render_stateful_widget(list, list_area, &mut state);
}
