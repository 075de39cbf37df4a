//! Ask module – the main submission screen
//!
//! Three-field form on the left (question ID, query, code), service
//! response on the right. Submissions run on a background thread and
//! get polled from the main loop, so the UI never blocks.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::mpsc;

use crate::types::FlashMessage;
use crate::ui::theme::Theme;
use crate::ui::widgets;

pub mod client;
pub mod controller;

use client::SubmitRequest;
use controller::{AskField, ResponseState, Submission};

pub struct AskState {
    pub submission: Submission,
    pub response_scroll: usize,
    pub flash_message: Option<FlashMessage>,
    /// Set when the user asks to run the submission; consumed by the
    /// app layer, which owns the configured endpoint
    pub submit_requested: bool,
    rx: Option<mpsc::Receiver<Result<String, String>>>,
}

impl AskState {
    pub fn new() -> Self {
        Self {
            submission: Submission::new(),
            response_scroll: 0,
            flash_message: None,
            submit_requested: false,
            rx: None,
        }
    }

    /// Start with piped stdin already loaded into the code field.
    pub fn new_with_code(code: String) -> Self {
        let mut state = Self::new();
        state.submission.form.code = code;
        state.flash_message = Some(FlashMessage::new(
            "Loaded piped input into Student Code".to_string(),
            false,
        ));
        state
    }

    /// Queue a flash message for display
    pub fn show_flash(&mut self, text: String, is_error: bool) {
        self.flash_message = Some(FlashMessage::new(text, is_error));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Clear expired flash
        if let Some(msg) = &self.flash_message {
            if msg.is_expired(3) {
                self.flash_message = None;
            }
        }

        // Ctrl shortcuts work from any field; plain chars go to the form
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('r') => {
                    if !self.submission.is_loading() {
                        self.submit_requested = true;
                    }
                }
                KeyCode::Char('y') => self.copy_response(),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.submission.form.active_field = self.submission.form.active_field.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.submission.form.active_field = self.submission.form.active_field.prev();
            }
            KeyCode::Enter => {
                // Enter submits from the single-line field and inserts a
                // newline in the multi-line ones
                if self.submission.form.active_field == AskField::QuestionId {
                    if !self.submission.is_loading() {
                        self.submit_requested = true;
                    }
                } else {
                    let field = self.submission.form.active_field;
                    self.submission.form.get_field_mut(field).push('\n');
                }
            }
            KeyCode::PageDown => {
                self.response_scroll = self.response_scroll.saturating_add(5);
            }
            KeyCode::PageUp => {
                self.response_scroll = self.response_scroll.saturating_sub(5);
            }
            KeyCode::Backspace => {
                let field = self.submission.form.active_field;
                self.submission.form.get_field_mut(field).pop();
            }
            KeyCode::Char(c) => {
                let field = self.submission.form.active_field;
                self.submission.form.get_field_mut(field).push(c);
            }
            _ => {}
        }

        Ok(())
    }

    /// Validate the form and, if it passes, send it to `endpoint` on a
    /// background thread.
    pub fn start_submit(&mut self, endpoint: &str) {
        let endpoint = endpoint.to_string();
        self.start_submit_with(move |request| client::submit(&endpoint, &request));
    }

    fn start_submit_with<F>(&mut self, transport: F)
    where
        F: FnOnce(SubmitRequest) -> Result<String> + Send + 'static,
    {
        let request = match self.submission.begin_submit() {
            Some(request) => request,
            None => return,
        };

        self.response_scroll = 0;

        let (tx, rx) = mpsc::channel();
        self.rx = Some(rx);

        std::thread::spawn(move || {
            // Exactly one message per request, whatever the outcome
            let outcome = match transport(request) {
                Ok(text) => Ok(text),
                Err(e) => Err(format!("{:#}", e)),
            };
            let _ = tx.send(outcome);
        });
    }

    /// Non-blocking check for a finished request, called on every tick
    /// of the main loop.
    pub fn poll(&mut self) {
        if let Some(rx) = &self.rx {
            match rx.try_recv() {
                Ok(outcome) => {
                    self.submission.finish(outcome);
                    self.response_scroll = 0;
                    self.rx = None;
                }
                Err(mpsc::TryRecvError::Empty) => {
                    // Still in flight, keep waiting
                }
                Err(mpsc::TryRecvError::Disconnected) => {
                    // Worker died without reporting back
                    self.submission.finish(Err("An error occurred".to_string()));
                    self.rx = None;
                }
            }
        }
    }

    /// Copy the received response to the system clipboard.
    pub fn copy_response(&mut self) {
        let text = match self.submission.response_text() {
            Some(text) => text.to_string(),
            None => return,
        };
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => {
                self.submission.note_copy_ok();
                self.show_flash("Copied to clipboard".to_string(), false);
            }
            Err(_) => self.submission.note_copy_failed(),
        }
    }
}

impl Default for AskState {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RENDERING
// ═══════════════════════════════════════════════════════════════════════════

pub fn render(frame: &mut Frame, state: &AskState, theme: &Theme, area: Rect) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(area);

    render_form(frame, state, theme, chunks[0]);
    render_response(frame, state, theme, chunks[1]);

    if let Some(msg) = &state.flash_message {
        widgets::render_flash_message(frame, &msg.text, msg.is_error, theme, area);
    }
}

fn render_form(frame: &mut Frame, state: &AskState, theme: &Theme, area: Rect) {
    let block = Block::default()
        .style(theme.block_style())
        .title(" Ask ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 8 || inner.width < 20 {
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(3), // question id
        Constraint::Min(4),    // query
        Constraint::Min(6),    // code
        Constraint::Length(1), // error line
    ])
    .split(inner);

    let fields: [(AskField, &str); 3] = [
        (AskField::QuestionId, "Question ID"),
        (AskField::Query, "Student Query"),
        (AskField::Code, "Student Code"),
    ];

    for (i, (field, label)) in fields.iter().enumerate() {
        render_field(frame, state, theme, chunks[i], *field, label);
    }

    if let Some(message) = state.submission.error() {
        frame.render_widget(
            Paragraph::new(format!(" ✗ {}", message)).style(theme.error()),
            chunks[3],
        );
    }
}

fn render_field(
    frame: &mut Frame,
    state: &AskState,
    theme: &Theme,
    area: Rect,
    field: AskField,
    label: &str,
) {
    let is_active = state.submission.form.active_field == field;

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", label))
        .title_style(if is_active {
            theme.title()
        } else {
            theme.text_dim()
        })
        .borders(Borders::ALL)
        .border_style(if is_active {
            theme.border_focused()
        } else {
            theme.border()
        });

    let text_area = block.inner(area);
    frame.render_widget(block, area);

    let value = state.submission.form.get_field(field);
    frame.render_widget(
        Paragraph::new(value)
            .style(theme.text())
            .wrap(Wrap { trim: false }),
        text_area,
    );

    // Cursor tracks the end of the text, wrapping with the field width
    if is_active && text_area.width > 0 {
        let inner_width = text_area.width as usize;
        let mut row = 0usize;
        let mut col = 0usize;
        for (i, line) in value.split('\n').enumerate() {
            if i > 0 {
                row += 1;
                col = 0;
            }
            let len = line.chars().count();
            row += len / inner_width;
            col = len % inner_width;
        }
        let x = text_area.x + (col as u16).min(text_area.width.saturating_sub(1));
        let y = text_area.y + (row as u16).min(text_area.height.saturating_sub(1));
        frame.set_cursor_position(ratatui::layout::Position::new(x, y));
    }
}

fn render_response(frame: &mut Frame, state: &AskState, theme: &Theme, area: Rect) {
    match state.submission.state() {
        ResponseState::Loading => render_processing(frame, theme, area),
        ResponseState::Received { text, .. } => render_received(frame, state, text, theme, area),
        ResponseState::Idle | ResponseState::Failed(_) => render_placeholder(frame, theme, area),
    }
}

fn render_processing(frame: &mut Frame, theme: &Theme, area: Rect) {
    let block = Block::default()
        .style(theme.block_style())
        .title(" Response ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = vec![
        Line::raw(""),
        Line::raw(""),
        Line::raw(""),
        Line::from(vec![
            Span::styled(widgets::spinner_frame(), Style::default().fg(theme.accent)),
            Span::styled(
                " Processing...",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
        Line::styled("Waiting for the tutoring service", theme.text_dim()),
    ];

    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}

fn render_received(frame: &mut Frame, state: &AskState, text: &str, theme: &Theme, area: Rect) {
    let lines: Vec<&str> = text.lines().collect();
    let visible_height = area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    let scroll = state.response_scroll.min(max_scroll);

    let scroll_indicator = if max_scroll > 0 {
        format!(" [{}/{}]", scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" Response · [Ctrl+Y] copy{} ", scroll_indicator))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content: String = lines
        .iter()
        .skip(scroll)
        .take(visible_height)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    frame.render_widget(
        Paragraph::new(content)
            .style(theme.text())
            .wrap(Wrap { trim: false }),
        inner,
    );
}

fn render_placeholder(frame: &mut Frame, theme: &Theme, area: Rect) {
    let block = Block::default()
        .style(theme.block_style())
        .title(" Response ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = vec![
        Line::raw(""),
        Line::raw(""),
        Line::styled("🎓", Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::styled("Submit a query to see the response", theme.text_dim()),
        Line::raw(""),
        Line::styled("[Ctrl+R] Run", Style::default().fg(theme.accent)),
    ];

    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}
