//! Main rendering module for codemate
//!
//! Renders the complete UI:
//! - Tab bar with logo (top)
//! - Active screen content area
//! - Global status bar (bottom)
//! - Popup overlays + flash messages

use crate::app::{App, PopupState};
use crate::modules::ask;
use crate::ui::widgets;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

/// Tab definition with index for keybinding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleTab {
    Ask,
    Settings,
    HelpAbout,
}

impl ModuleTab {
    pub fn all() -> &'static [ModuleTab] {
        &[ModuleTab::Ask, ModuleTab::Settings, ModuleTab::HelpAbout]
    }

    pub fn index(&self) -> usize {
        match self {
            ModuleTab::Ask => 0,
            ModuleTab::Settings => 1,
            ModuleTab::HelpAbout => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModuleTab::Ask => "Ask",
            ModuleTab::Settings => "Settings",
            ModuleTab::HelpAbout => "Help / About",
        }
    }
}

/// Main render function – entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;

    // Fill entire background
    frame.render_widget(Block::default().style(theme.block_style()), area);

    let chunks = Layout::vertical([
        Constraint::Length(2), // tab bar
        Constraint::Min(8),    // content
        Constraint::Length(1), // status bar
    ])
    .split(area);

    render_tab_bar(frame, app, chunks[0]);

    match app.active_tab {
        ModuleTab::Ask => ask::render(frame, &app.ask, theme, chunks[1]),
        ModuleTab::Settings => render_settings(frame, app, chunks[1]),
        ModuleTab::HelpAbout => render_help_about(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);
    render_popups(frame, app, area);
}

/// Render the top bar: logo on the left, tabs to the right
fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let row = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1,
    };
    let chunks = Layout::horizontal([
        Constraint::Length(18), // logo
        Constraint::Min(10),    // tabs
    ])
    .split(row);

    let logo = Line::from(vec![
        Span::styled(
            " codemate",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.fg_dim),
        ),
    ]);
    frame.render_widget(Paragraph::new(logo).style(theme.block_style()), chunks[0]);

    let titles: Vec<Line> = ModuleTab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if app.active_tab == *tab {
                theme.tab_active()
            } else {
                theme.tab_inactive()
            };
            Line::styled(format!("[F{}] {}", i + 1, tab.label()), style)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.active_tab.index())
        .divider(" │ ")
        .style(theme.text());
    frame.render_widget(tabs, chunks[1]);
}

/// Render the settings screen
fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(" Settings ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let settings: Vec<(&str, String, bool)> = vec![
        ("Theme", app.config.theme.as_str().to_string(), false),
        (
            "Service endpoint",
            if app.settings_editing && app.settings_selected == 1 {
                format!("{}_", app.settings_edit_buffer)
            } else {
                app.config.endpoint.clone()
            },
            app.settings_editing && app.settings_selected == 1,
        ),
    ];

    let mut items: Vec<ListItem> = Vec::new();
    for (i, (label, value, editing)) in settings.iter().enumerate() {
        let style = if i == app.settings_selected {
            theme.selected()
        } else {
            theme.text()
        };
        let value_style = if *editing {
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.accent)
        };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(format!("  {:<20}", label), style),
            Span::styled(format!("[{}]", value), value_style),
        ])));
    }

    if app.settings_editing {
        items.push(ListItem::new(Line::raw("")));
        items.push(ListItem::new(Line::styled(
            "  💡 [Enter] Save · [Esc] Cancel",
            theme.text_dim(),
        )));
    }

    frame.render_widget(List::new(items), inner);

    // Config file path at the bottom
    let config_path = crate::config::Config::path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    let path_area = Rect {
        x: inner.x,
        y: inner.y + inner.height.saturating_sub(2),
        width: inner.width,
        height: 1,
    };
    let path_widget =
        Paragraph::new(format!("Config file: {}", config_path)).style(theme.text_dim());
    frame.render_widget(path_widget, path_area);
}

/// Render the help / about screen
fn render_help_about(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(" Help / About ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let heading = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);

    let key_line = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("    {:<16}", key), Style::default().fg(theme.accent)),
            Span::styled(desc, theme.text()),
        ])
    };

    let config_path = crate::config::Config::path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("  codemate", heading),
            Span::styled(
                format!(" v{}", env!("CARGO_PKG_VERSION")),
                theme.text_dim(),
            ),
            Span::styled("  ·  ask your code tutor from the terminal", theme.text()),
        ]),
        Line::raw(""),
        Line::styled(
            "  Fill in a question ID, your query, and the code you are asking",
            theme.text(),
        ),
        Line::styled(
            "  about. codemate sends the triple to the tutoring service and",
            theme.text(),
        ),
        Line::styled("  shows the returned explanation.", theme.text()),
        Line::raw(""),
        Line::styled("  Keys", heading),
        key_line("Tab / Shift+Tab", "Move between form fields"),
        key_line("Enter", "Submit (from Question ID), newline elsewhere"),
        key_line("Ctrl+R", "Submit from any field"),
        key_line("Ctrl+Y", "Copy the response to the clipboard"),
        key_line("PgUp / PgDn", "Scroll the response"),
        key_line("F1-F3", "Switch screens"),
        key_line("Ctrl+Q", "Quit"),
        Line::raw(""),
        Line::styled("  Pipe code straight into the form:", theme.text()),
        Line::styled("    cat broken.py | codemate", Style::default().fg(theme.accent)),
        Line::raw(""),
        Line::styled(format!("  Config file: {}", config_path), theme.text_dim()),
        Line::raw(""),
        Line::styled("  Made with ♥ by daskladas", theme.text_dim()),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Render status bar with context-sensitive keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let hints = match app.active_tab {
        ModuleTab::Ask => {
            let ask = &app.ask;
            if ask.submission.is_loading() {
                format!("{} Processing...  [Ctrl+Q] Quit", widgets::spinner_frame())
            } else if ask.submission.can_copy() {
                "[Tab] Field  [Ctrl+R] Run  [Ctrl+Y] Copy  [PgUp/PgDn] Scroll  [Ctrl+Q] Quit"
                    .to_string()
            } else {
                "[Tab] Field  [Enter/Ctrl+R] Run  [F2] Settings  [Ctrl+Q] Quit".to_string()
            }
        }
        ModuleTab::Settings => {
            if app.settings_editing {
                "[Enter] Save  [Esc] Cancel  [Ctrl+Q] Quit".to_string()
            } else {
                "[j/k] Navigate  [Enter] Change  [F1] Ask  [q] Quit".to_string()
            }
        }
        ModuleTab::HelpAbout => "[F1] Ask  [F2] Settings  [q] Quit".to_string(),
    };

    widgets::render_status_bar(
        frame,
        &hints,
        concat!("codemate v", env!("CARGO_PKG_VERSION")),
        theme,
        area,
    );
}

/// Render popup overlays
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    match &app.popup {
        PopupState::None => {}
        PopupState::Error { title, message } => {
            widgets::render_error_popup(frame, title, message, theme, area);
        }
    }

    // Flash message
    if let Some(msg) = &app.flash_message {
        widgets::render_flash_message(frame, &msg.text, msg.is_error, &app.theme, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_text(app: &App) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_help_screen_shows_the_config_path() {
        let mut app = App::new(Config::default(), None);
        app.active_tab = ModuleTab::HelpAbout;

        let text = rendered_text(&app);
        assert!(text.contains("Pipe code straight into the form"));
        assert!(text.contains("Config file:"));
    }
}
