//! Application state and event handling for codemate

use crate::config::Config;
use crate::modules::ask::AskState;
use crate::types::FlashMessage;
use crate::ui::{ModuleTab, Theme};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application state
pub struct App {
    pub should_quit: bool,
    pub active_tab: ModuleTab,
    pub config: Config,
    pub theme: Theme,
    pub settings_selected: usize,
    pub settings_editing: bool,
    pub settings_edit_buffer: String,
    pub popup: PopupState,
    pub flash_message: Option<FlashMessage>,

    // Module states
    pub ask: AskState,
}

#[derive(Debug, Clone)]
pub enum PopupState {
    None,
    Error { title: String, message: String },
}

impl App {
    pub fn new(config: Config, piped_code: Option<String>) -> Self {
        let theme = Theme::from_name(config.theme);

        // Piped input lands in the code field, ready to submit
        let ask = match piped_code {
            Some(code) => AskState::new_with_code(code),
            None => AskState::new(),
        };

        Self {
            should_quit: false,
            active_tab: ModuleTab::Ask,
            config,
            theme,
            settings_selected: 0,
            settings_editing: false,
            settings_edit_buffer: String::new(),
            popup: PopupState::None,
            flash_message: None,
            ask,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Clear expired flash
        if let Some(msg) = &self.flash_message {
            if msg.is_expired(3) {
                self.flash_message = None;
            }
        }

        // Ctrl+Q quits from anywhere, even while a form field is focused
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return Ok(());
        }

        // App-level popup handling
        match &self.popup {
            PopupState::Error { .. } => {
                match key.code {
                    KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc => {
                        self.popup = PopupState::None;
                    }
                    _ => {}
                }
                return Ok(());
            }
            PopupState::None => {}
        }

        // Settings text editing mode captures ALL keys
        if self.settings_editing {
            self.handle_settings_edit_key(key)?;
            return Ok(());
        }

        // Screen switching; plain chars stay available for the form
        match key.code {
            KeyCode::F(1) => {
                self.active_tab = ModuleTab::Ask;
                return Ok(());
            }
            KeyCode::F(2) => {
                self.active_tab = ModuleTab::Settings;
                return Ok(());
            }
            KeyCode::F(3) => {
                self.active_tab = ModuleTab::HelpAbout;
                return Ok(());
            }
            _ => {}
        }

        match self.active_tab {
            ModuleTab::Ask => {
                // The form consumes every remaining key
                self.ask.handle_key(key)?;

                // Check if a submission was requested
                if self.ask.submit_requested {
                    self.ask.submit_requested = false;
                    let endpoint = self.config.endpoint.clone();
                    self.ask.start_submit(&endpoint);
                }
            }
            ModuleTab::Settings => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                _ => self.handle_settings_key(key)?,
            },
            ModuleTab::HelpAbout => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
        }

        Ok(())
    }

    pub fn update_timers(&mut self) {
        // Poll the background submission (non-blocking)
        self.ask.poll();

        // Expire flash messages
        expire_flash(&mut self.flash_message);
        expire_flash(&mut self.ask.flash_message);
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> Result<()> {
        let settings_count = 2; // theme + endpoint
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.settings_selected < settings_count - 1 {
                    self.settings_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.settings_selected = self.settings_selected.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                match self.settings_selected {
                    0 => {
                        self.config.theme = self.config.theme.next();
                        self.theme = Theme::from_name(self.config.theme);
                    }
                    // Endpoint (text editable)
                    1 => {
                        self.settings_editing = true;
                        self.settings_edit_buffer = self.config.endpoint.clone();
                        return Ok(());
                    }
                    _ => {}
                }
                self.save_config();
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle key events while editing a settings text field.
    fn handle_settings_edit_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                // Cancel editing
                self.settings_editing = false;
                self.settings_edit_buffer.clear();
            }
            KeyCode::Enter => {
                // Save the value
                let value = self.settings_edit_buffer.trim().to_string();
                if self.settings_selected == 1 {
                    self.config.endpoint = if value.is_empty() {
                        crate::config::DEFAULT_ENDPOINT.to_string()
                    } else {
                        value
                    };
                }
                self.settings_editing = false;
                self.settings_edit_buffer.clear();
                self.save_config();
            }
            KeyCode::Backspace => {
                self.settings_edit_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.settings_edit_buffer.push(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn save_config(&mut self) {
        if let Err(e) = self.config.save() {
            self.popup = PopupState::Error {
                title: "Save failed".to_string(),
                message: e.to_string(),
            };
        } else {
            self.flash_message = Some(FlashMessage::new("Settings saved".to_string(), false));
        }
    }
}

/// Expire a flash message after 3 seconds
fn expire_flash(msg: &mut Option<FlashMessage>) {
    if let Some(m) = msg {
        if m.is_expired(3) {
            *msg = None;
        }
    }
}
