//! codemate - Code Tutor TUI
//!
//! Ask your tutoring service about a piece of code without leaving
//! the terminal: fill in a question ID, your query and the code, send
//! the triple off, read the explanation.
//!
//! Usage: codemate [--help] [--version]
//! Pipe:  cat broken.py | codemate

mod app;
mod config;
mod modules;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout, IsTerminal, Read};
use std::time::Duration;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("codemate {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Check for piped input BEFORE starting TUI
    let piped_code = read_piped_input();

    // If stdin was a pipe, reattach to /dev/tty so crossterm can read key events
    if piped_code.is_some() {
        reattach_stdin_to_tty()
            .context("Failed to reattach stdin to terminal. Are you running in a TTY?")?;
    }

    let result = run_app(piped_code);

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Read all of stdin if it's a pipe (not a terminal).
/// Returns None if stdin is a terminal (normal interactive mode).
/// Limits input to 1 MB to prevent excessive memory usage.
fn read_piped_input() -> Option<String> {
    if io::stdin().is_terminal() {
        return None;
    }

    const MAX_PIPE_SIZE: usize = 1024 * 1024; // 1 MB — more than enough for any source file

    let mut input = String::new();
    match io::stdin().take(MAX_PIPE_SIZE as u64).read_to_string(&mut input) {
        Ok(_) => {}
        Err(_) => return None, // Non-UTF8 or read error
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(trimmed.to_string())
}

/// After reading piped stdin, reopen /dev/tty as fd 0 so crossterm
/// can read keyboard events. This is the standard Unix approach used
/// by tools like fzf, bat, less, etc.
#[cfg(unix)]
fn reattach_stdin_to_tty() -> Result<()> {
    use std::os::unix::io::AsRawFd;

    let tty = std::fs::File::open("/dev/tty")
        .context("Cannot open /dev/tty — pipe mode requires a controlling terminal")?;

    let tty_fd = tty.as_raw_fd();
    let result = unsafe { libc::dup2(tty_fd, libc::STDIN_FILENO) };
    if result == -1 {
        anyhow::bail!("dup2 failed: could not reattach stdin to /dev/tty");
    }

    // Let `tty` drop naturally — it closes the original fd, but fd 0 now
    // independently points to /dev/tty via the dup2 copy.
    drop(tty);

    Ok(())
}

#[cfg(not(unix))]
fn reattach_stdin_to_tty() -> Result<()> {
    anyhow::bail!("Pipe mode is only supported on Unix systems (Linux, macOS)")
}

fn print_help() {
    println!(
        r#"codemate - Code Tutor TUI

               _                      _
  ___ ___   __| | ___ _ __ ___   __ _| |_ ___
 / __/ _ \ / _` |/ _ \ '_ ` _ \ / _` | __/ _ \
| (_| (_) | (_| |  __/ | | | | | (_| | ||  __/
 \___\___/ \__,_|\___|_| |_| |_|\__,_|\__\___|

Made with ♥ by daskladas

USAGE:
    codemate [OPTIONS]
    cat broken.py | codemate     # pipe code straight into the form

OPTIONS:
    -h, --help       Print help information
    -v, --version    Print version information

KEYBINDINGS:
    Tab/Shift+Tab    Move between form fields
    Enter            Submit (from Question ID), newline elsewhere
    Ctrl+R           Submit from any field
    Ctrl+Y           Copy the response to the clipboard
    PgUp/PgDn        Scroll the response
    F1-F3            Switch screens
    Ctrl+Q           Quit

SCREENS:
    [F1] Ask             Question form + tutor response
    [F2] Settings        Theme, service endpoint
    [F3] Help / About    What codemate does

PIPE MODE:
    Pipe a source file into codemate to pre-fill the code field:
      cat broken.py | codemate
      git show HEAD:src/lib.rs | codemate

CONFIG:
    ~/.config/codemate/config.toml
"#
    );
}

fn run_app(piped_code: Option<String>) -> Result<()> {
    // Load configuration
    let config = config::Config::load().context("Failed to load configuration")?;

    // Create application state (with optional piped input)
    let mut app = App::new(config, piped_code);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Install panic handler so terminal is restored on panic
    // (without this, a panic leaves the terminal in raw mode + alternate screen)
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Best-effort terminal cleanup on panic
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = execute!(std::io::stdout(), crossterm::cursor::Show);
        original_hook(info);
    }));

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Poll the background submission + expire flash messages
        app.update_timers();

        // Poll for events with timeout (keeps the spinner moving)
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }
}
