use anyhow::{Context, Result};

#[macro_export]
macro_rules! warning {
    // format string literal (with or without inline formatting)
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stderr(), "{}", format!($fmt $(, $($arg)*)?).yellow());
    }};
    // arbitrary expression (non-literal)
    ($expr:expr) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stderr(), "{}", format!("{}", $expr).yellow());
    }};
}

#[macro_export]
macro_rules! error {
    // format string literal (with or without inline formatting)
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stderr(), "{}", format!($fmt $(, $($arg)*)?).red());
    }};
    // arbitrary expression (non-literal)
    ($expr:expr) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stderr(), "{}", format!("{}", $expr).red());
    }};
}

#[macro_export]
macro_rules! status {
    // format string literal (with or without inline formatting)
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stdout(), "{}", format!($fmt $(, $($arg)*)?).green());
    }};
    // arbitrary expression (non-literal)
    ($expr:expr) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stdout(), "{}", format!("{}", $expr).green());
    }};
}

/// echo of a command about to run
#[macro_export]
macro_rules! command {
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stdout(), "{}", format!($fmt $(, $($arg)*)?).dimmed());
    }};
}

#[macro_export]
macro_rules! info {
    () => {{
        use std::io::{self, Write};
        let _ = writeln!(io::stdout());
    }};
    // format string literal (with or without inline formatting or args)
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use std::io::{self, Write};
        let _ = writeln!(io::stdout(), $fmt $(, $($arg)*)?);
    }};
    // arbitrary expression (non-literal)
    ($expr:expr) => {{
        use std::io::{self, Write};
        let _ = writeln!(io::stdout(), "{}", $expr);
    }};
}

/// stop the whole run right away; commits already made are kept
pub fn abort() -> ! {
    info!("exiting...");
    std::process::exit(1);
}

pub fn clear_screen() {
    use crossterm::{
        cursor::MoveTo,
        execute,
        terminal::{Clear, ClearType},
    };
    use std::io;

    let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}

/// next key press in raw mode; a read error leaves raw mode and is returned
fn read_key_press() -> Result<Option<crossterm::event::KeyEvent>> {
    use crossterm::{event, terminal::disable_raw_mode};

    key_press(event::read()).inspect_err(|_| {
        disable_raw_mode().ok();
    })
}

/// keep key presses, drop releases and non-key events
fn key_press(
    event: std::io::Result<crossterm::event::Event>,
) -> Result<Option<crossterm::event::KeyEvent>> {
    use crossterm::event::{Event, KeyEventKind};

    match event.context("failed to read terminal input")? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}

/// build a prompt string like "[a]utomatic/[m]anual"
fn prompt_label(options: &[&str]) -> String {
    options
        .iter()
        .map(|opt| {
            let mut chars = opt.chars();
            let first = chars.next().unwrap_or(' ');
            format!("[{first}]{}", chars.as_str())
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// lowercased first char of each option
fn option_chars(options: &[&str]) -> Vec<char> {
    options
        .iter()
        .filter_map(|opt| opt.chars().next())
        .flat_map(char::to_lowercase)
        .collect()
}

/// read a single keypress choice
///
/// returns the chosen option's first char, or `None` for any other key
/// (including enter and esc) so the caller can abort
pub fn prompt(options: &[&str]) -> Result<Option<char>> {
    use crossterm::{
        event::{KeyCode, KeyEvent, KeyModifiers},
        terminal::{disable_raw_mode, enable_raw_mode},
    };
    use std::io::{self, Write};

    debug_assert!(!options.is_empty(), "prompt requires at least one option");
    debug_assert!(
        options.iter().all(|opt| !opt.is_empty()),
        "prompt options cannot be empty strings"
    );

    let valid_chars = option_chars(options);

    // print the prompt
    print!("{} ? ", prompt_label(options));
    let _ = io::stdout().flush();

    // enable raw mode for single-character input
    enable_raw_mode().context("this command requires an interactive terminal")?;

    loop {
        let Some(KeyEvent {
            code, modifiers, ..
        }) = read_key_press()?
        else {
            continue;
        };

        match code {
            // handle ctrl-c
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                disable_raw_mode().ok();
                info!("^C");
                std::process::exit(1);
            }
            KeyCode::Char(c) => {
                disable_raw_mode().ok();
                let lower = c.to_lowercase().next().unwrap_or(c);
                return match valid_chars.iter().position(|&ch| ch == lower) {
                    Some(idx) => {
                        info!(options[idx]);
                        Ok(Some(lower))
                    }
                    None => {
                        info!(c);
                        Ok(None)
                    }
                };
            }
            KeyCode::Enter | KeyCode::Esc => {
                disable_raw_mode().ok();
                info!();
                return Ok(None);
            }
            _ => {}
        }
    }
}

/// block until enter is pressed; esc and ctrl-c abort the run
pub fn pause(message: &str) -> Result<()> {
    use crossterm::{
        event::{KeyCode, KeyEvent, KeyModifiers},
        terminal::{disable_raw_mode, enable_raw_mode},
    };
    use std::io::{self, Write};

    print!("{message} ");
    let _ = io::stdout().flush();

    enable_raw_mode().context("this command requires an interactive terminal")?;

    loop {
        let Some(KeyEvent {
            code, modifiers, ..
        }) = read_key_press()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                disable_raw_mode().ok();
                info!();
                return Ok(());
            }
            KeyCode::Esc => {
                disable_raw_mode().ok();
                info!();
                abort();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                disable_raw_mode().ok();
                info!("^C");
                std::process::exit(1);
            }
            _ => {}
        }
    }
}

/// read one line of text, pre-filled with `initial`
pub fn read_line(prompt: &str, initial: &str) -> Result<String> {
    use rustyline::DefaultEditor;

    let mut editor = DefaultEditor::new().context("failed to initialise line editor")?;

    if let Ok(line) = editor.readline_with_initial(prompt, (initial, "")) {
        Ok(line.trim().to_string())
    } else {
        info!("^C");
        std::process::exit(1);
    }
}
