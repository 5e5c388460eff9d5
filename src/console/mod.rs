//! Interactive console front-end
//!
//! - [`Console`] - the blocking read/write boundary the menus run against
//! - [`TerminalConsole`] - the real terminal, via crossterm and rpassword
//! - [`session`] - credential prompting and the menu loops

pub mod session;

pub use session::{sign_in, Session};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, BufRead, Write};

/// A single keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Other,
}

/// Synchronous console I/O
pub trait Console {
    /// Prompt and read one line, without the trailing newline
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Like [`Console::read_line`] but without echo
    fn read_secret(&mut self, prompt: &str) -> io::Result<String>;

    /// Prompt and wait for one keystroke
    fn read_key(&mut self, prompt: &str) -> io::Result<Key>;

    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Console backed by the process's terminal
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        Self
    }
}

/// Leaves raw mode when dropped, also on the error path
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        rpassword::prompt_password(prompt)
    }

    fn read_key(&mut self, prompt: &str) -> io::Result<Key> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let key = {
            let _raw = RawMode::enable()?;
            loop {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
                        }
                        KeyCode::Char(c) => break Key::Char(c),
                        KeyCode::Esc => break Key::Escape,
                        KeyCode::Enter => break Key::Enter,
                        _ => break Key::Other,
                    }
                }
            }
        };

        // Echo what was pressed so the transcript reads naturally
        match key {
            Key::Char(c) => writeln!(stdout, "{}", c)?,
            _ => writeln!(stdout)?,
        }
        Ok(key)
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", line)?;
        stdout.flush()
    }
}
