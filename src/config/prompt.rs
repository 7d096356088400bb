use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::error::{DepGraphError, DepGraphResult};

/// Read a password from the terminal without echoing it.
pub fn prompt_password(prompt: &str) -> DepGraphResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    terminal::enable_raw_mode()
        .map_err(|e| DepGraphError::TerminalError(format!("Cannot read password: {}", e)))?;
    let result = read_hidden_line();
    let _ = terminal::disable_raw_mode();
    println!();

    result
}

fn read_hidden_line() -> DepGraphResult<String> {
    let mut password = String::new();

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match key.code {
            KeyCode::Enter => return Ok(password),
            KeyCode::Backspace => {
                password.pop();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(DepGraphError::TerminalError("Password entry cancelled".to_string()));
            }
            KeyCode::Esc => {
                return Err(DepGraphError::TerminalError("Password entry cancelled".to_string()));
            }
            KeyCode::Char(c) => password.push(c),
            _ => {}
        }
    }
}
