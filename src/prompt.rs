//! Operator prompts
//!
//! [`TerminalPrompter`] reads from stdin and masks secret input when stdin
//! is a terminal. [`LinePrompter`] reads plain lines from any reader and is
//! what piped input and tests use.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::UploadError;
use crate::secret::Secret;

pub trait Prompter {
    /// Show `question` and read one answer, trimmed. End of input reads as "".
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Like [`Prompter::ask`], but the answer is not echoed
    fn ask_secret(&mut self, question: &str) -> Result<Secret>;

    /// Ask a yes/no question; only `y` or `yes` count as yes
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{question} (y/n): "))?;
        Ok(is_affirmative(&answer))
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Line-oriented prompter over arbitrary input and output streams
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn read_answer(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}").context("Failed to write prompt")?;
        self.output.flush().context("Failed to write prompt")?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("Failed to read answer")?;
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.read_answer(question)
    }

    fn ask_secret(&mut self, question: &str) -> Result<Secret> {
        self.read_answer(question).map(Secret::new)
    }
}

/// Prompter on the process's stdin and stdout
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }

    fn lines(&self) -> LinePrompter<io::StdinLock<'static>, io::Stdout> {
        LinePrompter::new(io::stdin().lock(), io::stdout())
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.lines().ask(question)
    }

    fn ask_secret(&mut self, question: &str) -> Result<Secret> {
        if !io::stdin().is_terminal() {
            return self.lines().ask_secret(question);
        }

        let mut stdout = io::stdout();
        write!(stdout, "{question}").context("Failed to write prompt")?;
        stdout.flush().context("Failed to write prompt")?;

        let secret = read_masked();
        // The Enter key was swallowed in raw mode
        println!();
        secret.map(Secret::new)
    }
}

/// Leaves raw mode when dropped, including on early return
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode().context("Failed to switch terminal to raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Read one line from the terminal without echoing it
fn read_masked() -> Result<String> {
    let _guard = RawModeGuard::enable()?;
    let mut value = String::new();

    loop {
        let Event::Key(key) = event::read().context("Failed to read terminal input")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter => break,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(UploadError::Interrupted.into());
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if value.is_empty() {
                    break;
                }
            }
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Esc => value.clear(),
            _ => {}
        }
    }

    Ok(value.trim().to_string())
}
