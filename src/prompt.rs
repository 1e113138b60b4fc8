//! Blocking user dialogs.
//!
//! Pages report outcomes with an alert and ask before destructive actions
//! with a yes/no confirmation. Both go through [`Prompter`] so commands can
//! run non-interactively and tests can script the answers.

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Alert and confirmation dialogs.
pub trait Prompter: Send + Sync + std::fmt::Debug {
    /// Shows a message the user must acknowledge.
    fn alert(&self, message: &str);

    /// Asks a yes/no question. `true` means go ahead.
    fn confirm(&self, message: &str) -> bool;
}

/// Terminal dialogs on stdout/stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter {
    assume_yes: bool,
}

impl TerminalPrompter {
    /// `assume_yes` answers every confirmation with yes without asking.
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompter for TerminalPrompter {
    fn alert(&self, message: &str) {
        println!("{message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        // Without a terminal nobody can answer, so the action is declined
        if !atty::is(atty::Stream::Stdin) || crate::env::is_test_mode() {
            log::info!("Declining '{message}' (no interactive terminal, pass --yes)");
            return false;
        }

        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                log::warn!("Could not read confirmation: {e}");
                false
            }
        }
    }
}

/// Prompter with a fixed confirmation answer that records every alert.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answer: bool,
    alerts: Arc<Mutex<Vec<String>>>,
    questions: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompter {
    /// Prompter answering every confirmation with `answer`.
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    /// Alerts shown so far, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent alert.
    pub fn last_alert(&self) -> Option<String> {
        self.alerts().pop()
    }

    /// Confirmation questions asked so far.
    pub fn questions(&self) -> Vec<String> {
        self.questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
        self.answer
    }
}
