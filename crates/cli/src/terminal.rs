//! Terminal presentation of notifications and confirmations.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::{BufRead, Write};

use shopfront_core::{NoticeKind, Notification, Notifier};

/// Prints notifications and asks for confirmation on stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier {
    assume_yes: bool,
}

impl TerminalNotifier {
    /// `assume_yes` answers every confirmation without prompting.
    #[must_use]
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NoticeKind::Success => println!("✓ {}", notification.message),
            NoticeKind::Validation => eprintln!("! {}", notification.message),
            NoticeKind::Error => eprintln!("✗ {}", notification.message),
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{prompt} [y/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

/// Whether a typed answer confirms. Anything but `y`/`yes` declines.
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
