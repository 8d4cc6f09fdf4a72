//! Asking the user for the grant code.
//!
//! The console interaction sits behind a trait so the authorizer can be
//! exercised in tests without driving a real terminal.

use std::io::{BufRead, Write};

use crate::error::AuthError;

/// Obtain a grant code for a consent URL. Blocks until the user answers.
pub trait CodePrompt {
    fn ask(&self, auth_url: &str) -> Result<String, AuthError>;
}

/// Real console prompt: tries to open the consent URL in a browser, prints
/// it either way, then reads one line from stdin.
pub struct StdinPrompt {
    open_browser: bool,
}

impl StdinPrompt {
    pub fn new() -> Self {
        Self { open_browser: true }
    }

    /// Disable the browser launch attempt (print-only).
    pub fn print_only() -> Self {
        Self {
            open_browser: false,
        }
    }
}

impl Default for StdinPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl CodePrompt for StdinPrompt {
    fn ask(&self, auth_url: &str) -> Result<String, AuthError> {
        if self.open_browser && open::that(auth_url).is_err() {
            println!("Could not open browser.");
        }
        println!("Authorize this app by visiting this URL:\n{auth_url}");
        print!("Enter the code from that page here: ");
        std::io::stdout()
            .flush()
            .map_err(|e| AuthError::Prompt(e.to_string()))?;

        let mut code = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut code)
            .map_err(|e| AuthError::Prompt(e.to_string()))?;

        let code = code.trim();
        if code.is_empty() {
            return Err(AuthError::Prompt("empty authorization code".into()));
        }
        Ok(code.to_string())
    }
}
