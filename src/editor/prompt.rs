use std::io::{BufRead, Write};

/// Shown when a download is attempted before any image was uploaded.
pub const NO_IMAGE_ALERT: &str = "Please select an image.";

/// Asked before the uploaded image is discarded.
pub const RESET_CONFIRM: &str = "Delete the imported image?";

/// The two user-facing guards of the editor.
pub trait Prompt {
    /// Tell the user something went wrong.
    fn alert(&mut self, msg: &str);

    /// Ask a yes/no question. `true` means go ahead.
    fn confirm(&mut self, msg: &str) -> bool;
}

/// Non-interactive prompt: alerts are logged and confirmations answered up front.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoPrompt {
    /// Answer to every confirmation.
    pub assume_yes: bool,
}

impl Prompt for AutoPrompt {
    fn alert(&mut self, msg: &str) {
        tracing::warn!(alert = msg);
    }

    fn confirm(&mut self, msg: &str) -> bool {
        tracing::info!(confirm = msg, answer = self.assume_yes);
        self.assume_yes
    }
}

/// Prompt on a terminal: writes to `output`, reads `y`/`n` answers from `input`.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Prompt over arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompt on stdin/stderr.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn alert(&mut self, msg: &str) {
        let _ = writeln!(self.output, "{msg}");
    }

    fn confirm(&mut self, msg: &str) -> bool {
        let _ = write!(self.output, "{msg} [y/N] ");
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/prompt.rs"]
mod tests;
