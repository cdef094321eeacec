//! Terminal prompter
//!
//! Reads answers line by line and re-asks until the input is valid.
//! Questions and notices go to stderr so stdout only carries the final
//! success line.

use super::console::{Color, colorize};
use crate::generator::{PromptError, Prompter, Question, Response};
use std::io::{self, BufRead, IsTerminal, StdinLock, Stderr, Write};

const INVALID_RESPONSE: &str = "Invalid response! Please enter a valid response:";

/// [`Prompter`] backed by a line reader and a writer
#[derive(Debug)]
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl TerminalPrompter<StdinLock<'static>, Stderr> {
    /// Prompter reading stdin and writing stderr
    ///
    /// Colors are disabled when `NO_COLOR` is set or stderr is not a
    /// terminal.
    #[must_use]
    pub fn stdio() -> Self {
        let output = io::stderr();
        let color = std::env::var_os("NO_COLOR").is_none() && output.is_terminal();
        Self::new(io::stdin().lock(), output, color)
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    /// Creates a prompter over arbitrary streams
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    /// Consumes the prompter, returning the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            colorize(text, color)
        } else {
            text.to_string()
        }
    }

    fn read_answer(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask(&mut self, question: &Question) -> Result<Response, PromptError> {
        if let Some(context) = &question.context {
            let line = self.paint(context, question.color);
            writeln!(self.output, "{line}")?;
        }
        let text = self.paint(&question.text, question.color);
        writeln!(self.output, "{text}")?;

        loop {
            write!(self.output, "{}", question.answer_line())?;
            self.output.flush()?;

            let answer = self.read_answer()?;
            if let Some(response) = question.interpret(&answer) {
                return Ok(response);
            }

            tracing::debug!(input = %answer, "Rejected prompt input");
            let warning = self.paint(INVALID_RESPONSE, Color::Red);
            writeln!(self.output, "{warning}")?;
        }
    }

    fn notify(&mut self, message: &str, color: Color) {
        let line = self.paint(message, color);
        // Notices are best effort
        let _ = writeln!(self.output, "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Choice;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn prompter(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    fn question() -> Question {
        Question::new("Add 'Build' to your script?")
            .context("Command: yarn build")
            .choices(&Choice::ALL)
            .default_choice(Choice::Yes)
    }

    #[test]
    fn test_reads_choice() {
        let mut p = prompter("a\n");
        assert_eq!(
            p.ask(&question()).unwrap(),
            Response::Choice(Choice::AcceptRemaining)
        );

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(
            output,
            "Command: yarn build\nAdd 'Build' to your script?\n\
             Yes(y) No(n) Accept remaining(a) Skip remaining(s) Quit(q) [y]: "
        );
    }

    #[test]
    fn test_reasks_on_invalid_input() {
        let mut p = prompter("maybe\n  N \n");
        assert_eq!(p.ask(&question()).unwrap(), Response::Choice(Choice::No));

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches(INVALID_RESPONSE).count(), 1);
    }

    #[test]
    fn test_empty_line_takes_default() {
        let mut p = prompter("\n");
        assert_eq!(p.ask(&question()).unwrap(), Response::Choice(Choice::Yes));
    }

    #[test]
    fn test_free_text() {
        let q = Question::new("Provide a value now?")
            .choices(&[Choice::Quit])
            .accept_text("target");
        let mut p = prompter("android\n");
        assert_eq!(
            p.ask(&q).unwrap(),
            Response::Text("android".to_string())
        );
    }

    #[test]
    fn test_eof_is_closed() {
        let mut p = prompter("");
        assert!(matches!(p.ask(&question()), Err(PromptError::Closed)));
    }

    #[test]
    fn test_notify_colors_only_when_enabled() {
        let mut plain = prompter("");
        plain.notify("Skipping", Color::Yellow);
        assert_eq!(String::from_utf8(plain.into_output()).unwrap(), "Skipping\n");

        let mut colored = TerminalPrompter::new(Cursor::new(Vec::new()), Vec::new(), true);
        colored.notify("Skipping", Color::Yellow);
        assert_eq!(
            String::from_utf8(colored.into_output()).unwrap(),
            "\x1b[33mSkipping\x1b[0m\n"
        );
    }
}
