//! Prompting capability
//!
//! The generator never talks to the terminal directly. Every question goes
//! through a [`Prompter`], so the expansion can be driven by a scripted
//! responder in tests.

use crate::infrastructure::console::{Color, colorize};
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// A fixed answer a question may accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    /// Accept this item
    Yes,
    /// Reject this item
    No,
    /// Accept this and every later item
    AcceptRemaining,
    /// Reject this and every later item
    SkipRemaining,
    /// Stop the run
    Quit,
}

impl Choice {
    /// All choices, in presentation order
    pub const ALL: [Choice; 5] = [
        Self::Yes,
        Self::No,
        Self::AcceptRemaining,
        Self::SkipRemaining,
        Self::Quit,
    ];

    /// Key the user types to select this choice
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Yes => "y",
            Self::No => "n",
            Self::AcceptRemaining => "a",
            Self::SkipRemaining => "s",
            Self::Quit => "q",
        }
    }

    /// Human readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::AcceptRemaining => "Accept remaining",
            Self::SkipRemaining => "Skip remaining",
            Self::Quit => "Quit",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.label(), self.key())
    }
}

/// Answer to a [`Question`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// One of the offered choices
    Choice(Choice),
    /// Free text, when the question accepts it
    Text(String),
}

/// A question put to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Line shown before the question
    pub context: Option<String>,
    /// The question itself
    pub text: String,
    /// Accepted choices
    pub choices: Vec<Choice>,
    /// Hint shown when free text is accepted
    pub text_hint: Option<String>,
    /// Choice returned on empty input
    pub default: Option<Choice>,
    /// Color for the context and question lines
    pub color: Color,
}

impl Question {
    /// Creates a yes/no question
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            context: None,
            text: text.into(),
            choices: vec![Choice::Yes, Choice::No],
            text_hint: None,
            default: None,
            color: Color::Reset,
        }
    }

    /// Sets the context line
    #[must_use]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Replaces the accepted choices
    #[must_use]
    pub fn choices(mut self, choices: &[Choice]) -> Self {
        self.choices = choices.to_vec();
        self
    }

    /// Accepts free text, described by `hint`
    #[must_use]
    pub fn accept_text(mut self, hint: impl Into<String>) -> Self {
        self.text_hint = Some(hint.into());
        self
    }

    /// Sets the default choice
    #[must_use]
    pub fn default_choice(mut self, choice: Choice) -> Self {
        self.default = Some(choice);
        self
    }

    /// Sets the color
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Returns true if free text is a valid answer
    #[must_use]
    pub fn accepts_text(&self) -> bool {
        self.text_hint.is_some()
    }

    /// Renders the answer line, e.g. `Yes(y) No(n) Quit(q) [y]: `
    #[must_use]
    pub fn answer_line(&self) -> String {
        let mut parts: Vec<String> = Choice::ALL
            .iter()
            .filter(|c| self.choices.contains(c))
            .map(ToString::to_string)
            .collect();

        if let Some(hint) = &self.text_hint {
            parts.push("|".to_string());
            parts.push(format!("<{hint}>"));
        }

        if let Some(default) = self.default {
            parts.push(format!("[{}]", default.key()));
        }

        format!("{}: ", parts.join(" "))
    }

    /// Interprets raw input
    ///
    /// Returns `None` for input that is neither a choice key nor acceptable
    /// free text. Empty input yields the default, if any.
    #[must_use]
    pub fn interpret(&self, input: &str) -> Option<Response> {
        if input.is_empty() {
            return self.default.map(Response::Choice);
        }

        Choice::ALL
            .iter()
            .copied()
            .filter(|c| self.choices.contains(c))
            .find(|c| c.key().eq_ignore_ascii_case(input))
            .map(Response::Choice)
            .or_else(|| {
                self.accepts_text()
                    .then(|| Response::Text(input.to_string()))
            })
    }
}

/// Errors raised while asking the user
#[derive(Error, Debug)]
pub enum PromptError {
    /// No terminal is available to ask
    #[error("no interactive terminal available")]
    Unavailable,

    /// Input ended before an answer was given
    #[error("input closed before an answer was given")]
    Closed,

    /// Reading or writing the terminal failed
    #[error("terminal IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability to ask the user questions and show notices
pub trait Prompter {
    /// Blocks until the user answers
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] if no answer can be obtained.
    fn ask(&mut self, question: &Question) -> Result<Response, PromptError>;

    /// Shows a one-line notice
    fn notify(&mut self, message: &str, color: Color) {
        eprintln!("{}", colorize(message, color));
    }
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, question: &Question) -> Result<Response, PromptError> {
        (**self).ask(question)
    }

    fn notify(&mut self, message: &str, color: Color) {
        (**self).notify(message, color);
    }
}

/// Prompter for runs without a terminal: every question fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn ask(&mut self, _question: &Question) -> Result<Response, PromptError> {
        Err(PromptError::Unavailable)
    }
}

/// Prompter answering from a queue, recording what it was asked
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    responses: VecDeque<Response>,
    /// Questions asked so far
    pub asked: Vec<Question>,
    /// Notices shown so far
    pub notices: Vec<String>,
}

impl ScriptedPrompter {
    /// Creates a prompter that answers with `responses` in order
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            asked: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Creates a prompter that answers with choices in order
    #[must_use]
    pub fn choices(choices: impl IntoIterator<Item = Choice>) -> Self {
        Self::new(choices.into_iter().map(Response::Choice))
    }

    /// Number of answers not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &Question) -> Result<Response, PromptError> {
        self.asked.push(question.clone());
        self.responses.pop_front().ok_or(PromptError::Closed)
    }

    fn notify(&mut self, message: &str, _color: Color) {
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_question() -> Question {
        Question::new("Add 'Build' to your script?")
            .choices(&Choice::ALL)
            .default_choice(Choice::Yes)
    }

    fn parameter_question() -> Question {
        Question::new("Provide a value now?")
            .choices(&[Choice::Quit])
            .accept_text("target")
            .default_choice(Choice::Quit)
    }

    #[test]
    fn test_answer_line_all_choices() {
        assert_eq!(
            command_question().answer_line(),
            "Yes(y) No(n) Accept remaining(a) Skip remaining(s) Quit(q) [y]: "
        );
    }

    #[test]
    fn test_answer_line_with_text() {
        assert_eq!(parameter_question().answer_line(), "Quit(q) | <target> [q]: ");
    }

    #[test]
    fn test_interpret_keys_case_insensitive() {
        let q = command_question();
        assert_eq!(q.interpret("A"), Some(Response::Choice(Choice::AcceptRemaining)));
        assert_eq!(q.interpret("s"), Some(Response::Choice(Choice::SkipRemaining)));
        assert_eq!(q.interpret(""), Some(Response::Choice(Choice::Yes)));
        assert_eq!(q.interpret("maybe"), None);
    }

    #[test]
    fn test_interpret_text() {
        let q = parameter_question();
        assert_eq!(q.interpret("q"), Some(Response::Choice(Choice::Quit)));
        assert_eq!(q.interpret("y"), Some(Response::Text("y".to_string())));
        assert_eq!(q.interpret("android"), Some(Response::Text("android".to_string())));
        assert_eq!(q.interpret(""), Some(Response::Choice(Choice::Quit)));
    }

    #[test]
    fn test_choice_not_offered_is_invalid() {
        let q = Question::new("Overwrite?").choices(&[Choice::Yes, Choice::No]);
        assert_eq!(q.interpret("q"), None);
        assert_eq!(q.interpret(""), None);
    }

    #[test]
    fn test_scripted_prompter() {
        let mut prompter = ScriptedPrompter::choices([Choice::No]);
        let q = command_question();

        assert_eq!(prompter.ask(&q).unwrap(), Response::Choice(Choice::No));
        assert!(matches!(prompter.ask(&q), Err(PromptError::Closed)));
        assert_eq!(prompter.asked.len(), 2);
        assert_eq!(prompter.remaining(), 0);

        prompter.notify("hello", Color::Yellow);
        assert_eq!(prompter.notices, vec!["hello"]);
    }

    #[test]
    fn test_non_interactive() {
        assert!(matches!(
            NonInteractive.ask(&command_question()),
            Err(PromptError::Unavailable)
        ));
    }
}
