//! Interactive session state
//!
//! ```text
//! Undecided --a--> AcceptAll
//! Undecided --s--> SkipAll
//! any       --q--> (terminated)
//! ```
//!
//! `AcceptAll` and `SkipAll` are terminal for the rest of the run. The state
//! is a `Copy` value threaded through the expansion and handed back in
//! [`Flow::Continue`].

use super::traits::Choice;

/// Standing answer for interactive prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    /// Every command is asked about
    #[default]
    Undecided,
    /// Every remaining command is kept without asking
    AcceptAll,
    /// Every remaining command is dropped without asking
    SkipAll,
}

/// What to do with the command that was asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Emit it
    Keep,
    /// Drop it
    Drop,
    /// Stop the whole run
    Quit,
}

impl Session {
    /// Returns true if prompts are still shown
    #[must_use]
    pub fn is_undecided(self) -> bool {
        self == Self::Undecided
    }

    /// Returns true if every remaining command is dropped
    #[must_use]
    pub fn skips_all(self) -> bool {
        self == Self::SkipAll
    }

    /// Returns true if every remaining command is kept
    #[must_use]
    pub fn accepts_all(self) -> bool {
        self == Self::AcceptAll
    }

    /// Applies an answer, returning the decision and the next state
    ///
    /// Once decided, the state never changes again.
    #[must_use]
    pub fn decide(self, choice: Choice) -> (Decision, Session) {
        let decision = match choice {
            Choice::Yes | Choice::AcceptRemaining => Decision::Keep,
            Choice::No | Choice::SkipRemaining => Decision::Drop,
            Choice::Quit => Decision::Quit,
        };

        let next = match (self, choice) {
            (Self::Undecided, Choice::AcceptRemaining) => Self::AcceptAll,
            (Self::Undecided, Choice::SkipRemaining) => Self::SkipAll,
            (state, _) => state,
        };

        (decision, next)
    }
}

/// Result of expanding a step list or template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Flow {
    /// Keep going with this session state
    Continue(Session),
    /// The user quit; nothing else may be emitted
    Terminated,
}

impl Flow {
    /// Returns true if the run was quit
    #[must_use]
    pub fn is_terminated(self) -> bool {
        matches!(self, Self::Terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undecided_transitions() {
        let s = Session::Undecided;
        assert_eq!(s.decide(Choice::Yes), (Decision::Keep, Session::Undecided));
        assert_eq!(s.decide(Choice::No), (Decision::Drop, Session::Undecided));
        assert_eq!(
            s.decide(Choice::AcceptRemaining),
            (Decision::Keep, Session::AcceptAll)
        );
        assert_eq!(
            s.decide(Choice::SkipRemaining),
            (Decision::Drop, Session::SkipAll)
        );
        assert_eq!(s.decide(Choice::Quit).0, Decision::Quit);
    }

    #[test]
    fn test_decided_states_never_change() {
        for state in [Session::AcceptAll, Session::SkipAll] {
            for choice in Choice::ALL {
                assert_eq!(state.decide(choice).1, state);
            }
        }
    }

    #[test]
    fn test_flags() {
        assert!(Session::default().is_undecided());
        assert!(Session::SkipAll.skips_all());
        assert!(Session::AcceptAll.accepts_all());
        assert!(!Session::AcceptAll.skips_all());
        assert!(Flow::Terminated.is_terminated());
        assert!(!Flow::Continue(Session::Undecided).is_terminated());
    }
}
