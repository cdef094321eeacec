//! Exclusion rules
//!
//! Static deny-lists applied while expanding a pipeline: command steps are
//! matched by display name, templates by their reference path.

use super::steps::normalize_reference;
use serde::{Deserialize, Serialize};

/// Commands and templates removed from the output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExclusionRules {
    /// Display names of command steps to drop
    pub commands: Vec<String>,
    /// Template references whose expansion is skipped
    pub templates: Vec<String>,
}

impl ExclusionRules {
    /// Creates an empty rule set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command display name
    #[must_use]
    pub fn exclude_command(mut self, display_name: impl Into<String>) -> Self {
        self.commands.push(display_name.into());
        self
    }

    /// Adds a template reference
    #[must_use]
    pub fn exclude_template(mut self, reference: impl Into<String>) -> Self {
        self.templates.push(reference.into());
        self
    }

    /// Merges another rule set into this one
    pub fn extend(&mut self, other: ExclusionRules) {
        self.commands.extend(other.commands);
        self.templates.extend(other.templates);
    }

    /// Returns true if a command with this display name must be dropped
    #[must_use]
    pub fn is_command_excluded(&self, display_name: &str) -> bool {
        self.commands.iter().any(|name| name == display_name)
    }

    /// Returns true if this template reference must not be expanded
    ///
    /// Both sides are compared with `/` separators.
    #[must_use]
    pub fn is_template_excluded(&self, reference: &str) -> bool {
        let reference = normalize_reference(reference);
        self.templates
            .iter()
            .any(|excluded| normalize_reference(excluded) == reference)
    }

    /// Returns true if no rule is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.templates.is_empty()
    }
}
