//! Command sanitizing
//!
//! Rewrites raw step commands into literal shell text:
//!
//! 1. `$(System.DefaultWorkingDirectory)` becomes the absolute working
//!    directory.
//! 2. `${{ parameters.<name> }}` (whitespace tolerant) becomes the bound
//!    value for `<name>`.
//!
//! ```rust
//! use yaml_to_script::{Bindings, sanitize_command};
//!
//! let bindings = Bindings::from([("target".to_string(), "android".to_string())]);
//! let command = sanitize_command("build ${{ parameters.target }}", "/repo", &bindings);
//! assert_eq!(command, "build android");
//! ```

use crate::pipeline::Bindings;
use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

/// Placeholder for the pipeline's default working directory
pub const WORKING_DIRECTORY_PLACEHOLDER: &str = "$(System.DefaultWorkingDirectory)";

static WORKING_DIRECTORY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&regex::escape(WORKING_DIRECTORY_PLACEHOLDER)).unwrap());

static PARAMETER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{\{\s*parameters\.([^\s}]+)\s*\}\}").unwrap());

/// Substitutes the working directory and parameter placeholders
///
/// Placeholders naming a parameter that is not bound are left in place.
pub fn sanitize_command(command: &str, working_directory: &str, bindings: &Bindings) -> String {
    let with_directory =
        WORKING_DIRECTORY_PATTERN.replace_all(command, NoExpand(working_directory));
    substitute_parameters(&with_directory, bindings)
}

/// Substitutes only the parameter placeholders
pub fn substitute_parameters(text: &str, bindings: &Bindings) -> String {
    PARAMETER_PATTERN
        .replace_all(text, |caps: &Captures| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            if let Some(value) = bindings.get(name) {
                value.clone()
            } else {
                tracing::warn!(parameter = name, "Unbound parameter left in command");
                caps.get(0)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            }
        })
        .into_owned()
}
