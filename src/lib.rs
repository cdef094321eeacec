//! # yaml-to-script - Run Azure Pipelines locally
//!
//! Flattens an Azure Pipelines YAML definition, with its nested step
//! templates, into a single bash script that replays the pipeline's
//! command-line steps in order on a developer machine.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use yaml_to_script::{GeneratorSettings, NonInteractive, generate_script};
//!
//! let settings = GeneratorSettings {
//!     working_directory: "/src/app".to_string(),
//!     ..GeneratorSettings::default()
//! };
//! generate_script(
//!     Path::new(".ado/pr.yml"),
//!     Path::new("build.sh"),
//!     &settings,
//!     &mut NonInteractive,
//! )?;
//! # Ok::<(), yaml_to_script::GeneratorError>(())
//! ```
//!
//! ## Features
//!
//! - **Template expansion**: `template:` references are resolved relative to
//!   the referencing file, with `${{ parameters.* }}` substitution
//! - **Interactive mode**: confirm, skip, accept or skip all remaining
//!   commands, or quit
//! - **Exclusions**: drop commands by display name and templates by path
//! - **Generated runtime**: abort on failure, echoing and a timing summary,
//!   each independently switchable
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod generator;
pub mod infrastructure;
pub mod pipeline;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use generator::{
    Choice, Flow, GeneratorSettings, Generation, NonInteractive, PromptError, Prompter, Question,
    Response, ScriptBuilder, ScriptOptions, ScriptedPrompter, Session, build_script,
    generate_script, sanitize_command,
};
pub use infrastructure::{Config, TerminalPrompter};
pub use pipeline::{
    Bindings, ExclusionRules, GeneratorError, Job, Node, PipelineDefinition, Step,
    TemplateDefinition, load_definition,
};

/// Version of the yaml-to-script crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
