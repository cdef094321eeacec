//! Script generation
//!
//! Drives a whole run: load the entry definition, expand every job depth
//! first and, unless the user quit, write the resulting script.

mod expand;
mod sanitize;
mod script;
mod session;
mod traits;

pub use expand::{Expander, Scope};
pub use sanitize::{WORKING_DIRECTORY_PLACEHOLDER, sanitize_command, substitute_parameters};
pub use script::{EmittedCommand, ScriptBuilder, ScriptOptions};
pub use session::{Decision, Flow, Session};
pub use traits::{Choice, NonInteractive, PromptError, Prompter, Question, Response, ScriptedPrompter};

use crate::pipeline::{ExclusionRules, GeneratorError, PipelineDefinition, load_definition};
use std::path::{Path, PathBuf};

/// Task type executed as a plain command line
pub const COMMAND_LINE_TASK: &str = "CmdLine@2";

/// Default bound on template nesting
pub const DEFAULT_MAX_TEMPLATE_DEPTH: usize = 32;

/// Everything the expansion needs besides the definition files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Absolute path substituted for the working directory placeholder
    pub working_directory: String,
    /// Ask before adding each command
    pub interactive: bool,
    /// Runtime behaviour of the generated script
    pub script: ScriptOptions,
    /// Commands and templates to leave out
    pub exclusions: ExclusionRules,
    /// Task types treated as shell commands
    pub supported_tasks: Vec<String>,
    /// Maximum template nesting
    pub max_template_depth: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            working_directory: ".".to_string(),
            interactive: false,
            script: ScriptOptions::default(),
            exclusions: ExclusionRules::default(),
            supported_tasks: vec![COMMAND_LINE_TASK.to_string()],
            max_template_depth: DEFAULT_MAX_TEMPLATE_DEPTH,
        }
    }
}

impl GeneratorSettings {
    /// Returns true if steps of this task type are emitted
    #[must_use]
    pub fn is_supported_task(&self, task: &str) -> bool {
        self.supported_tasks.iter().any(|t| t == task)
    }
}

/// Outcome of [`build_script`]
#[derive(Debug)]
pub enum Rendered {
    /// The finished, unwritten script
    Script(ScriptBuilder),
    /// The user quit; nothing is to be written
    Terminated,
}

/// Outcome of [`generate_script`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// The script was written
    Written {
        /// Where it was written
        path: PathBuf,
        /// Commands in the script, in order
        commands: Vec<EmittedCommand>,
    },
    /// The user quit; no file was written
    Terminated,
}

/// Loads and validates the entry pipeline definition
///
/// # Errors
///
/// Returns load errors and [`GeneratorError::MissingJobs`] if the document
/// has no `jobs` key.
pub fn load_pipeline(input: &Path) -> Result<PipelineDefinition, GeneratorError> {
    let root = load_definition(input)?;
    PipelineDefinition::from_node(&root).ok_or_else(|| GeneratorError::MissingJobs {
        path: input.to_path_buf(),
    })
}

/// Expands a pipeline into an in-memory script
///
/// # Errors
///
/// Returns the first fatal error of the run.
pub fn build_script(
    input: &Path,
    settings: &GeneratorSettings,
    prompter: &mut dyn Prompter,
) -> Result<Rendered, GeneratorError> {
    let pipeline = load_pipeline(input)?;
    let base_dir = input.parent().unwrap_or_else(|| Path::new("."));

    let mut script = ScriptBuilder::new(settings.script, &settings.working_directory);
    let flow = Expander::new(settings, prompter, &mut script).expand_pipeline(&pipeline, base_dir)?;

    if flow.is_terminated() {
        return Ok(Rendered::Terminated);
    }
    Ok(Rendered::Script(script))
}

/// Expands a pipeline and writes the script to `output`
///
/// Nothing is written when the run fails or the user quits.
///
/// # Errors
///
/// Returns the first fatal error of the run, or a write error.
pub fn generate_script(
    input: &Path,
    output: &Path,
    settings: &GeneratorSettings,
    prompter: &mut dyn Prompter,
) -> Result<Generation, GeneratorError> {
    match build_script(input, settings, prompter)? {
        Rendered::Script(script) => {
            let commands = script.commands().to_vec();
            script.write_to(output)?;
            tracing::info!(
                output = %output.display(),
                commands = commands.len(),
                "Script generated"
            );
            Ok(Generation::Written {
                path: output.to_path_buf(),
                commands,
            })
        }
        Rendered::Terminated => {
            tracing::info!("Generation terminated by user");
            Ok(Generation::Terminated)
        }
    }
}
