//! `yaml-to-script generate` - Flatten a pipeline into a bash script

use super::validate::{validate_input_path, validate_output_path, validate_working_directory};
use anyhow::Result;
use std::path::{Path, PathBuf};
use yaml_to_script::generator::{
    GeneratorSettings, Generation, Prompter, ScriptOptions, generate_script,
};
use yaml_to_script::infrastructure::Config;
use yaml_to_script::pipeline::ExclusionRules;

/// Options of a generate run, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Entry pipeline definition
    pub path: PathBuf,
    /// Script to write
    pub output: PathBuf,
    /// Directory the script's commands run in
    pub working_directory: PathBuf,
    /// Ask before adding each command
    pub interactive: bool,
    /// Generated script options
    pub script: ScriptOptions,
    /// Extra command display names to exclude
    pub exclude_commands: Vec<String>,
    /// Extra template references to exclude
    pub exclude_templates: Vec<String>,
    /// Overwrite an existing output without asking
    pub force: bool,
}

/// Loads the config file, or the defaults when none is given
///
/// # Errors
///
/// Fails if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Combines config and command line into generator settings
#[must_use]
pub fn build_settings(
    request: &GenerateRequest,
    config: &Config,
    working_directory: &Path,
) -> GeneratorSettings {
    let mut exclusions = config.exclusions.clone();
    exclusions.extend(ExclusionRules {
        commands: request.exclude_commands.clone(),
        templates: request.exclude_templates.clone(),
    });

    GeneratorSettings {
        working_directory: working_directory.to_string_lossy().into_owned(),
        interactive: request.interactive,
        script: request.script,
        exclusions,
        supported_tasks: config.supported_tasks.clone(),
        max_template_depth: config.max_template_depth,
    }
}

/// Validates paths, then generates the script
///
/// Returns [`Generation::Terminated`] if the user quits at any prompt.
///
/// # Errors
///
/// Fails on unusable paths that cannot be replaced and on generation errors.
pub fn run_generate(
    request: &GenerateRequest,
    config: &Config,
    prompter: &mut dyn Prompter,
) -> Result<Generation> {
    let Some(input) = validate_input_path(&request.path, prompter)? else {
        return Ok(Generation::Terminated);
    };
    let Some(working_directory) = validate_working_directory(&request.working_directory, prompter)?
    else {
        return Ok(Generation::Terminated);
    };
    let Some(output) = validate_output_path(&request.output, request.force, prompter)? else {
        return Ok(Generation::Terminated);
    };

    let settings = build_settings(request, config, &working_directory);
    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        working_directory = %settings.working_directory,
        interactive = settings.interactive,
        "Generating script"
    );

    generate_script(&input, &output, &settings, prompter).map_err(|err| {
        let context = if err.is_definition_error() {
            format!("Invalid pipeline definition: {}", input.display())
        } else {
            format!("Failed to generate script from: {}", input.display())
        };
        anyhow::Error::new(err).context(context)
    })
}
