//! Path validation before generation
//!
//! Each check resolves a path to an absolute one and, when it is unusable,
//! asks the user for another. `Ok(None)` means the user chose to quit.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use yaml_to_script::generator::{Choice, Prompter, Question, Response};
use yaml_to_script::infrastructure::Color;

const TERMINATING: &str = "Terminating script generation.";

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}

fn ask_for_path(prompter: &mut dyn Prompter, context: String, hint: &str) -> Result<Option<PathBuf>> {
    let question = Question::new("Enter a new path or quit:")
        .context(context)
        .choices(&[Choice::Quit])
        .accept_text(hint)
        .color(Color::Red);

    let response = prompter
        .ask(&question)
        .context("Cannot ask for a replacement path")?;

    Ok(match response {
        Response::Text(path) => Some(PathBuf::from(path)),
        Response::Choice(_) => {
            prompter.notify(TERMINATING, Color::Reset);
            None
        }
    })
}

/// Resolves the pipeline definition path, which must be an existing file
///
/// # Errors
///
/// Fails if the path is unusable and no replacement can be asked for.
pub fn validate_input_path(path: &Path, prompter: &mut dyn Prompter) -> Result<Option<PathBuf>> {
    let mut candidate = absolute(path)?;

    while !candidate.is_file() {
        tracing::debug!(path = %candidate.display(), "Input path not found");
        let context = format!("The file {} does not exist.", candidate.display());
        match ask_for_path(prompter, context, "input path")? {
            Some(next) => candidate = absolute(&next)?,
            None => return Ok(None),
        }
    }

    Ok(Some(candidate))
}

/// Resolves the default working directory, which must be an existing directory
///
/// # Errors
///
/// Fails if the path is unusable and no replacement can be asked for.
pub fn validate_working_directory(
    path: &Path,
    prompter: &mut dyn Prompter,
) -> Result<Option<PathBuf>> {
    let mut candidate = absolute(path)?;

    while !candidate.is_dir() {
        tracing::debug!(path = %candidate.display(), "Working directory not found");
        let context = format!("The directory {} does not exist.", candidate.display());
        match ask_for_path(prompter, context, "working directory")? {
            Some(next) => candidate = absolute(&next)?,
            None => return Ok(None),
        }
    }

    Ok(Some(candidate))
}

/// Resolves the output path, confirming before an existing file is replaced
///
/// With `force` an existing file is overwritten without asking.
///
/// # Errors
///
/// Fails if confirmation is needed and no answer can be obtained.
pub fn validate_output_path(
    path: &Path,
    force: bool,
    prompter: &mut dyn Prompter,
) -> Result<Option<PathBuf>> {
    let mut candidate = absolute(path)?;

    while candidate.exists() && !force {
        let question = Question::new("Are you sure you want to overwrite it?")
            .context(format!("The file {} already exists.", candidate.display()))
            .choices(&[Choice::Yes, Choice::No, Choice::Quit])
            .default_choice(Choice::Yes)
            .color(Color::Yellow);

        let response = prompter
            .ask(&question)
            .with_context(|| format!("Output file already exists: {}", candidate.display()))?;

        match response {
            Response::Choice(Choice::Yes) => break,
            Response::Choice(Choice::No) => {
                let context = "Choose a different output file.".to_string();
                match ask_for_path(prompter, context, "output path")? {
                    Some(next) => candidate = absolute(&next)?,
                    None => return Ok(None),
                }
            }
            _ => {
                prompter.notify(TERMINATING, Color::Reset);
                return Ok(None);
            }
        }
    }

    Ok(Some(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use yaml_to_script::generator::{NonInteractive, ScriptedPrompter};

    fn text(s: &Path) -> Response {
        Response::Text(s.to_string_lossy().into_owned())
    }

    #[test]
    fn test_existing_input_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("pr.yml");
        fs::write(&input, "jobs: []\n").unwrap();

        let resolved = validate_input_path(&input, &mut NonInteractive).unwrap();
        assert_eq!(resolved, Some(input));
    }

    #[test]
    fn test_missing_input_reprompts() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("pr.yml");
        fs::write(&input, "jobs: []\n").unwrap();
        let mut prompter = ScriptedPrompter::new([text(&temp_dir.path().join("nope.yml")), text(&input)]);

        let resolved = validate_input_path(&temp_dir.path().join("typo.yml"), &mut prompter).unwrap();

        assert_eq!(resolved, Some(input));
        assert_eq!(prompter.asked.len(), 2);
    }

    #[test]
    fn test_missing_input_quit() {
        let temp_dir = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::choices([Choice::Quit]);

        let resolved = validate_input_path(&temp_dir.path().join("typo.yml"), &mut prompter).unwrap();
        assert_eq!(resolved, None);
        assert_eq!(prompter.notices, vec!["Terminating script generation."]);
    }

    #[test]
    fn test_missing_input_without_terminal_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_input_path(&temp_dir.path().join("typo.yml"), &mut NonInteractive).is_err());
    }

    #[test]
    fn test_working_directory_must_be_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "").unwrap();
        let mut prompter = ScriptedPrompter::new([text(temp_dir.path())]);

        let resolved = validate_working_directory(&file, &mut prompter).unwrap();
        assert_eq!(resolved.as_deref(), Some(temp_dir.path()));
    }

    #[test]
    fn test_new_output_needs_no_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("build.sh");

        let resolved = validate_output_path(&output, false, &mut NonInteractive).unwrap();
        assert_eq!(resolved, Some(output));
    }

    #[test]
    fn test_existing_output_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("build.sh");
        fs::write(&output, "").unwrap();

        let mut yes = ScriptedPrompter::choices([Choice::Yes]);
        assert_eq!(
            validate_output_path(&output, false, &mut yes).unwrap(),
            Some(output.clone())
        );

        let mut quit = ScriptedPrompter::choices([Choice::Quit]);
        assert_eq!(validate_output_path(&output, false, &mut quit).unwrap(), None);

        assert!(validate_output_path(&output, false, &mut NonInteractive).is_err());
        assert_eq!(
            validate_output_path(&output, true, &mut NonInteractive).unwrap(),
            Some(output)
        );
    }

    #[test]
    fn test_declined_overwrite_asks_for_new_path() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("build.sh");
        fs::write(&output, "").unwrap();
        let other = temp_dir.path().join("other.sh");
        let mut prompter = ScriptedPrompter::new([Response::Choice(Choice::No), text(&other)]);

        let resolved = validate_output_path(&output, false, &mut prompter).unwrap();
        assert_eq!(resolved, Some(other));
    }
}
