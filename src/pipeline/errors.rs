//! Error types for script generation

use crate::generator::PromptError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation run
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A definition file could not be read
    #[error("Failed to read definition '{}': {source}", path.display())]
    Read {
        /// Path of the definition file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A definition file is not valid YAML
    #[error("Failed to parse definition '{}': {source}", path.display())]
    Parse {
        /// Path of the definition file.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The entry definition has no `jobs` collection
    #[error("No jobs found in the YAML file located at {}! Not a valid pipeline definition.", path.display())]
    MissingJobs {
        /// Path of the entry definition.
        path: PathBuf,
    },

    /// A template declares a parameter nobody supplied
    #[error("Missing parameter '{parameter}' for template '{template}'")]
    MissingParameter {
        /// Name of the declared parameter.
        parameter: String,
        /// File name of the template.
        template: String,
    },

    /// Templates are nested deeper than the configured bound
    #[error("Template nesting exceeded {limit} levels at '{}'", template.display())]
    TemplateDepthExceeded {
        /// Template that would have exceeded the bound.
        template: PathBuf,
        /// Configured maximum depth.
        limit: usize,
    },

    /// Asking the user failed
    #[error("Prompt failed: {0}")]
    Prompt(#[from] PromptError),

    /// The generated script could not be written
    #[error("Failed to write script '{}': {source}", path.display())]
    Write {
        /// Target path of the script.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    /// Returns true if the error stems from a definition file
    #[must_use]
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::Parse { .. } | Self::MissingJobs { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message() {
        let err = GeneratorError::MissingParameter {
            parameter: "target".to_string(),
            template: "build.yml".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing parameter 'target' for template 'build.yml'"
        );
        assert!(!err.is_definition_error());
    }

    #[test]
    fn test_missing_jobs_message() {
        let err = GeneratorError::MissingJobs {
            path: PathBuf::from("/repo/.ado/pr.yml"),
        };
        assert!(err.to_string().contains("/repo/.ado/pr.yml"));
        assert!(err.is_definition_error());
    }

    #[test]
    fn test_prompt_error_converts() {
        let err: GeneratorError = PromptError::Closed.into();
        assert!(matches!(err, GeneratorError::Prompt(PromptError::Closed)));
    }
}
