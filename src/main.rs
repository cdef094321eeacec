//! yaml-to-script - Run Azure Pipelines locally as a bash script
//!
//! ## Commands
//!
//! - `yaml-to-script generate` - Flatten a pipeline definition into a script
//! - `yaml-to-script completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Generate a script running every command step of the PR pipeline
//! yaml-to-script generate -p .ado/pr.yml -o build.sh -d .
//!
//! # Pick the commands one by one
//! yaml-to-script generate -p .ado/pr.yml -o build.sh -d . --interactive
//!
//! # Keep going past failures and skip the timing table
//! yaml-to-script generate -p .ado/pr.yml -o build.sh -d . --no-errorcheck --no-summary
//!
//! # Generate shell completions
//! yaml-to-script completions bash > /etc/bash_completion.d/yaml-to-script
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if std::env::var("YAML_TO_SCRIPT_VERBOSE").is_ok() {
                eprintln!("{:?}", e);
            }
            ExitCode::FAILURE
        }
    }
}
