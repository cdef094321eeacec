//! CLI for yaml-to-script
//!
//! - `generate`: Flatten an Azure Pipelines definition into a bash script
//! - `completions`: Generate shell completions

pub mod completions;
pub mod generate;
pub mod validate;

use anyhow::{Result, bail};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use yaml_to_script::generator::{Generation, NonInteractive, Prompter, ScriptOptions};
use yaml_to_script::infrastructure::{
    Color, LOG_ENV, TerminalPrompter, colorize, init_logging, level_for_verbosity,
};

const BIN_NAME: &str = "yaml-to-script";

/// CLI arguments for yaml-to-script
#[derive(Parser, Debug)]
#[command(name = "yaml-to-script")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a bash script from a pipeline definition
    Generate(GenerateArgs),

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Pipeline definition to convert
    #[arg(short, long)]
    path: PathBuf,
    /// Script file to write
    #[arg(short, long)]
    output: PathBuf,
    /// Directory the generated commands run in
    #[arg(short = 'd', long = "defaultworkingdir")]
    default_working_dir: PathBuf,
    /// Confirm each command before adding it
    #[arg(short, long)]
    interactive: bool,
    /// Keep going when a command fails
    #[arg(long)]
    no_errorcheck: bool,
    /// Do not print commands before running them
    #[arg(long)]
    no_echo: bool,
    /// Do not time commands or print a summary
    #[arg(long)]
    no_summary: bool,
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Display name of a command to leave out (repeatable)
    #[arg(long = "exclude-command", value_name = "NAME")]
    exclude_commands: Vec<String>,
    /// Template reference to leave out (repeatable)
    #[arg(long = "exclude-template", value_name = "PATH")]
    exclude_templates: Vec<String>,
    /// Overwrite the output file without asking
    #[arg(short, long)]
    force: bool,
    /// Enable logging (-v configured level, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl GenerateArgs {
    fn into_request(self) -> generate::GenerateRequest {
        generate::GenerateRequest {
            path: self.path,
            output: self.output,
            working_directory: self.default_working_dir,
            interactive: self.interactive,
            script: ScriptOptions {
                echo: !self.no_echo,
                error_check: !self.no_errorcheck,
                summary: !self.no_summary,
            },
            exclude_commands: self.exclude_commands,
            exclude_templates: self.exclude_templates,
            force: self.force,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Args::command()
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Generate(generate_args) => {
            let config = generate::load_config(generate_args.config.as_deref())?;
            if generate_args.verbose > 0 || std::env::var_os(LOG_ENV).is_some() {
                init_logging(level_for_verbosity(generate_args.verbose, &config.log_level));
            }

            let has_terminal = std::io::stdin().is_terminal();
            if generate_args.interactive && !has_terminal {
                bail!("Interactive mode requires a terminal on stdin");
            }

            let request = generate_args.into_request();
            let mut terminal;
            let mut non_interactive = NonInteractive;
            let prompter: &mut dyn Prompter = if has_terminal {
                terminal = TerminalPrompter::stdio();
                &mut terminal
            } else {
                &mut non_interactive
            };

            match generate::run_generate(&request, &config, prompter)? {
                Generation::Written { path, .. } => {
                    let message = format!("Script generated successfully to {}", path.display());
                    println!("{}", colorize(&message, Color::Green));
                }
                Generation::Terminated => {
                    tracing::debug!("No script written");
                }
            }
        }
        Command::Completions { shell, output } => {
            use clap_complete::Shell;

            let shell_enum = match shell {
                ShellArg::Bash => Shell::Bash,
                ShellArg::Zsh => Shell::Zsh,
                ShellArg::Fish => Shell::Fish,
                ShellArg::PowerShell => Shell::PowerShell,
            };

            let completions = completions::generate_completions(shell_enum)?;

            if let Some(output_path) = output {
                completions::save_completions(&completions, &output_path)?;
            } else {
                println!("{}", completions);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_flags() {
        let args = Args::try_parse_from([
            BIN_NAME,
            "generate",
            "-p",
            ".ado/pr.yml",
            "-o",
            "build.sh",
            "-d",
            ".",
            "--no-errorcheck",
            "--no-summary",
            "--exclude-command",
            "Npm pack",
            "--exclude-command",
            "Publish",
            "-vv",
        ])
        .unwrap();

        let Command::Generate(generate_args) = args.command else {
            panic!("expected generate");
        };
        assert_eq!(generate_args.verbose, 2);

        let request = generate_args.into_request();
        assert_eq!(request.path, PathBuf::from(".ado/pr.yml"));
        assert_eq!(request.exclude_commands, vec!["Npm pack", "Publish"]);
        assert!(!request.interactive);
        assert_eq!(
            request.script,
            ScriptOptions {
                echo: true,
                error_check: false,
                summary: false,
            }
        );
    }

    #[test]
    fn test_generate_requires_paths() {
        assert!(Args::try_parse_from([BIN_NAME, "generate", "-p", "pr.yml"]).is_err());
    }
}
