//! Script builder
//!
//! Accumulates the generated bash script in memory. Every accepted command
//! becomes one `call_wrapper` invocation; the wrapper provides echoing,
//! timing, exit-code checking and summary bookkeeping at runtime.
//!
//! Layout of the output:
//!
//! 1. `#!/bin/bash`
//! 2. color and working directory variables
//! 3. summary arrays, `format_duration`, `record_summary`, `print_summary`
//!    (summary enabled only)
//! 4. `call_wrapper`
//! 5. one commented `call_wrapper '<label>' '<command>'` per command
//! 6. `print_summary 0` (summary enabled only)

use crate::infrastructure::console::Color;
use crate::pipeline::GeneratorError;
use std::fs;
use std::path::Path;

/// Runtime behaviour of the generated script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptOptions {
    /// Print each command before running it
    pub echo: bool,
    /// Abort on the first failing command
    pub error_check: bool,
    /// Time each command and print a summary table
    pub summary: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            echo: true,
            error_check: true,
            summary: true,
        }
    }
}

/// A command written to the script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedCommand {
    /// Display name
    pub label: String,
    /// Sanitized command text
    pub command: String,
}

const SUMMARY_FUNCTIONS: &str = r##"SUMMARY_LABELS=()
SUMMARY_RESULTS=()
SUMMARY_STARTS=()
SUMMARY_ENDS=()
SUMMARY_DURATIONS=()

format_duration()
{
    local total="$1"
    printf '%02d:%02d:%02d' $((total / 3600)) $((total % 3600 / 60)) $((total % 60))
}

record_summary()
{
    SUMMARY_LABELS+=("$1")
    SUMMARY_RESULTS+=("$2")
    SUMMARY_STARTS+=("$3")
    SUMMARY_ENDS+=("$4")
    SUMMARY_DURATIONS+=("$5")
}

print_summary()
{
    local status="$1"
    local width=7
    local label i color
    for label in "${SUMMARY_LABELS[@]}"; do
        if [ "${#label}" -gt "${width}" ]; then
            width="${#label}"
        fi
    done

    echo ""
    echo "==================== Summary ===================="
    printf "%-${width}s  %-6s  %-15s  %-15s  %s\n" "Command" "Result" "Start" "End" "Duration"
    for i in "${!SUMMARY_LABELS[@]}"; do
        if [ "${SUMMARY_RESULTS[$i]}" = "OK" ]; then
            color="${GREEN}"
        else
            color="${RED}"
        fi
        printf "%-${width}s  ${color}%-6s${RESET}  %-15s  %-15s  %s\n" \
            "${SUMMARY_LABELS[$i]}" "${SUMMARY_RESULTS[$i]}" \
            "${SUMMARY_STARTS[$i]}" "${SUMMARY_ENDS[$i]}" "${SUMMARY_DURATIONS[$i]}"
    done
    exit "${status}"
}
"##;

/// Append-only buffer for the generated script
#[derive(Debug, Clone)]
pub struct ScriptBuilder {
    buffer: String,
    options: ScriptOptions,
    commands: Vec<EmittedCommand>,
}

impl ScriptBuilder {
    /// Starts a script whose commands run from `working_directory`
    #[must_use]
    pub fn new(options: ScriptOptions, working_directory: &str) -> Self {
        let mut builder = Self {
            buffer: String::new(),
            options,
            commands: Vec::new(),
        };

        builder.add_line("#!/bin/bash");
        builder.add_line("");
        builder.add_variables(working_directory);
        if options.summary {
            builder.add_line(SUMMARY_FUNCTIONS);
        }
        builder.add_call_wrapper();

        builder
    }

    fn add_variables(&mut self, working_directory: &str) {
        for (name, color) in [
            ("GREEN", Color::Green),
            ("RED", Color::Red),
            ("MAGENTA", Color::Magenta),
            ("RESET", Color::Reset),
        ] {
            self.add_line(&format!("{name}='{}'", color.shell_escape()));
        }
        self.add_line(&format!(
            "DEFAULT_WORKING_DIRECTORY={}",
            shell_words::quote(working_directory)
        ));
        self.add_line("");
    }

    fn add_call_wrapper(&mut self) {
        let ScriptOptions {
            echo,
            error_check,
            summary,
        } = self.options;

        self.add_line("call_wrapper()");
        self.add_line("{");
        self.add_line("    local label=\"$1\"");
        self.add_line("    local command=\"$2\"");
        self.add_line("    local start_time start_stamp end_time end_stamp duration exit_code result");
        self.add_line("    start_time=$(date +%s)");
        self.add_line("    start_stamp=$(date +\"%b %d %T\")");

        if summary {
            self.add_line(
                "    printf \"${MAGENTA}%s : START %s${RESET}\\n\" \"${label}\" \"${start_stamp}\"",
            );
        }
        if echo {
            self.add_line("    printf '%s\\n' \"${command}\"");
        }

        self.add_line("    (cd \"${DEFAULT_WORKING_DIRECTORY}\" && eval \"${command}\")");
        self.add_line("    exit_code=$?");

        if summary {
            self.add_line("    end_time=$(date +%s)");
            self.add_line("    end_stamp=$(date +\"%b %d %T\")");
            self.add_line("    duration=$(format_duration $((end_time - start_time)))");
            self.add_line(
                "    printf \"${MAGENTA}%s : END %s - %s${RESET}\\n\" \"${label}\" \"${end_stamp}\" \"${duration}\"",
            );
            self.add_line("    result=\"OK\"");
            self.add_line("    if [ \"${exit_code}\" -ne 0 ]; then");
            self.add_line("        result=\"FAILED\"");
            self.add_line("    fi");
        }

        self.add_line("    echo \"\"");

        if error_check {
            self.add_line("    if [ \"${exit_code}\" -ne 0 ]; then");
            self.add_line(
                "        printf \"${RED}%s\\nfailed with error code %s. Stopping execution early.${RESET}\\n\" \"${command}\" \"${exit_code}\"",
            );
            if summary {
                self.add_line(
                    "        record_summary \"${label}\" \"${result}\" \"${start_stamp}\" \"${end_stamp}\" \"${duration}\"",
                );
                self.add_line("        print_summary \"${exit_code}\"");
            } else {
                self.add_line("        exit \"${exit_code}\"");
            }
            self.add_line("    fi");
        }

        if summary {
            self.add_line(
                "    record_summary \"${label}\" \"${result}\" \"${start_stamp}\" \"${end_stamp}\" \"${duration}\"",
            );
        }

        self.add_line("}");
        self.add_line("");
    }

    /// Appends a `# ` comment line
    pub fn add_comment(&mut self, comment: &str) {
        self.add_line(&format!("# {}", single_line(comment)));
    }

    /// Appends a raw line
    pub fn add_line(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Starts the section of a job
    pub fn add_job_header(&mut self, name: &str) {
        self.add_comment(&format!("Job: {name}"));
        self.add_line("");
    }

    /// Appends one wrapped command
    pub fn add_command(&mut self, label: &str, command: &str) {
        tracing::debug!(label, "Emitting command");

        self.add_comment(label);
        self.add_line(&format!(
            "call_wrapper {} {}",
            shell_words::quote(label),
            shell_words::quote(command)
        ));
        self.add_line("");

        self.commands.push(EmittedCommand {
            label: label.to_string(),
            command: command.to_string(),
        });
    }

    /// Commands emitted so far, in order
    #[must_use]
    pub fn commands(&self) -> &[EmittedCommand] {
        &self.commands
    }

    /// Script text emitted so far
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Appends the closing summary call and returns the full script
    #[must_use]
    pub fn finish(mut self) -> String {
        if self.options.summary {
            self.add_line("print_summary 0");
        }
        self.buffer
    }

    /// Finishes the script and writes it, executable by its owner
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Write`] if the file cannot be written or
    /// its permissions cannot be changed.
    pub fn write_to(self, path: &Path) -> Result<(), GeneratorError> {
        let to_error = |source| GeneratorError::Write {
            path: path.to_path_buf(),
            source,
        };

        fs::write(path, self.finish()).map_err(to_error)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut permissions = fs::metadata(path).map_err(to_error)?.permissions();
            permissions.set_mode(permissions.mode() | 0o100);
            fs::set_permissions(path, permissions).map_err(to_error)?;
        }

        Ok(())
    }
}

fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}
