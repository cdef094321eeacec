//! Template resolution and step processing
//!
//! The expansion is a depth-first walk over step lists. Template steps load
//! their template file (every time they are referenced), check that every
//! declared parameter is bound and recurse into the template's steps.
//! Command steps are filtered, optionally confirmed by the user and handed
//! to the [`ScriptBuilder`].
//!
//! Quitting is not an error: it surfaces as [`Flow::Terminated`] and is
//! returned unchanged through every level of recursion.

use super::sanitize::sanitize_command;
use super::script::ScriptBuilder;
use super::session::{Decision, Flow, Session};
use super::traits::{Choice, PromptError, Prompter, Question, Response};
use super::GeneratorSettings;
use crate::infrastructure::console::Color;
use crate::pipeline::{
    Bindings, CommandStep, GeneratorError, PipelineDefinition, Step, TemplateDefinition,
    load_definition,
};
use std::path::{Path, PathBuf};

/// Lexical scope of a step list
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// Directory relative template references resolve against
    pub base_dir: &'a Path,
    /// Parameters bound for this step list
    pub bindings: &'a Bindings,
    /// Template nesting depth, 0 for job steps
    pub depth: usize,
}

impl<'a> Scope<'a> {
    /// Scope of a job's own steps
    #[must_use]
    pub fn root(base_dir: &'a Path, bindings: &'a Bindings) -> Self {
        Self {
            base_dir,
            bindings,
            depth: 0,
        }
    }

    /// Resolves a template reference against this scope
    #[must_use]
    pub fn resolve(&self, reference: &str) -> PathBuf {
        self.base_dir.join(reference)
    }
}

/// Walks step lists and emits accepted commands
pub struct Expander<'a> {
    settings: &'a GeneratorSettings,
    prompter: &'a mut dyn Prompter,
    script: &'a mut ScriptBuilder,
}

impl<'a> Expander<'a> {
    /// Creates an expander writing into `script`
    pub fn new(
        settings: &'a GeneratorSettings,
        prompter: &'a mut dyn Prompter,
        script: &'a mut ScriptBuilder,
    ) -> Self {
        Self {
            settings,
            prompter,
            script,
        }
    }

    /// Expands every job of a pipeline
    ///
    /// Jobs without a `steps` key produce no output at all. A job whose
    /// steps are all unusable still gets its header.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`GeneratorError`] met during expansion.
    pub fn expand_pipeline(
        &mut self,
        pipeline: &PipelineDefinition,
        base_dir: &Path,
    ) -> Result<Flow, GeneratorError> {
        let mut session = Session::default();
        let no_bindings = Bindings::new();

        for job in &pipeline.jobs {
            if !job.declares_steps {
                tracing::debug!(job = %job.name, "Skipping job without steps");
                continue;
            }

            self.script.add_job_header(&job.name);

            match self.process_steps(&job.steps, Scope::root(base_dir, &no_bindings), session)? {
                Flow::Continue(next) => session = next,
                Flow::Terminated => return Ok(Flow::Terminated),
            }
        }

        Ok(Flow::Continue(session))
    }

    /// Loads a template, binds its parameters and expands its steps
    ///
    /// Declared parameters missing from `bindings` are requested from the
    /// user; declining aborts the run.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::MissingParameter`] if a parameter is not
    /// supplied, [`GeneratorError::TemplateDepthExceeded`] past the depth
    /// bound, and load errors for unreadable or malformed templates.
    pub fn resolve_template(
        &mut self,
        path: &Path,
        mut bindings: Bindings,
        depth: usize,
        session: Session,
    ) -> Result<Flow, GeneratorError> {
        if depth > self.settings.max_template_depth {
            return Err(GeneratorError::TemplateDepthExceeded {
                template: path.to_path_buf(),
                limit: self.settings.max_template_depth,
            });
        }

        let template = TemplateDefinition::from_node(&load_definition(path)?);
        tracing::debug!(
            template = %path.display(),
            depth,
            steps = template.steps.len(),
            "Expanding template"
        );

        for parameter in &template.parameters {
            if !bindings.contains_key(parameter) {
                let value = self.request_parameter(parameter, path)?;
                bindings.insert(parameter.clone(), value);
            }
        }

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let scope = Scope {
            base_dir,
            bindings: &bindings,
            depth,
        };
        self.process_steps(&template.steps, scope, session)
    }

    fn request_parameter(&mut self, parameter: &str, path: &Path) -> Result<String, GeneratorError> {
        let template = template_name(path);
        let missing = || GeneratorError::MissingParameter {
            parameter: parameter.to_string(),
            template: template.clone(),
        };

        let question = Question::new("Provide a value now?")
            .context(format!(
                "Error: Missing parameter '{parameter}' for template '{template}'."
            ))
            .choices(&[Choice::Quit])
            .accept_text(parameter)
            .default_choice(Choice::Quit)
            .color(Color::Red);

        match self.prompter.ask(&question) {
            Ok(Response::Text(value)) => Ok(value),
            Ok(Response::Choice(_)) | Err(PromptError::Unavailable) => Err(missing()),
            Err(err) => Err(err.into()),
        }
    }

    /// Processes a step list in order
    ///
    /// A step carrying both a template and a command expands the template
    /// first, then handles the command.
    ///
    /// # Errors
    ///
    /// Propagates any fatal error from nested templates.
    pub fn process_steps(
        &mut self,
        steps: &[Step],
        scope: Scope<'_>,
        mut session: Session,
    ) -> Result<Flow, GeneratorError> {
        for step in steps {
            if let Some(template) = &step.template {
                // Only the expansion is skipped; the step's own command below
                // is still handled.
                if self.settings.exclusions.is_template_excluded(&template.path) {
                    tracing::debug!(template = %template.path, "Template excluded");
                } else {
                    let bindings = template
                        .parameters
                        .iter()
                        .map(|(name, value)| (name.clone(), self.sanitize(value, scope.bindings)))
                        .collect();
                    let path = scope.resolve(&template.path);

                    match self.resolve_template(&path, bindings, scope.depth + 1, session)? {
                        Flow::Continue(next) => session = next,
                        Flow::Terminated => return Ok(Flow::Terminated),
                    }
                }
            }

            if let Some(command) = &step.command {
                match self.process_command(command, scope.bindings, session)? {
                    Flow::Continue(next) => session = next,
                    Flow::Terminated => return Ok(Flow::Terminated),
                }
            }
        }

        Ok(Flow::Continue(session))
    }

    fn process_command(
        &mut self,
        command: &CommandStep,
        bindings: &Bindings,
        session: Session,
    ) -> Result<Flow, GeneratorError> {
        let label = command.label();

        if let Some(task) = command.task.as_deref() {
            if !self.settings.is_supported_task(task) {
                if !session.skips_all() {
                    self.prompter.notify(
                        &format!(
                            "Warning: Unsupported task type '{task}' for command '{label}'. Skipping command.\n"
                        ),
                        Color::Yellow,
                    );
                }
                return Ok(Flow::Continue(session));
            }
        }

        let sanitized = self.sanitize(&command.script, bindings);

        if self.settings.exclusions.is_command_excluded(label) {
            tracing::debug!(label, "Command excluded");
            return Ok(Flow::Continue(session));
        }

        if session.skips_all() {
            return Ok(Flow::Continue(session));
        }

        let mut next = session;
        if self.settings.interactive && session.is_undecided() {
            let (decision, decided) = self.confirm_command(label, &sanitized, session)?;
            next = decided;

            match decision {
                Decision::Keep => {}
                Decision::Drop => return Ok(Flow::Continue(next)),
                Decision::Quit => {
                    self.prompter
                        .notify("Terminating script generation.", Color::Reset);
                    return Ok(Flow::Terminated);
                }
            }
        }

        self.script.add_command(label, &sanitized);
        Ok(Flow::Continue(next))
    }

    fn confirm_command(
        &mut self,
        label: &str,
        command: &str,
        session: Session,
    ) -> Result<(Decision, Session), GeneratorError> {
        let question = Question::new(format!("Add '{label}' to your script?"))
            .context(format!("Processing command: {label}:\n{command}\n"))
            .choices(&Choice::ALL)
            .default_choice(Choice::Yes);

        let choice = match self.prompter.ask(&question)? {
            Response::Choice(choice) => choice,
            Response::Text(_) => Choice::Yes,
        };

        let (decision, next) = session.decide(choice);
        if next != session {
            let message = if next.accepts_all() {
                "Accepting all subsequent commands.\n"
            } else {
                "Skipping all subsequent commands.\n"
            };
            self.prompter.notify(message, Color::Yellow);
        }

        Ok((decision, next))
    }

    fn sanitize(&self, text: &str, bindings: &Bindings) -> String {
        sanitize_command(text, &self.settings.working_directory, bindings)
    }
}

fn template_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string())
}
