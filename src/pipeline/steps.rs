//! Pipeline data model
//!
//! Jobs, steps and templates interpreted from a [`Node`] tree. All of the
//! functions here are pure: they never touch the filesystem.

#![allow(clippy::must_use_candidate)]

use super::definition::Node;
use std::collections::BTreeMap;

/// Parameter name to value, scoped to one template invocation
pub type Bindings = BTreeMap<String, String>;

/// Display name used for command steps without one
pub const UNNAMED_COMMAND: &str = "Command without display name";

const UNNAMED_JOB: &str = "<unnamed job>";

mod keys {
    pub const JOBS: &str = "jobs";
    pub const JOB: &str = "job";
    pub const DEPLOYMENT: &str = "deployment";
    pub const STEPS: &str = "steps";
    pub const TEMPLATE: &str = "template";
    pub const PARAMETERS: &str = "parameters";
    pub const INPUTS: &str = "inputs";
    pub const SCRIPT: &str = "script";
    pub const DISPLAY_NAME: &str = "displayName";
    pub const TASK: &str = "task";
    pub const NAME: &str = "name";
}

/// Reference to a template, as written at the reference site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRef {
    /// Relative path, `\` separators normalized to `/`
    pub path: String,
    /// Parameters given at the reference site
    pub parameters: Bindings,
}

/// A literal command to emit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStep {
    /// Optional display name
    pub display_name: Option<String>,
    /// Optional task-type tag such as `CmdLine@2`
    pub task: Option<String>,
    /// Raw command text
    pub script: String,
}

impl CommandStep {
    /// Display name, or the placeholder for unnamed commands
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(UNNAMED_COMMAND)
    }
}

/// One entry of a step list
///
/// A step may carry a template reference, a command, or both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Step {
    /// Template to expand at this point
    pub template: Option<TemplateRef>,
    /// Command to emit after the template
    pub command: Option<CommandStep>,
}

impl Step {
    /// Interprets a step mapping
    ///
    /// Anything that is not a mapping yields an empty step.
    pub fn from_node(node: &Node) -> Self {
        let template = node
            .get(keys::TEMPLATE)
            .and_then(Node::as_scalar)
            .map(|path| TemplateRef {
                path: normalize_reference(path),
                parameters: node
                    .get(keys::PARAMETERS)
                    .map(bindings_from_node)
                    .unwrap_or_default(),
            });

        let script = node
            .get(keys::INPUTS)
            .and_then(|inputs| inputs.get(keys::SCRIPT))
            .or_else(|| node.get(keys::SCRIPT))
            .map(ToString::to_string);

        let command = script.map(|script| CommandStep {
            display_name: node
                .get(keys::DISPLAY_NAME)
                .and_then(Node::as_scalar)
                .map(str::to_string),
            task: node
                .get(keys::TASK)
                .and_then(Node::as_scalar)
                .map(str::to_string),
            script,
        });

        Self { template, command }
    }

    /// Returns true if the step contributes nothing
    pub fn is_empty(&self) -> bool {
        self.template.is_none() && self.command.is_none()
    }
}

/// A named, ordered list of steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Job name
    pub name: String,
    /// Steps in source order
    pub steps: Vec<Step>,
    /// Whether the mapping has a `steps` key, even one with nothing usable
    pub declares_steps: bool,
}

impl Job {
    /// Interprets a job mapping
    pub fn from_node(node: &Node) -> Self {
        let name = node
            .get(keys::JOB)
            .or_else(|| node.get(keys::DEPLOYMENT))
            .and_then(Node::as_scalar)
            .unwrap_or(UNNAMED_JOB)
            .to_string();

        Self {
            name,
            steps: steps_from_node(node.get(keys::STEPS)),
            declares_steps: node.get(keys::STEPS).is_some(),
        }
    }
}

/// The entry pipeline definition
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineDefinition {
    /// Jobs in source order
    pub jobs: Vec<Job>,
}

impl PipelineDefinition {
    /// Interprets the document root
    ///
    /// Returns `None` when the root has no `jobs` key.
    pub fn from_node(node: &Node) -> Option<Self> {
        let jobs = node.get(keys::JOBS)?;
        Some(Self {
            jobs: jobs
                .as_seq()
                .unwrap_or_default()
                .iter()
                .map(Job::from_node)
                .collect(),
        })
    }
}

/// A reusable step list with declared parameters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateDefinition {
    /// Declared parameter names, in declaration order
    pub parameters: Vec<String>,
    /// Steps in source order
    pub steps: Vec<Step>,
}

impl TemplateDefinition {
    /// Interprets a template document
    ///
    /// Parameters may be declared as a mapping (`name: default`) or as a
    /// sequence of mappings carrying a `name` key.
    pub fn from_node(node: &Node) -> Self {
        let parameters = match node.get(keys::PARAMETERS) {
            Some(Node::Map(entries)) => entries.iter().map(|(k, _)| k.clone()).collect(),
            Some(Node::Seq(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Node::Scalar(name) => Some(name.clone()),
                    other => other
                        .get(keys::NAME)
                        .and_then(Node::as_scalar)
                        .map(str::to_string),
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            parameters,
            steps: steps_from_node(node.get(keys::STEPS)),
        }
    }
}

fn steps_from_node(node: Option<&Node>) -> Vec<Step> {
    node.and_then(Node::as_seq)
        .unwrap_or_default()
        .iter()
        .map(Step::from_node)
        .filter(|step| !step.is_empty())
        .collect()
}

fn bindings_from_node(node: &Node) -> Bindings {
    node.as_map()
        .unwrap_or_default()
        .iter()
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect()
}

/// Normalizes a template reference to `/` separators
pub fn normalize_reference(reference: &str) -> String {
    reference.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Node {
        Node::parse(yaml).unwrap()
    }

    #[test]
    fn test_command_step_from_inputs_script() {
        let step = Step::from_node(&parse(
            "task: CmdLine@2\ndisplayName: Build\ninputs:\n  script: yarn build\n",
        ));

        let command = step.command.unwrap();
        assert_eq!(command.label(), "Build");
        assert_eq!(command.task.as_deref(), Some("CmdLine@2"));
        assert_eq!(command.script, "yarn build");
        assert!(step.template.is_none());
    }

    #[test]
    fn test_script_shorthand() {
        let step = Step::from_node(&parse("script: echo hi\n"));
        let command = step.command.unwrap();
        assert_eq!(command.script, "echo hi");
        assert_eq!(command.label(), UNNAMED_COMMAND);
        assert!(command.task.is_none());
    }

    #[test]
    fn test_template_step_with_parameters() {
        let step = Step::from_node(&parse(
            "template: templates\\build.yml\nparameters:\n  target: android\n  retries: 3\n",
        ));

        let template = step.template.unwrap();
        assert_eq!(template.path, "templates/build.yml");
        assert_eq!(template.parameters.get("target").unwrap(), "android");
        assert_eq!(template.parameters.get("retries").unwrap(), "3");
    }

    #[test]
    fn test_step_with_template_and_command() {
        let step = Step::from_node(&parse(
            "template: t.yml\ndisplayName: After\ninputs:\n  script: echo after\n",
        ));
        assert!(step.template.is_some());
        assert!(step.command.is_some());
    }

    #[test]
    fn test_task_without_script_is_dropped() {
        let job = Job::from_node(&parse(
            "job: Test\nsteps:\n  - task: NodeTool@0\n  - script: echo ok\n",
        ));
        assert_eq!(job.steps.len(), 1);
    }

    #[test]
    fn test_job_declares_steps_without_usable_entries() {
        let job = Job::from_node(&parse(
            "job: Setup\nsteps:\n  - task: NodeTool@0\n  - checkout: self\n",
        ));
        assert!(job.steps.is_empty());
        assert!(job.declares_steps);
        assert!(!Job::from_node(&parse("job: Docs\n")).declares_steps);
    }

    #[test]
    fn test_pipeline_requires_jobs_key() {
        assert!(PipelineDefinition::from_node(&parse("trigger: none\n")).is_none());

        let pipeline = PipelineDefinition::from_node(&parse(
            "jobs:\n  - job: A\n    steps:\n      - script: a\n  - job: B\n",
        ))
        .unwrap();
        assert_eq!(pipeline.jobs.len(), 2);
        assert_eq!(pipeline.jobs[0].name, "A");
        assert!(pipeline.jobs[1].steps.is_empty());
    }

    #[test]
    fn test_job_name_falls_back_to_deployment() {
        let job = Job::from_node(&parse("deployment: Release\n"));
        assert_eq!(job.name, "Release");
        assert_eq!(Job::from_node(&parse("pool: x\n")).name, UNNAMED_JOB);
    }

    #[test]
    fn test_template_parameters_mapping() {
        let template = TemplateDefinition::from_node(&parse(
            "parameters:\n  target: ''\n  config: Debug\nsteps:\n  - script: echo\n",
        ));
        assert_eq!(template.parameters, vec!["target", "config"]);
        assert_eq!(template.steps.len(), 1);
    }

    #[test]
    fn test_template_parameters_sequence() {
        let template = TemplateDefinition::from_node(&parse(
            "parameters:\n  - name: target\n    type: string\n  - name: config\n",
        ));
        assert_eq!(template.parameters, vec!["target", "config"]);
        assert!(template.steps.is_empty());
    }
}
