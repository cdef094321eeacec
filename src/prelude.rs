//! Prelude module for common imports

// Re-export pipeline types with full paths
pub use crate::pipeline::definition::{Node, load_definition};
pub use crate::pipeline::errors::GeneratorError;
pub use crate::pipeline::exclusions::ExclusionRules;
pub use crate::pipeline::steps::{
    Bindings, CommandStep, Job, PipelineDefinition, Step, TemplateDefinition, TemplateRef,
};

// Re-export generator types
pub use crate::generator::{
    Choice, Flow, GeneratorSettings, Generation, NonInteractive, Prompter, Question, Response,
    ScriptOptions, ScriptedPrompter, build_script, generate_script,
};

// Re-export infrastructure types
pub use crate::infrastructure::{Color, Config, TerminalPrompter, init_logging};
