//! Pipeline domain types and loading

pub mod definition;
pub mod errors;
pub mod exclusions;
pub mod steps;

pub use definition::{Node, load_definition};
pub use errors::GeneratorError;
pub use exclusions::ExclusionRules;
pub use steps::{
    Bindings, CommandStep, Job, PipelineDefinition, Step, TemplateDefinition, TemplateRef,
    UNNAMED_COMMAND, normalize_reference,
};
