//! Infrastructure layer
//!
//! Configuration, logging and terminal adapters.

mod config;
pub mod console;
mod logging;
mod prompt;

pub use config::Config;
pub use console::{Color, colorize};
pub use logging::{LOG_ENV, init_logging, level_for_verbosity};
pub use prompt::TerminalPrompter;
