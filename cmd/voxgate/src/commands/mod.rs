//! CLI commands module.

mod config;
mod enroll;
mod features;
mod matching;
mod normalize;
mod util;
mod verify;

pub use config::ConfigCommand;
pub use enroll::EnrollCommand;
pub use features::FeaturesCommand;
pub use matching::MatchCommand;
pub use normalize::NormalizeCommand;
pub use verify::VerifyCommand;

// Re-export utils for use in commands
pub(crate) use util::*;
