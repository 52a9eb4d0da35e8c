//! CLI utilities for voxgate.
//!
//! This crate holds the pieces that sit outside the voiceprint core:
//! configuration, enrollment and verification over the registry,
//! feedback phrases and output formatting.

pub mod config;
pub mod enroll;
pub mod output;
pub mod paths;
pub mod phrases;
pub mod registry;
pub mod verify;

pub use config::{load_config, Config};
pub use enroll::{enroll, Enrolled};
pub use output::{Output, OutputFormat};
pub use paths::Paths;
pub use phrases::{pick_phrase, Outcome};
pub use registry::{Enrollment, Registry, RegistryError};
pub use verify::{verify, Verification};
