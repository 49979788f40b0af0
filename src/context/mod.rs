/// Context-aware action suggestions
///
/// Looks at the files in a directory and suggests commands that make sense
/// there (git, npm, pytest, ...), plus a few general ones.

pub mod detectors;
pub mod executor;
pub mod probe;
pub mod registry;

pub use probe::DirProbe;
pub use registry::{DetectorRegistry, Platform};

use std::fmt;

/// A suggested command with a display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub command: String,
}

impl Action {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
