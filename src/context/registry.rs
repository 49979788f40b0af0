/// Detector registry
///
/// Runs every detector against one directory and concatenates the results in
/// declaration order, then appends the general actions for the platform.
/// Nothing is merged or deduplicated.

use crate::context::detectors::{
    detect_docker, detect_git, detect_go, detect_make, detect_node, detect_python,
};
use crate::context::{Action, DirProbe};
use std::path::Path;
use tracing::debug;

pub type Detector = fn(&DirProbe) -> Vec<Action>;

/// Host family, which decides the general-purpose commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            _ => Platform::Unix,
        }
    }

    /// Open directory, list contents, disk usage, large files
    pub fn general_actions(self) -> Vec<Action> {
        let open = match self {
            Platform::Windows => "explorer .",
            Platform::MacOs => "open .",
            Platform::Unix => "xdg-open .",
        };

        match self {
            Platform::Windows => vec![
                Action::new("Open current directory", open),
                Action::new("List directory contents", "cmd /C dir"),
                Action::new(
                    "Show disk usage",
                    "powershell -NoProfile -Command Get-ChildItem | Measure-Object -Property Length -Sum",
                ),
                Action::new(
                    "Find large files",
                    "powershell -NoProfile -Command Get-ChildItem -Recurse -File | Where-Object Length -gt 10MB",
                ),
            ],
            Platform::MacOs | Platform::Unix => vec![
                Action::new("Open current directory", open),
                Action::new("List directory contents", "ls -la"),
                Action::new("Show disk usage", "du -sh ."),
                Action::new("Find large files", "find . -type f -size +10M -exec ls -lh {} ;"),
            ],
        }
    }
}

pub struct DetectorRegistry {
    detectors: Vec<(&'static str, Detector)>,
    platform: Platform,
}

impl DetectorRegistry {
    /// The fixed detector set for the given platform
    pub fn new(platform: Platform) -> Self {
        Self {
            detectors: vec![
                ("git", detect_git as Detector),
                ("node", detect_node as Detector),
                ("python", detect_python as Detector),
                ("go", detect_go as Detector),
                ("docker", detect_docker as Detector),
                ("make", detect_make as Detector),
            ],
            platform,
        }
    }

    /// Detected actions for `dir` followed by the general actions
    pub fn suggest<P: AsRef<Path>>(&self, dir: P) -> Vec<Action> {
        let mut actions = self.detect(dir);
        actions.extend(self.platform.general_actions());
        actions
    }

    /// Detected actions only, without the general tail
    pub fn detect<P: AsRef<Path>>(&self, dir: P) -> Vec<Action> {
        let probe = DirProbe::new(dir);
        let mut actions = Vec::new();

        for (name, detector) in &self.detectors {
            let found = detector(&probe);
            if !found.is_empty() {
                debug!(detector = *name, actions = found.len(), "context detected");
            }
            actions.extend(found);
        }

        actions
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}
