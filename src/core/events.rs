use std::path::PathBuf;

use super::probe::ContainerState;
use super::scaffold::ScaffoldKind;

/// Structured event emitted while an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// State reported by the container runtime before a lifecycle transition.
    ContainerObserved {
        container: String,
        state: ContainerState,
    },
    ContainerCreated { container: String, image: String },
    ContainerStarted { container: String },
    /// The topic registry file was rewritten.
    RegistryUpdated {
        path: PathBuf,
        /// Topics that were not present before this run, in the order they were added.
        added: Vec<String>,
        total: usize,
    },
    TopicCreated { topic: String },
    TopicFailed { topic: String, message: String },
    FileGenerated {
        kind: ScaffoldKind,
        path: PathBuf,
        overwritten: bool,
    },
    TokenStored { path: PathBuf, hashed: bool },
    EnvPatched {
        path: PathBuf,
        key: String,
        /// `true` when an existing `KEY=` line was rewritten rather than appended.
        replaced: bool,
    },
}
