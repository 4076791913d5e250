use std::path::PathBuf;

use super::diagnostics::Diagnostic;
use super::events::Event;
use super::probe::ContainerState;
use super::scaffold::ScaffoldKind;

/// Result wrapper returned by high-level operations.
pub type OperationResult<T> = crate::error::Result<OperationOutput<T>>;

/// Envelope for successful operation outcomes.
#[derive(Debug)]
pub struct OperationOutput<T> {
    /// Primary value produced by the operation.
    pub value: T,
    /// Diagnostics collected while performing the operation.
    pub diagnostics: Vec<Diagnostic>,
    /// Structured events captured during the run.
    pub events: Vec<Event>,
}

impl<T> OperationOutput<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }
}

/// Outcome of `kafka:create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created { name: String, image: String },
    /// Nothing was dispatched; the runtime already knows the container.
    AlreadyExists { name: String, state: ContainerState },
}

/// Outcome of `kafka:start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started { name: String },
    AlreadyRunning { name: String },
}

/// Outcome of `kafka:topics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicsOutcome {
    pub registry_path: PathBuf,
    /// Topics newly added by this run.
    pub added: Vec<String>,
    /// Full registry after the merge.
    pub topics: Vec<String>,
}

/// Outcome of `kafka:migrate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateOutcome {
    pub registry_path: PathBuf,
    pub created: Vec<String>,
    /// The topic that stopped the migration, if any.
    pub failure: Option<TopicFailure>,
    /// Topics never attempted because an earlier one failed.
    pub pending: Vec<String>,
}

impl MigrateOutcome {
    pub fn halted(&self) -> bool {
        self.failure.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicFailure {
    pub topic: String,
    pub message: String,
}

/// Outcome of the scaffolding commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub kind: ScaffoldKind,
    pub path: PathBuf,
    pub overwritten: bool,
    /// Type name used in the generated module, when it defines one.
    pub type_name: Option<String>,
}

/// Outcome of `make:token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOutcome {
    pub token: String,
    pub token_path: PathBuf,
    pub hashed: bool,
    /// Env file and key that received the token, unless skipped.
    pub env: Option<(PathBuf, String)>,
}
