//! Core brokerkit library API surface.

pub mod diagnostics;
pub mod events;
pub mod options;
pub mod outcome;
pub mod reporter;

pub mod container;
pub mod migrate;
pub mod operations;
pub mod probe;
pub mod project;
pub mod registry;
pub mod scaffold;
pub mod token;

#[cfg(test)]
pub(crate) mod testing;

pub use diagnostics::{Diagnostic, Severity};
pub use events::Event;
pub use operations::{
    config_module, consumer, create, create_with, make_token, migrate, migrate_with, producer,
    start, start_with, topics,
};
pub use options::{
    ComponentOptions, ConfigLoadOptions, ConfigModuleOptions, ConfigSource, ContainerOptions,
    MigrateOptions, TokenOptions, TopicsOptions,
};
pub use outcome::{
    CreateOutcome, GenerateOutcome, MigrateOutcome, OperationOutput, OperationResult,
    StartOutcome, TokenOutcome, TopicFailure, TopicsOutcome,
};
pub use probe::{ContainerSpec, ContainerState, DockerProbe, RuntimeProbe};
pub use registry::TopicRegistry;
pub use reporter::Reporter;
