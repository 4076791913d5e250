use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read configuration file at {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Configuration at {path} could not be parsed: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Configuration at {path} is invalid: {message}")]
    InvalidConfig { path: PathBuf, message: String },
    #[error("The configuration path {path} does not exist or is not readable.")]
    ExplicitConfigMissing { path: PathBuf },
    #[error("Failed to determine the current working directory: {source}")]
    WorkingDirectoryUnavailable {
        #[source]
        source: std::io::Error,
    },
    #[error("{message}")]
    InvalidInput { message: String },
    #[error("{path} already exists. Re-run with --force to overwrite it.")]
    AlreadyExists { path: PathBuf },
    #[error("Failed to {action}: {message}")]
    ExternalCommandFailed { action: String, message: String },
    #[error(
        "Container `{name}` does not exist. Run `brokerkit kafka:create` before starting it."
    )]
    ContainerMissing { name: String },
    #[error(
        "No topic registry found at {path}. Run `brokerkit kafka:topics` to declare topics first."
    )]
    RegistryMissing { path: PathBuf },
    #[error(
        "Migration halted at topic `{topic}` ({created} created, {remaining} not attempted): {message}"
    )]
    MigrationHalted {
        topic: String,
        created: usize,
        remaining: usize,
        message: String,
    },
}
