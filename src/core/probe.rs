//! Boundary to the container runtime and the broker's admin tooling.
//!
//! Every call blocks until the external command finishes. Nothing is cached:
//! callers query state right before acting on it.

use std::fmt;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::debug;

use crate::config::{BROKER_CONTAINER_PORT, PLAINTEXT_LISTENER_ENV, ProjectConfig};
use crate::error::{Error, Result};

/// Observed state of the named broker container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Absent,
    /// Created but not running.
    Stopped,
    Running,
}

impl ContainerState {
    pub fn exists(self) -> bool {
        !matches!(self, ContainerState::Absent)
    }

    pub fn is_running(self) -> bool {
        matches!(self, ContainerState::Running)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerState::Absent => "absent",
            ContainerState::Stopped => "stopped",
            ContainerState::Running => "running",
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to create the broker container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub host_port: u16,
    pub container_port: u16,
    pub env: Vec<(String, String)>,
}

impl ContainerSpec {
    pub fn from_config(project: &ProjectConfig) -> Self {
        let (key, value) = PLAINTEXT_LISTENER_ENV;
        Self {
            name: project.container.name.clone(),
            image: project.container.image.clone(),
            host_port: project.container.port,
            container_port: BROKER_CONTAINER_PORT,
            env: vec![(key.to_string(), value.to_string())],
        }
    }
}

/// Queries and actions against the container runtime and the broker.
pub trait RuntimeProbe {
    /// Report whether a container with exactly this name exists and whether it runs.
    fn container_state(&mut self, name: &str) -> Result<ContainerState>;

    /// Create (but do not start) the container described by `spec`.
    fn create_container(&mut self, spec: &ContainerSpec) -> Result<()>;

    fn start_container(&mut self, name: &str) -> Result<()>;

    /// Create `topic` on `bootstrap` using the tooling inside `container`.
    fn create_topic(&mut self, container: &str, bootstrap: &str, topic: &str) -> Result<()>;
}

/// `RuntimeProbe` backed by a docker-compatible CLI.
#[derive(Debug, Clone)]
pub struct DockerProbe {
    runtime: String,
    topics_command: String,
}

impl DockerProbe {
    pub fn new(runtime: impl Into<String>, topics_command: impl Into<String>) -> Self {
        Self {
            runtime: runtime.into(),
            topics_command: topics_command.into(),
        }
    }

    pub fn from_config(project: &ProjectConfig) -> Self {
        Self::new(
            project.container.runtime.clone(),
            project.broker.topics_command.clone(),
        )
    }

    fn run(&self, args: &[String], action: &str) -> Result<String> {
        debug!(runtime = %self.runtime, args = ?args, "invoking container runtime");

        let output = Command::new(&self.runtime)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| Error::ExternalCommandFailed {
                action: action.to_string(),
                message: format!("could not invoke `{}`: {err}", self.runtime),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            let message = if stderr.is_empty() {
                format!("`{}` exited with code {code}", self.runtime)
            } else {
                format!("`{}` exited with code {code}: {stderr}", self.runtime)
            };
            return Err(Error::ExternalCommandFailed {
                action: action.to_string(),
                message,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl RuntimeProbe for DockerProbe {
    fn container_state(&mut self, name: &str) -> Result<ContainerState> {
        let action = format!("inspect container `{name}`");
        let stdout = self.run(&ps_args(name), &action)?;
        parse_ps_output(&stdout, name).map_err(|message| Error::ExternalCommandFailed {
            action,
            message,
        })
    }

    fn create_container(&mut self, spec: &ContainerSpec) -> Result<()> {
        self.run(
            &create_args(spec),
            &format!("create container `{}` from {}", spec.name, spec.image),
        )
        .map(|_| ())
    }

    fn start_container(&mut self, name: &str) -> Result<()> {
        self.run(
            &["start".to_string(), name.to_string()],
            &format!("start container `{name}`"),
        )
        .map(|_| ())
    }

    fn create_topic(&mut self, container: &str, bootstrap: &str, topic: &str) -> Result<()> {
        self.run(
            &topic_args(container, &self.topics_command, bootstrap, topic),
            &format!("create topic `{topic}` on {bootstrap}"),
        )
        .map(|_| ())
    }
}

fn ps_args(name: &str) -> Vec<String> {
    vec![
        "ps".to_string(),
        "--all".to_string(),
        "--no-trunc".to_string(),
        "--filter".to_string(),
        format!("name={name}"),
        "--format".to_string(),
        "{{json .}}".to_string(),
    ]
}

fn create_args(spec: &ContainerSpec) -> Vec<String> {
    let mut args = vec![
        "create".to_string(),
        "--name".to_string(),
        spec.name.clone(),
        "-p".to_string(),
        format!("{}:{}", spec.host_port, spec.container_port),
    ];
    for (key, value) in &spec.env {
        args.push("-e".to_string());
        args.push(format!("{key}={value}"));
    }
    args.push(spec.image.clone());
    args
}

fn topic_args(container: &str, topics_command: &str, bootstrap: &str, topic: &str) -> Vec<String> {
    [
        "exec",
        container,
        topics_command,
        "--create",
        "--topic",
        topic,
        "--bootstrap-server",
        bootstrap,
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[derive(Debug, Deserialize)]
struct PsEntry {
    #[serde(rename = "Names")]
    names: PsNames,
    #[serde(rename = "State")]
    state: String,
}

/// Docker reports `Names` as a comma-separated string, podman as an array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PsNames {
    Joined(String),
    List(Vec<String>),
}

impl PsNames {
    fn contains(&self, name: &str) -> bool {
        let matches = |candidate: &str| candidate.trim().trim_start_matches('/') == name;
        match self {
            PsNames::Joined(joined) => joined.split(',').any(matches),
            PsNames::List(names) => names.iter().any(|candidate| matches(candidate)),
        }
    }
}

/// Decode `ps --format '{{json .}}'` output and pick the entry named exactly `name`.
///
/// The runtime's name filter is a substring match, so `kafka-server-old` also
/// comes back when asking for `kafka-server`.
fn parse_ps_output(stdout: &str, name: &str) -> std::result::Result<ContainerState, String> {
    for line in stdout.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let entry: PsEntry = serde_json::from_str(line)
            .map_err(|err| format!("unexpected runtime output `{line}`: {err}"))?;
        if !entry.names.contains(name) {
            continue;
        }
        return Ok(if entry.state.eq_ignore_ascii_case("running") {
            ContainerState::Running
        } else {
            ContainerState::Stopped
        });
    }
    Ok(ContainerState::Absent)
}
