use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "brokerkit.toml";
pub const CONFIG_ENV_VAR: &str = "BROKERKIT_CONFIG";

pub const DEFAULT_CONTAINER_NAME: &str = "kafka-server";
pub const DEFAULT_CONTAINER_IMAGE: &str = "bitnami/kafka:latest";
pub const DEFAULT_CONTAINER_RUNTIME: &str = "docker";
pub const DEFAULT_BROKER_PORT: u16 = 9092;
pub const BROKER_CONTAINER_PORT: u16 = 9092;
pub const PLAINTEXT_LISTENER_ENV: (&str, &str) = ("ALLOW_PLAINTEXT_LISTENER", "yes");

pub const DEFAULT_BOOTSTRAP: &str = "localhost:9092";
pub const DEFAULT_TOPICS_COMMAND: &str = "kafka-topics.sh";
pub const DEFAULT_REGISTRY_FILE: &str = "kafka-topics.txt";

pub const DEFAULT_TOKEN_FILE: &str = ".brokerkit/token";
pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_TOKEN_ENV_KEY: &str = "KAFKA_AUTH_TOKEN";
pub const DEFAULT_TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Location of the configuration file (synthetic projects point at where it would live).
    pub file_path: PathBuf,
    /// Directory every relative path is resolved against.
    pub project_root: PathBuf,
    pub container: ContainerConfig,
    pub broker: BrokerConfig,
    pub registry: RegistryConfig,
    pub scaffold: ScaffoldConfig,
    pub token: TokenConfig,
    pub warnings: Vec<String>,
}

impl ProjectConfig {
    /// Defaults for a project rooted at `project_root` with no configuration file.
    pub fn defaults(project_root: PathBuf) -> Self {
        Self {
            file_path: project_root.join(CONFIG_FILE_NAME),
            container: ContainerConfig::default(),
            broker: BrokerConfig::default(),
            registry: RegistryConfig {
                path: project_root.join(DEFAULT_REGISTRY_FILE),
            },
            scaffold: ScaffoldConfig::rooted_at(&project_root),
            token: TokenConfig::rooted_at(&project_root),
            project_root,
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerConfig {
    pub name: String,
    pub image: String,
    /// Container runtime CLI used for every container action (`docker`, `podman`, ...).
    pub runtime: String,
    /// Host port published to the broker's listener port.
    pub port: u16,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_CONTAINER_NAME.to_string(),
            image: DEFAULT_CONTAINER_IMAGE.to_string(),
            runtime: DEFAULT_CONTAINER_RUNTIME.to_string(),
            port: DEFAULT_BROKER_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerConfig {
    /// Bootstrap endpoint as seen from inside the broker container.
    pub bootstrap: String,
    pub topics_command: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            bootstrap: DEFAULT_BOOTSTRAP.to_string(),
            topics_command: DEFAULT_TOPICS_COMMAND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldConfig {
    pub config_dir: PathBuf,
    pub producers_dir: PathBuf,
    pub consumers_dir: PathBuf,
}

impl ScaffoldConfig {
    fn rooted_at(root: &Path) -> Self {
        let kafka_dir = root.join("src").join("kafka");
        Self {
            producers_dir: kafka_dir.join("producers"),
            consumers_dir: kafka_dir.join("consumers"),
            config_dir: kafka_dir,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    pub path: PathBuf,
    pub env_file: PathBuf,
    pub env_key: String,
    pub bytes: usize,
}

impl TokenConfig {
    fn rooted_at(root: &Path) -> Self {
        Self {
            path: root.join(DEFAULT_TOKEN_FILE),
            env_file: root.join(DEFAULT_ENV_FILE),
            env_key: DEFAULT_TOKEN_ENV_KEY.to_string(),
            bytes: DEFAULT_TOKEN_BYTES,
        }
    }
}

pub fn load_project_config(path: &Path) -> Result<ProjectConfig> {
    let contents = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;

    let value: toml::Value = toml::from_str(&contents).map_err(|source| Error::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;

    let mut warnings = detect_unknown_fields(&value);

    let raw = RawConfig::deserialize(value).map_err(|source| Error::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;

    raw.into_validated(path, &mut warnings)
}

fn invalid_config(path: &Path, message: impl Into<String>) -> Error {
    Error::InvalidConfig {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

const KNOWN_SECTIONS: &[(&str, &[&str])] = &[
    ("container", &["name", "image", "runtime", "port"]),
    ("broker", &["bootstrap", "topics_command"]),
    ("registry", &["path"]),
    ("scaffold", &["config_dir", "producers_dir", "consumers_dir"]),
    ("token", &["path", "env_file", "env_key", "bytes"]),
];

fn detect_unknown_fields(value: &toml::Value) -> Vec<String> {
    let mut warnings = Vec::new();
    let toml::Value::Table(table) = value else {
        return warnings;
    };

    for (key, entry) in table {
        let Some((_, allowed)) = KNOWN_SECTIONS.iter().find(|(name, _)| name == key) else {
            warnings.push(format!(
                "Unknown field `{key}` at root; this value will be ignored."
            ));
            continue;
        };

        match entry {
            toml::Value::Table(section) => {
                for field in section.keys() {
                    if !allowed.contains(&field.as_str()) {
                        warnings.push(format!(
                            "Unknown field `{field}` at [{key}]; this value will be ignored."
                        ));
                    }
                }
            }
            _ => warnings.push(format!("Expected [{key}] to be a table.")),
        }
    }

    warnings
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    container: RawContainer,
    #[serde(default)]
    broker: RawBroker,
    #[serde(default)]
    registry: RawRegistry,
    #[serde(default)]
    scaffold: RawScaffold,
    #[serde(default)]
    token: RawToken,
}

#[derive(Debug, Default, Deserialize)]
struct RawContainer {
    name: Option<String>,
    image: Option<String>,
    runtime: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBroker {
    bootstrap: Option<String>,
    topics_command: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRegistry {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawScaffold {
    config_dir: Option<PathBuf>,
    producers_dir: Option<PathBuf>,
    consumers_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawToken {
    path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    env_key: Option<String>,
    bytes: Option<usize>,
}

impl RawConfig {
    fn into_validated(self, path: &Path, warnings: &mut Vec<String>) -> Result<ProjectConfig> {
        let project_root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut config = ProjectConfig::defaults(project_root.clone());
        config.file_path = path.to_path_buf();

        let RawConfig {
            container,
            broker,
            registry,
            scaffold,
            token,
        } = self;

        if let Some(name) = container.name {
            config.container.name = non_empty(path, "[container].name", name)?;
        }
        if let Some(image) = container.image {
            config.container.image = non_empty(path, "[container].image", image)?;
        }
        if let Some(runtime) = container.runtime {
            config.container.runtime = non_empty(path, "[container].runtime", runtime)?;
        }
        if let Some(port) = container.port {
            if port == 0 {
                return Err(invalid_config(path, "[container].port must be non-zero"));
            }
            config.container.port = port;
        }

        if let Some(bootstrap) = broker.bootstrap {
            config.broker.bootstrap = non_empty(path, "[broker].bootstrap", bootstrap)?;
        }
        if let Some(command) = broker.topics_command {
            config.broker.topics_command = non_empty(path, "[broker].topics_command", command)?;
        }

        if let Some(registry_path) = registry.path {
            config.registry.path = resolve_path(&project_root, registry_path);
        }

        if let Some(dir) = scaffold.config_dir {
            config.scaffold.config_dir = resolve_path(&project_root, dir);
        }
        if let Some(dir) = scaffold.producers_dir {
            config.scaffold.producers_dir = resolve_path(&project_root, dir);
        }
        if let Some(dir) = scaffold.consumers_dir {
            config.scaffold.consumers_dir = resolve_path(&project_root, dir);
        }

        if let Some(token_path) = token.path {
            config.token.path = resolve_path(&project_root, token_path);
        }
        if let Some(env_file) = token.env_file {
            config.token.env_file = resolve_path(&project_root, env_file);
        }
        if let Some(key) = token.env_key {
            let key = non_empty(path, "[token].env_key", key)?;
            if key.contains('=') || key.chars().any(char::is_whitespace) {
                return Err(invalid_config(
                    path,
                    format!("[token].env_key `{key}` must not contain `=` or whitespace"),
                ));
            }
            config.token.env_key = key;
        }
        if let Some(bytes) = token.bytes {
            if bytes == 0 {
                return Err(invalid_config(path, "[token].bytes must be at least 1"));
            }
            config.token.bytes = bytes;
        }

        config.warnings = warnings.clone();
        Ok(config)
    }
}

fn non_empty(path: &Path, field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid_config(path, format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn resolve_path(base: &Path, input: PathBuf) -> PathBuf {
    if input.is_absolute() {
        input
    } else {
        base.join(input)
    }
}
