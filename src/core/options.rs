use std::path::PathBuf;

/// Source used when resolving a brokerkit configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Search for `brokerkit.toml` by walking up from the search root.
    Discover,
    /// Use an explicit path to the configuration file.
    Explicit(PathBuf),
}

/// Parameters for configuration loading.
///
/// When discovery finds nothing the loader falls back to defaults rooted at the search root.
#[derive(Debug, Clone)]
pub struct ConfigLoadOptions {
    pub source: ConfigSource,
    /// Override for the discovery root (defaults to the process CWD).
    pub search_root: Option<PathBuf>,
}

impl ConfigLoadOptions {
    pub fn explicit(path: PathBuf) -> Self {
        Self {
            source: ConfigSource::Explicit(path),
            search_root: None,
        }
    }

    pub fn discover() -> Self {
        Self {
            source: ConfigSource::Discover,
            search_root: None,
        }
    }

    /// Discover starting at `root` instead of the working directory.
    pub fn discover_from(root: PathBuf) -> Self {
        Self {
            source: ConfigSource::Discover,
            search_root: Some(root),
        }
    }
}

impl Default for ConfigLoadOptions {
    fn default() -> Self {
        Self::discover()
    }
}

/// Options for `kafka:config`.
#[derive(Debug, Clone, Default)]
pub struct ConfigModuleOptions {
    pub config: ConfigLoadOptions,
    /// Replace an existing generated file.
    pub force: bool,
}

/// Options for `kafka:producer` and `kafka:consumer`.
#[derive(Debug, Clone, Default)]
pub struct ComponentOptions {
    pub config: ConfigLoadOptions,
    /// Component name as typed by the user; normalized before use.
    pub name: String,
    pub topic: String,
    pub force: bool,
}

/// Options for `kafka:create` and `kafka:start`.
#[derive(Debug, Clone, Default)]
pub struct ContainerOptions {
    pub config: ConfigLoadOptions,
}

/// Options for `kafka:topics`.
#[derive(Debug, Clone, Default)]
pub struct TopicsOptions {
    pub config: ConfigLoadOptions,
    /// Comma-separated topic names.
    pub topics: String,
}

/// Options for `kafka:migrate`.
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    pub config: ConfigLoadOptions,
}

/// Options for `make:token`.
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    pub config: ConfigLoadOptions,
    /// Random byte count; falls back to `[token].bytes`.
    pub bytes: Option<usize>,
    /// Store the SHA-256 digest in the token file instead of the raw token.
    pub hashed: bool,
    /// Leave the env file untouched.
    pub skip_env: bool,
}
