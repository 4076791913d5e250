use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{CONFIG_FILE_NAME, ProjectConfig, load_project_config};
use crate::error::{Error, Result};

use super::diagnostics::{Diagnostic, Severity};
use super::options::{ConfigLoadOptions, ConfigSource};

/// Result of loading a project configuration.
#[derive(Debug)]
pub struct ProjectLoad {
    pub config: ProjectConfig,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn load_project(options: &ConfigLoadOptions) -> Result<ProjectLoad> {
    let search_root = match &options.search_root {
        Some(root) => root.clone(),
        None => current_dir()?,
    };

    match resolve_config_path(&options.source, &search_root)? {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            let config = load_project_config(&path)?;
            let diagnostics = config
                .warnings
                .iter()
                .map(|warning| Diagnostic::new(Severity::Warning, warning).with_path(path.clone()))
                .collect();
            Ok(ProjectLoad {
                config,
                diagnostics,
            })
        }
        None => {
            debug!(root = %search_root.display(), "no configuration found; using defaults");
            Ok(ProjectLoad {
                diagnostics: vec![
                    Diagnostic::new(
                        Severity::Info,
                        format!(
                            "No {CONFIG_FILE_NAME} found; using defaults rooted at {}.",
                            search_root.display()
                        ),
                    )
                    .with_help(format!(
                        "Create {CONFIG_FILE_NAME} to customize the container, registry, or output paths."
                    )),
                ],
                config: ProjectConfig::defaults(search_root),
            })
        }
    }
}

/// Resolve the configuration file; `Ok(None)` means discovery found nothing.
pub fn resolve_config_path(source: &ConfigSource, search_root: &Path) -> Result<Option<PathBuf>> {
    match source {
        ConfigSource::Explicit(path) => {
            if path.is_file() {
                Ok(Some(path.clone()))
            } else {
                Err(Error::ExplicitConfigMissing { path: path.clone() })
            }
        }
        ConfigSource::Discover => Ok(discover_config(search_root)),
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|source| Error::WorkingDirectoryUnavailable { source })
}

fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut cursor = Some(start.to_path_buf());
    while let Some(dir) = cursor {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        cursor = dir.parent().map(Path::to_path_buf);
    }
    None
}

pub fn format_config_warnings(warnings: &[Diagnostic]) -> Option<String> {
    let relevant: Vec<&Diagnostic> = warnings
        .iter()
        .filter(|diag| matches!(diag.severity, Severity::Warning))
        .collect();
    if relevant.is_empty() {
        return None;
    }

    let count = relevant.len();
    let suffix = if count == 1 { "" } else { "s" };
    let mut buf = String::new();
    let _ = writeln!(
        buf,
        "Found {count} warning{suffix} while parsing configuration:"
    );
    for warning in &relevant {
        let _ = writeln!(buf, "  • {}", warning.message);
    }
    buf.push('\n');
    Some(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn discovery_walks_up_to_parent_config() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[container]\nname = \"events\"\n",
        )
        .unwrap();
        let nested = dir.path().join("src/deep");
        fs::create_dir_all(&nested).unwrap();

        let load = load_project(&ConfigLoadOptions::discover_from(nested)).unwrap();

        assert!(load.diagnostics.is_empty());
        assert_eq!(load.config.container.name, "events");
        assert_eq!(load.config.project_root, dir.path());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempdir().unwrap();
        let options = ConfigLoadOptions::explicit(dir.path().join("missing.toml"));
        assert!(matches!(
            load_project(&options).unwrap_err(),
            Error::ExplicitConfigMissing { .. }
        ));
    }

    #[test]
    fn config_warnings_carry_the_config_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[registry]\nformat = \"json\"\n").unwrap();

        let load = load_project(&ConfigLoadOptions::explicit(path.clone())).unwrap();

        assert_eq!(load.diagnostics.len(), 1);
        assert_eq!(load.diagnostics[0].path.as_ref(), Some(&path));
        let rendered = format_config_warnings(&load.diagnostics).unwrap();
        assert!(rendered.starts_with("Found 1 warning while parsing configuration:"));
    }

    #[test]
    fn format_config_warnings_ignores_info() {
        let info = Diagnostic::new(Severity::Info, "fyi");
        assert!(format_config_warnings(&[info]).is_none());
    }
}
