use std::path::PathBuf;

use crate::CONFIG_ENV_VAR;
use crate::core::diagnostics::{Diagnostic, Severity};
use crate::core::options::{ConfigLoadOptions, ConfigSource};
use crate::core::project::format_config_warnings;

/// `--config` wins over `BROKERKIT_CONFIG`; otherwise discover.
pub fn config_source(config_override: Option<&PathBuf>) -> ConfigSource {
    if let Some(path) = config_override {
        return ConfigSource::Explicit(path.clone());
    }
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(value) if !value.is_empty() => ConfigSource::Explicit(PathBuf::from(value)),
        _ => ConfigSource::Discover,
    }
}

pub fn config_load_options(config_override: Option<&PathBuf>) -> ConfigLoadOptions {
    ConfigLoadOptions {
        source: config_source(config_override),
        search_root: None,
    }
}

pub fn split_config_warnings(diagnostics: &[Diagnostic]) -> (Vec<Diagnostic>, Vec<Diagnostic>) {
    diagnostics
        .iter()
        .cloned()
        .partition(|diagnostic| {
            matches!(diagnostic.severity, Severity::Warning) && diagnostic.path.is_some()
        })
}

/// Print config warnings as one block, then everything else line by line.
pub fn report_diagnostics(diagnostics: &[Diagnostic]) {
    let (config_warnings, other) = split_config_warnings(diagnostics);
    if let Some(message) = format_config_warnings(&config_warnings) {
        eprint!("{message}");
    }
    emit_diagnostics(&other);
}

pub fn emit_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.severity {
            Severity::Warning => {
                eprintln!("Warning: {}", diagnostic.message);
                if let Some(help) = &diagnostic.help {
                    eprintln!("         {help}");
                }
            }
            Severity::Info => {
                println!("{}", diagnostic.message);
                if let Some(help) = &diagnostic.help {
                    println!("{help}");
                }
            }
        }
    }
}
