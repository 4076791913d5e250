use std::path::PathBuf;

use crate::Result;
use crate::core::operations;
use crate::core::options::ContainerOptions;
use crate::core::outcome::{CreateOutcome, StartOutcome};

use super::common::{config_load_options, report_diagnostics};

pub fn handle_create(config_override: Option<&PathBuf>) -> Result<()> {
    let options = ContainerOptions {
        config: config_load_options(config_override),
    };

    let output = operations::create(options, None)?;
    report_diagnostics(&output.diagnostics);

    match output.value {
        CreateOutcome::Created { name, image } => {
            println!("✔ Created container `{name}` from {image}.");
            println!("  Run `brokerkit kafka:start` to boot the broker.");
        }
        CreateOutcome::AlreadyExists { name, state } => {
            println!("Container `{name}` already exists ({state}); nothing to create.");
        }
    }
    Ok(())
}

pub fn handle_start(config_override: Option<&PathBuf>) -> Result<()> {
    let options = ContainerOptions {
        config: config_load_options(config_override),
    };

    let output = operations::start(options, None)?;
    report_diagnostics(&output.diagnostics);

    match output.value {
        StartOutcome::Started { name } => {
            println!("✔ Started container `{name}`.");
        }
        StartOutcome::AlreadyRunning { name } => {
            println!("Container `{name}` is already running.");
        }
    }
    Ok(())
}
