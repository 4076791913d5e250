use std::path::PathBuf;

use crate::Result;
use crate::cli::{ComponentArgs, GenerateArgs};
use crate::core::operations;
use crate::core::options::{ComponentOptions, ConfigModuleOptions};
use crate::core::outcome::GenerateOutcome;

use super::common::{config_load_options, report_diagnostics};

pub fn handle_config(args: GenerateArgs, config_override: Option<&PathBuf>) -> Result<()> {
    let options = ConfigModuleOptions {
        config: config_load_options(config_override),
        force: args.force,
    };

    let output = operations::config_module(options, None)?;
    report_diagnostics(&output.diagnostics);
    render_generated(&output.value);
    Ok(())
}

pub fn handle_producer(args: ComponentArgs, config_override: Option<&PathBuf>) -> Result<()> {
    let output = operations::producer(component_options(args, config_override), None)?;
    report_diagnostics(&output.diagnostics);
    render_generated(&output.value);
    Ok(())
}

pub fn handle_consumer(args: ComponentArgs, config_override: Option<&PathBuf>) -> Result<()> {
    let output = operations::consumer(component_options(args, config_override), None)?;
    report_diagnostics(&output.diagnostics);
    render_generated(&output.value);
    Ok(())
}

fn component_options(args: ComponentArgs, config_override: Option<&PathBuf>) -> ComponentOptions {
    ComponentOptions {
        config: config_load_options(config_override),
        name: args.name,
        topic: args.topic,
        force: args.force,
    }
}

fn render_generated(outcome: &GenerateOutcome) {
    let label = outcome.kind;
    let verb = if outcome.overwritten { "Regenerated" } else { "Created" };
    match &outcome.type_name {
        Some(type_name) => println!(
            "✔ {verb} {label} `{type_name}` at {}.",
            outcome.path.display()
        ),
        None => println!("✔ {verb} {label} at {}.", outcome.path.display()),
    }
}
