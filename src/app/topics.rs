use std::path::PathBuf;

use crate::cli::TopicsArgs;
use crate::core::operations;
use crate::core::options::{MigrateOptions, TopicsOptions};
use crate::core::outcome::MigrateOutcome;
use crate::{Error, Result};

use super::common::{config_load_options, report_diagnostics};

pub fn handle_topics(args: TopicsArgs, config_override: Option<&PathBuf>) -> Result<()> {
    let options = TopicsOptions {
        config: config_load_options(config_override),
        topics: args.topics,
    };

    let output = operations::topics(options, None)?;
    report_diagnostics(&output.diagnostics);

    let outcome = output.value;
    if outcome.added.is_empty() {
        println!(
            "All topics already registered in {} ({} total).",
            outcome.registry_path.display(),
            outcome.topics.len()
        );
    } else {
        println!(
            "✔ Registered {} topic(s) in {}: {}",
            outcome.added.len(),
            outcome.registry_path.display(),
            outcome.added.join(", ")
        );
        println!("  Run `brokerkit kafka:migrate` to create them on the broker.");
    }
    Ok(())
}

pub fn handle_migrate(config_override: Option<&PathBuf>) -> Result<()> {
    let options = MigrateOptions {
        config: config_load_options(config_override),
    };

    let output = operations::migrate(options, None)?;
    report_diagnostics(&output.diagnostics);

    render_migrate(output.value)
}

fn render_migrate(outcome: MigrateOutcome) -> Result<()> {
    for topic in &outcome.created {
        println!("→ {topic}: created.");
    }

    match outcome.failure {
        Some(failure) => Err(Error::MigrationHalted {
            topic: failure.topic,
            created: outcome.created.len(),
            remaining: outcome.pending.len(),
            message: failure.message,
        }),
        None => {
            println!(
                "✔ Migrated {} topic(s) from {}.",
                outcome.created.len(),
                outcome.registry_path.display()
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::outcome::TopicFailure;

    #[test]
    fn halted_migration_becomes_a_single_error() {
        let outcome = MigrateOutcome {
            registry_path: "kafka-topics.txt".into(),
            created: vec!["orders".into()],
            failure: Some(TopicFailure {
                topic: "payments".into(),
                message: "broker unavailable".into(),
            }),
            pending: vec!["refunds".into(), "audits".into()],
        };

        match render_migrate(outcome).unwrap_err() {
            Error::MigrationHalted {
                topic,
                created,
                remaining,
                message,
            } => {
                assert_eq!(topic, "payments");
                assert_eq!(created, 1);
                assert_eq!(remaining, 2);
                assert_eq!(message, "broker unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn completed_migration_is_ok() {
        let outcome = MigrateOutcome {
            registry_path: "kafka-topics.txt".into(),
            created: vec!["orders".into()],
            failure: None,
            pending: Vec::new(),
        };
        assert!(render_migrate(outcome).is_ok());
    }
}
