//! Replays the topic registry against the running broker.

use tracing::{debug, info};

use crate::error::Result;

use super::events::Event;
use super::outcome::{MigrateOutcome, TopicFailure};
use super::probe::RuntimeProbe;
use super::registry::TopicRegistry;
use super::reporter::Reporter;

/// Where topic creation requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationTarget {
    pub container: String,
    pub bootstrap: String,
}

/// Create every registry topic in order, halting at the first failure.
///
/// Topics after the failing one are not attempted; they are returned in
/// `MigrateOutcome::pending`. Re-running re-attempts every topic.
pub fn migrate_topics(
    registry: &TopicRegistry,
    probe: &mut dyn RuntimeProbe,
    target: &MigrationTarget,
    reporter: &mut dyn Reporter,
) -> Result<MigrateOutcome> {
    let topics = registry.load_required()?;
    let mut created = Vec::with_capacity(topics.len());
    let mut remaining = topics.into_iter();

    while let Some(topic) = remaining.next() {
        match probe.create_topic(&target.container, &target.bootstrap, &topic) {
            Ok(()) => {
                info!(%topic, bootstrap = %target.bootstrap, "topic created");
                reporter.report(Event::TopicCreated {
                    topic: topic.clone(),
                });
                created.push(topic);
            }
            Err(err) => {
                let message = err.to_string();
                debug!(%topic, error = %message, "topic migration halted");
                reporter.report(Event::TopicFailed {
                    topic: topic.clone(),
                    message: message.clone(),
                });
                return Ok(MigrateOutcome {
                    registry_path: registry.path().to_path_buf(),
                    created,
                    failure: Some(TopicFailure { topic, message }),
                    pending: remaining.collect(),
                });
            }
        }
    }

    Ok(MigrateOutcome {
        registry_path: registry.path().to_path_buf(),
        created,
        failure: None,
        pending: Vec::new(),
    })
}
