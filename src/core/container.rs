//! Drives the broker container from absent, to created, to running.
//!
//! State is re-read from the runtime before every transition so repeated
//! invocations never issue a second create or start.

use tracing::info;

use crate::error::{Error, Result};

use super::events::Event;
use super::outcome::{CreateOutcome, StartOutcome};
use super::probe::{ContainerSpec, ContainerState, RuntimeProbe};
use super::reporter::Reporter;

pub struct ContainerLifecycle<'p> {
    probe: &'p mut dyn RuntimeProbe,
}

impl<'p> ContainerLifecycle<'p> {
    pub fn new(probe: &'p mut dyn RuntimeProbe) -> Self {
        Self { probe }
    }

    /// Create the container unless one with the same name already exists.
    pub fn create(
        &mut self,
        spec: &ContainerSpec,
        reporter: &mut dyn Reporter,
    ) -> Result<CreateOutcome> {
        let state = self.observe(&spec.name, reporter)?;
        if state.exists() {
            info!(container = %spec.name, %state, "container already exists; skipping create");
            return Ok(CreateOutcome::AlreadyExists {
                name: spec.name.clone(),
                state,
            });
        }

        self.probe.create_container(spec)?;
        info!(container = %spec.name, image = %spec.image, "container created");
        reporter.report(Event::ContainerCreated {
            container: spec.name.clone(),
            image: spec.image.clone(),
        });

        Ok(CreateOutcome::Created {
            name: spec.name.clone(),
            image: spec.image.clone(),
        })
    }

    /// Start a created container. Never creates one implicitly.
    pub fn start(&mut self, name: &str, reporter: &mut dyn Reporter) -> Result<StartOutcome> {
        match self.observe(name, reporter)? {
            ContainerState::Absent => Err(Error::ContainerMissing {
                name: name.to_string(),
            }),
            ContainerState::Running => {
                info!(container = %name, "container already running; skipping start");
                Ok(StartOutcome::AlreadyRunning {
                    name: name.to_string(),
                })
            }
            ContainerState::Stopped => {
                self.probe.start_container(name)?;
                info!(container = %name, "container started");
                reporter.report(Event::ContainerStarted {
                    container: name.to_string(),
                });
                Ok(StartOutcome::Started {
                    name: name.to_string(),
                })
            }
        }
    }

    fn observe(&mut self, name: &str, reporter: &mut dyn Reporter) -> Result<ContainerState> {
        let state = self.probe.container_state(name)?;
        reporter.report(Event::ContainerObserved {
            container: name.to_string(),
            state,
        });
        Ok(state)
    }
}
