//! In-memory `RuntimeProbe` used by unit tests.

use std::collections::HashSet;

use crate::error::{Error, Result};

use super::probe::{ContainerSpec, ContainerState, RuntimeProbe};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeCall {
    State(String),
    Create(String),
    Start(String),
    Topic(String),
}

/// Records every call and answers from a scripted container state.
#[derive(Debug)]
pub struct RecordingProbe {
    pub state: ContainerState,
    pub calls: Vec<ProbeCall>,
    pub failing_topics: HashSet<String>,
    pub fail_state_query: bool,
}

impl RecordingProbe {
    pub fn with_state(state: ContainerState) -> Self {
        Self {
            state,
            calls: Vec::new(),
            failing_topics: HashSet::new(),
            fail_state_query: false,
        }
    }

    pub fn failing_on(mut self, topic: &str) -> Self {
        self.failing_topics.insert(topic.to_string());
        self
    }

    pub fn count(&self, predicate: impl Fn(&ProbeCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn topic_attempts(&self, topic: &str) -> usize {
        self.count(|call| matches!(call, ProbeCall::Topic(name) if name == topic))
    }
}

impl RuntimeProbe for RecordingProbe {
    fn container_state(&mut self, name: &str) -> Result<ContainerState> {
        self.calls.push(ProbeCall::State(name.to_string()));
        if self.fail_state_query {
            return Err(Error::ExternalCommandFailed {
                action: format!("inspect container `{name}`"),
                message: "runtime unreachable".to_string(),
            });
        }
        Ok(self.state)
    }

    fn create_container(&mut self, spec: &ContainerSpec) -> Result<()> {
        self.calls.push(ProbeCall::Create(spec.name.clone()));
        self.state = ContainerState::Stopped;
        Ok(())
    }

    fn start_container(&mut self, name: &str) -> Result<()> {
        self.calls.push(ProbeCall::Start(name.to_string()));
        self.state = ContainerState::Running;
        Ok(())
    }

    fn create_topic(&mut self, _container: &str, bootstrap: &str, topic: &str) -> Result<()> {
        self.calls.push(ProbeCall::Topic(topic.to_string()));
        if self.failing_topics.contains(topic) {
            return Err(Error::ExternalCommandFailed {
                action: format!("create topic `{topic}` on {bootstrap}"),
                message: "broker rejected the request".to_string(),
            });
        }
        Ok(())
    }
}
