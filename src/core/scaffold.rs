//! Boilerplate generation for the host application's Kafka modules.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::macros::format_description;
use tracing::info;

use crate::config::ScaffoldConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldKind {
    Config,
    Producer,
    Consumer,
}

impl ScaffoldKind {
    pub fn describe(self) -> &'static str {
        match self {
            ScaffoldKind::Config => "config module",
            ScaffoldKind::Producer => "producer",
            ScaffoldKind::Consumer => "consumer",
        }
    }
}

impl fmt::Display for ScaffoldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Normalized forms of a user-supplied component name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub snake: String,
    pub pascal: String,
}

impl Identifier {
    /// Split on non-alphanumerics and lower-to-upper case boundaries.
    pub fn parse(input: &str) -> Result<Self> {
        let words = split_words(input);
        if words.is_empty() {
            return Err(Error::InvalidInput {
                message: format!("`{input}` does not contain any letters or digits"),
            });
        }

        let mut snake = words.join("_");
        let mut pascal: String = words.iter().map(|word| capitalize(word)).collect();
        if snake.starts_with(|c: char| c.is_ascii_digit()) {
            snake.insert(0, '_');
            pascal.insert(0, '_');
        }

        Ok(Self { snake, pascal })
    }
}

fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in input.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_numeric();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join("kafka.rs")
}

pub fn producer_path(dir: &Path, ident: &Identifier) -> PathBuf {
    dir.join(format!("{}_producer.rs", ident.snake))
}

pub fn consumer_path(dir: &Path, ident: &Identifier) -> PathBuf {
    dir.join(format!("{}_consumer.rs", ident.snake))
}

/// A topic-bound client module: one file defining one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Producer,
    Consumer,
}

impl Component {
    pub fn kind(self) -> ScaffoldKind {
        match self {
            Component::Producer => ScaffoldKind::Producer,
            Component::Consumer => ScaffoldKind::Consumer,
        }
    }

    pub fn path(self, dirs: &ScaffoldConfig, ident: &Identifier) -> PathBuf {
        match self {
            Component::Producer => producer_path(&dirs.producers_dir, ident),
            Component::Consumer => consumer_path(&dirs.consumers_dir, ident),
        }
    }

    pub fn type_name(self, ident: &Identifier) -> String {
        match self {
            Component::Producer => format!("{}Producer", ident.pascal),
            Component::Consumer => format!("{}Consumer", ident.pascal),
        }
    }

    pub fn render(self, header: &str, ident: &Identifier, topic: &str) -> String {
        match self {
            Component::Producer => render_producer(header, ident, topic),
            Component::Consumer => render_consumer(header, ident, topic),
        }
    }
}

/// Trimmed topic name for a generated component.
pub fn component_topic(input: &str) -> Result<String> {
    let topic = input.trim();
    if topic.is_empty() {
        return Err(Error::InvalidInput {
            message: "a topic name is required".to_string(),
        });
    }
    Ok(topic.to_string())
}

pub fn generated_header(now: OffsetDateTime) -> String {
    let date = now
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "unknown date".to_string());
    format!("// Generated by brokerkit on {date}. Edit freely; brokerkit will not overwrite it without --force.\n")
}

pub fn render_config(header: &str, bootstrap: &str) -> String {
    format!(
        r#"{header}
use rdkafka::ClientConfig;

pub const BOOTSTRAP_SERVERS: &str = "{bootstrap}";

/// Shared client settings for every producer and consumer in this application.
pub fn client_config() -> ClientConfig {{
    let bootstrap = std::env::var("KAFKA_BOOTSTRAP_SERVERS")
        .unwrap_or_else(|_| BOOTSTRAP_SERVERS.to_string());

    let mut config = ClientConfig::new();
    config
        .set("bootstrap.servers", bootstrap)
        .set("message.timeout.ms", "5000");
    config
}}
"#
    )
}

pub fn render_producer(header: &str, ident: &Identifier, topic: &str) -> String {
    let pascal = &ident.pascal;
    format!(
        r#"{header}
use std::time::Duration;

use rdkafka::error::KafkaError;
use rdkafka::producer::{{FutureProducer, FutureRecord}};

use crate::kafka::client_config;

pub const TOPIC: &str = "{topic}";

pub struct {pascal}Producer {{
    producer: FutureProducer,
}}

impl {pascal}Producer {{
    pub fn new() -> Result<Self, KafkaError> {{
        let producer = client_config().create()?;
        Ok(Self {{ producer }})
    }}

    pub async fn send(&self, key: &str, payload: &[u8]) -> Result<(), KafkaError> {{
        let record = FutureRecord::to(TOPIC).key(key).payload(payload);
        self.producer
            .send(record, Duration::from_secs(5))
            .await
            .map(|_| ())
            .map_err(|(err, _)| err)
    }}
}}
"#
    )
}

pub fn render_consumer(header: &str, ident: &Identifier, topic: &str) -> String {
    let pascal = &ident.pascal;
    let group = ident.snake.replace('_', "-");
    format!(
        r#"{header}
use rdkafka::Message;
use rdkafka::consumer::{{Consumer, StreamConsumer}};
use rdkafka::error::KafkaError;

use crate::kafka::client_config;

pub const TOPIC: &str = "{topic}";
pub const GROUP_ID: &str = "{group}";

pub struct {pascal}Consumer {{
    consumer: StreamConsumer,
}}

impl {pascal}Consumer {{
    pub fn new() -> Result<Self, KafkaError> {{
        let consumer: StreamConsumer = client_config()
            .set("group.id", GROUP_ID)
            .set("auto.offset.reset", "earliest")
            .create()?;
        consumer.subscribe(&[TOPIC])?;
        Ok(Self {{ consumer }})
    }}

    pub async fn run(&self) -> Result<(), KafkaError> {{
        loop {{
            let message = self.consumer.recv().await?;
            if let Some(payload) = message.payload() {{
                self.handle(payload);
            }}
        }}
    }}

    fn handle(&self, _payload: &[u8]) {{}}
}}
"#
    )
}

/// Write a generated file, refusing to replace an existing one unless `force` is set.
///
/// Returns whether an existing file was overwritten.
pub fn write_generated(path: &Path, contents: &str, force: bool) -> Result<bool> {
    let existed = path.exists();
    if existed && !force {
        return Err(Error::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, contents).map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), overwritten = existed, "generated file written");

    Ok(existed)
}
