use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

const VERSION: &str = env!("BROKERKIT_VERSION");

/// Top-level CLI definition for the `brokerkit` tool.
#[derive(Debug, Parser)]
#[command(
    name = "brokerkit",
    version = VERSION,
    about = "Scaffold a Kafka messaging layer and manage its local broker container.",
    long_about = "Brokerkit generates producer/consumer boilerplate, runs a single local Kafka \
                  container, and keeps a declarative topic registry in sync with the broker."
)]
pub struct Cli {
    /// Path to an explicit configuration file. Defaults to searching for `brokerkit.toml`.
    #[arg(
        global = true,
        short,
        long = "config",
        value_name = "PATH",
        help = "Load configuration from PATH instead of discovering brokerkit.toml (also read from BROKERKIT_CONFIG)"
    )]
    pub config: Option<PathBuf>,

    /// Emit debug logs to stderr (RUST_LOG takes precedence).
    #[arg(global = true, short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the Kafka connection settings module.
    #[command(name = "kafka:config")]
    KafkaConfig(GenerateArgs),
    /// Generate a consumer bound to a topic.
    #[command(name = "kafka:consumer")]
    KafkaConsumer(ComponentArgs),
    /// Generate a producer bound to a topic.
    #[command(name = "kafka:producer")]
    KafkaProducer(ComponentArgs),
    /// Create the broker container if it does not exist yet.
    #[command(name = "kafka:create")]
    KafkaCreate,
    /// Start the broker container if it is not running.
    #[command(name = "kafka:start")]
    KafkaStart,
    /// Add topics to the topic registry.
    #[command(name = "kafka:topics")]
    KafkaTopics(TopicsArgs),
    /// Create every registry topic on the running broker.
    #[command(name = "kafka:migrate")]
    KafkaMigrate,
    /// Issue a random bearer token and store it in the env file.
    #[command(name = "make:token")]
    MakeToken(TokenArgs),
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::KafkaConfig(_) => "kafka:config",
            Commands::KafkaConsumer(_) => "kafka:consumer",
            Commands::KafkaProducer(_) => "kafka:producer",
            Commands::KafkaCreate => "kafka:create",
            Commands::KafkaStart => "kafka:start",
            Commands::KafkaTopics(_) => "kafka:topics",
            Commands::KafkaMigrate => "kafka:migrate",
            Commands::MakeToken(_) => "make:token",
        }
    }
}

#[derive(Debug, Args, Default)]
pub struct GenerateArgs {
    #[arg(long, help = "Overwrite the file if it already exists")]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct ComponentArgs {
    /// Component name, e.g. "order created"; normalized for file and type names.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Topic the component publishes to or subscribes to.
    #[arg(value_name = "TOPIC")]
    pub topic: String,

    #[arg(long, help = "Overwrite the file if it already exists")]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct TopicsArgs {
    /// Comma-separated topic names, e.g. "orders,payments".
    #[arg(value_name = "TOPICS")]
    pub topics: String,
}

#[derive(Debug, Args, Default)]
pub struct TokenArgs {
    /// Number of random bytes (the token is twice as many hex characters).
    #[arg(long, value_name = "BYTES")]
    pub bytes: Option<usize>,

    #[arg(
        long,
        help = "Store the SHA-256 digest in the token file instead of the raw token"
    )]
    pub hash: bool,

    #[arg(long, help = "Do not write the token into the env file")]
    pub no_env: bool,
}
