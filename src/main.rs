use std::process::ExitCode;

use brokerkit::app;
use brokerkit::cli::{Cli, Commands};
use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing::debug;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(64),
            };
        }
    };

    let Cli {
        config,
        verbose,
        command,
    } = cli;

    let Some(command) = command else {
        let mut command = Cli::command();
        let _ = command.print_help();
        println!();
        return ExitCode::from(64);
    };

    app::init_logging(verbose);
    debug!(command = command.name(), "dispatching");

    let config = config.as_ref();
    let exit = match command {
        Commands::KafkaConfig(args) => app::handle_config(args, config),
        Commands::KafkaConsumer(args) => app::handle_consumer(args, config),
        Commands::KafkaProducer(args) => app::handle_producer(args, config),
        Commands::KafkaCreate => app::handle_create(config),
        Commands::KafkaStart => app::handle_start(config),
        Commands::KafkaTopics(args) => app::handle_topics(args, config),
        Commands::KafkaMigrate => app::handle_migrate(config),
        Commands::MakeToken(args) => app::handle_make_token(args, config),
    };

    match exit {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            app::error::exit_code(&err)
        }
    }
}
