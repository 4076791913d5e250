//! Library entry points, one per CLI command.
//!
//! Commands that touch the container runtime come in two flavours: the plain
//! function builds a `DockerProbe` from the project configuration, the `_with`
//! variant accepts any `RuntimeProbe`.

use std::collections::HashSet;

use time::OffsetDateTime;
use tracing::info;

use crate::config::ProjectConfig;
use crate::error::{Error, Result};

use super::container::ContainerLifecycle;
use super::diagnostics::Diagnostic;
use super::events::Event;
use super::migrate::{MigrationTarget, migrate_topics};
use super::options::{
    ComponentOptions, ConfigLoadOptions, ConfigModuleOptions, ContainerOptions, MigrateOptions,
    TokenOptions, TopicsOptions,
};
use super::outcome::{
    CreateOutcome, GenerateOutcome, MigrateOutcome, OperationOutput, OperationResult,
    StartOutcome, TokenOutcome, TopicsOutcome,
};
use super::probe::{ContainerSpec, DockerProbe, RuntimeProbe};
use super::project::{ProjectLoad, load_project};
use super::registry::{TopicRegistry, merge, parse_topics};
use super::reporter::{Reporter, ReporterProxy};
use super::scaffold::{self, Component, Identifier, ScaffoldKind};
use super::token;

pub fn config_module(
    options: ConfigModuleOptions,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<GenerateOutcome> {
    let mut diagnostics = Vec::new();
    let mut events = Vec::new();
    let project = load_project_for_operation(&options.config, &mut diagnostics)?;

    let path = scaffold::config_path(&project.scaffold.config_dir);
    let contents = scaffold::render_config(&header(), &project.broker.bootstrap);
    let overwritten = scaffold::write_generated(&path, &contents, options.force)?;

    ReporterProxy::new(reporter, &mut events).emit(Event::FileGenerated {
        kind: ScaffoldKind::Config,
        path: path.clone(),
        overwritten,
    });

    Ok(OperationOutput::new(GenerateOutcome {
        kind: ScaffoldKind::Config,
        path,
        overwritten,
        type_name: None,
    })
    .with_diagnostics(diagnostics)
    .with_events(events))
}

pub fn producer(
    options: ComponentOptions,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<GenerateOutcome> {
    generate_component(Component::Producer, options, reporter)
}

pub fn consumer(
    options: ComponentOptions,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<GenerateOutcome> {
    generate_component(Component::Consumer, options, reporter)
}

fn generate_component(
    component: Component,
    options: ComponentOptions,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<GenerateOutcome> {
    let ident = Identifier::parse(&options.name)?;
    let topic = scaffold::component_topic(&options.topic)?;

    let mut diagnostics = Vec::new();
    let mut events = Vec::new();
    let project = load_project_for_operation(&options.config, &mut diagnostics)?;

    let path = component.path(&project.scaffold, &ident);
    let contents = component.render(&header(), &ident, &topic);
    let overwritten = scaffold::write_generated(&path, &contents, options.force)?;

    ReporterProxy::new(reporter, &mut events).emit(Event::FileGenerated {
        kind: component.kind(),
        path: path.clone(),
        overwritten,
    });

    Ok(OperationOutput::new(GenerateOutcome {
        kind: component.kind(),
        path,
        overwritten,
        type_name: Some(component.type_name(&ident)),
    })
    .with_diagnostics(diagnostics)
    .with_events(events))
}

pub fn create(
    options: ContainerOptions,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<CreateOutcome> {
    let mut diagnostics = Vec::new();
    let project = load_project_for_operation(&options.config, &mut diagnostics)?;
    let mut probe = DockerProbe::from_config(&project);
    create_for_project(&project, &mut probe, reporter).map(|out| out.with_diagnostics(diagnostics))
}

pub fn create_with(
    options: ContainerOptions,
    probe: &mut dyn RuntimeProbe,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<CreateOutcome> {
    let mut diagnostics = Vec::new();
    let project = load_project_for_operation(&options.config, &mut diagnostics)?;
    create_for_project(&project, probe, reporter).map(|out| out.with_diagnostics(diagnostics))
}

fn create_for_project(
    project: &ProjectConfig,
    probe: &mut dyn RuntimeProbe,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<CreateOutcome> {
    let mut events = Vec::new();
    let spec = ContainerSpec::from_config(project);
    let outcome = {
        let mut reporter = ReporterProxy::new(reporter, &mut events);
        ContainerLifecycle::new(probe).create(&spec, &mut reporter)?
    };
    Ok(OperationOutput::new(outcome).with_events(events))
}

pub fn start(
    options: ContainerOptions,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<StartOutcome> {
    let mut diagnostics = Vec::new();
    let project = load_project_for_operation(&options.config, &mut diagnostics)?;
    let mut probe = DockerProbe::from_config(&project);
    start_for_project(&project, &mut probe, reporter).map(|out| out.with_diagnostics(diagnostics))
}

pub fn start_with(
    options: ContainerOptions,
    probe: &mut dyn RuntimeProbe,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<StartOutcome> {
    let mut diagnostics = Vec::new();
    let project = load_project_for_operation(&options.config, &mut diagnostics)?;
    start_for_project(&project, probe, reporter).map(|out| out.with_diagnostics(diagnostics))
}

fn start_for_project(
    project: &ProjectConfig,
    probe: &mut dyn RuntimeProbe,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<StartOutcome> {
    let mut events = Vec::new();
    let outcome = {
        let mut reporter = ReporterProxy::new(reporter, &mut events);
        ContainerLifecycle::new(probe).start(&project.container.name, &mut reporter)?
    };
    Ok(OperationOutput::new(outcome).with_events(events))
}

pub fn topics(
    options: TopicsOptions,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<TopicsOutcome> {
    let incoming = parse_topics(&options.topics);
    if incoming.is_empty() {
        return Err(Error::InvalidInput {
            message: "no topic names given; pass a comma-separated list such as `orders,payments`"
                .to_string(),
        });
    }

    let mut diagnostics = Vec::new();
    let mut events = Vec::new();
    let project = load_project_for_operation(&options.config, &mut diagnostics)?;

    let registry = TopicRegistry::new(&project.registry.path);
    let existing = registry.load()?;
    let merged = merge(&existing, &incoming);
    registry.save(&merged)?;

    let known: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let added: Vec<String> = merged
        .iter()
        .filter(|topic| !known.contains(topic.as_str()))
        .cloned()
        .collect();
    info!(
        path = %registry.path().display(),
        added = added.len(),
        total = merged.len(),
        "topic registry updated"
    );

    ReporterProxy::new(reporter, &mut events).emit(Event::RegistryUpdated {
        path: registry.path().to_path_buf(),
        added: added.clone(),
        total: merged.len(),
    });

    Ok(OperationOutput::new(TopicsOutcome {
        registry_path: registry.path().to_path_buf(),
        added,
        topics: merged,
    })
    .with_diagnostics(diagnostics)
    .with_events(events))
}

pub fn migrate(
    options: MigrateOptions,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<MigrateOutcome> {
    let mut diagnostics = Vec::new();
    let project = load_project_for_operation(&options.config, &mut diagnostics)?;
    let mut probe = DockerProbe::from_config(&project);
    migrate_for_project(&project, &mut probe, reporter).map(|out| out.with_diagnostics(diagnostics))
}

pub fn migrate_with(
    options: MigrateOptions,
    probe: &mut dyn RuntimeProbe,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<MigrateOutcome> {
    let mut diagnostics = Vec::new();
    let project = load_project_for_operation(&options.config, &mut diagnostics)?;
    migrate_for_project(&project, probe, reporter).map(|out| out.with_diagnostics(diagnostics))
}

fn migrate_for_project(
    project: &ProjectConfig,
    probe: &mut dyn RuntimeProbe,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<MigrateOutcome> {
    let mut events = Vec::new();
    let registry = TopicRegistry::new(&project.registry.path);
    let target = MigrationTarget {
        container: project.container.name.clone(),
        bootstrap: project.broker.bootstrap.clone(),
    };
    let outcome = {
        let mut reporter = ReporterProxy::new(reporter, &mut events);
        migrate_topics(&registry, probe, &target, &mut reporter)?
    };
    Ok(OperationOutput::new(outcome).with_events(events))
}

pub fn make_token(
    options: TokenOptions,
    reporter: Option<&mut dyn Reporter>,
) -> OperationResult<TokenOutcome> {
    let mut diagnostics = Vec::new();
    let mut events = Vec::new();
    let project = load_project_for_operation(&options.config, &mut diagnostics)?;
    let settings = &project.token;

    let token = token::generate_token(options.bytes.unwrap_or(settings.bytes))?;
    let stored = token::stored_representation(&token, options.hashed);

    let mut reporter = ReporterProxy::new(reporter, &mut events);

    token::write_with_parents(&settings.path, &stored)?;
    reporter.emit(Event::TokenStored {
        path: settings.path.clone(),
        hashed: options.hashed,
    });

    let env = if options.skip_env {
        None
    } else {
        let patch = token::patch_env_file(&settings.env_file, &settings.env_key, &token)?;
        reporter.emit(Event::EnvPatched {
            path: settings.env_file.clone(),
            key: settings.env_key.clone(),
            replaced: patch == token::EnvPatch::Replaced,
        });
        Some((settings.env_file.clone(), settings.env_key.clone()))
    };
    info!(path = %settings.path.display(), hashed = options.hashed, "token issued");
    drop(reporter);

    Ok(OperationOutput::new(TokenOutcome {
        token,
        token_path: settings.path.clone(),
        hashed: options.hashed,
        env,
    })
    .with_diagnostics(diagnostics)
    .with_events(events))
}

pub(super) fn load_project_for_operation(
    options: &ConfigLoadOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ProjectConfig> {
    let ProjectLoad {
        config,
        diagnostics: diag,
        ..
    } = load_project(options)?;
    diagnostics.extend(diag);
    Ok(config)
}

fn header() -> String {
    scaffold::generated_header(OffsetDateTime::now_utc())
}
