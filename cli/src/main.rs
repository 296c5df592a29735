//! CLI entrypoint for colloquy
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;
mod logging;
mod scenario;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colloquy_application::{
    AiResponseOrchestrator, EventLogger, MessageAuthor, MessageEventUseCase, NoEventLogger,
    ResponseScheduler,
};
use colloquy_domain::{
    PermissionAction, PermissionContext, PermissionEngine, PermissionMetadata, PersonaId,
};
use colloquy_infrastructure::{
    ConfigLoader, FileConfig, InMemoryMessageHistory, JsonlEventLogger, LoggingResponseGenerator,
    RandomJitter,
};
use commands::{Cli, Command};
use scenario::Scenario;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so [logging] can pick the log file
    let config = load_config(&cli)?;
    let _log_guard = logging::init_logging(cli.verbose, config.logging.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let Some(command) = cli.command else {
        bail!("A command is required. Run with --help for usage.");
    };

    info!("Starting colloquy");

    let event_logger = build_event_logger(&config);

    match command {
        Command::Permissions {
            scenario,
            user,
            persona,
        } => run_permissions(&scenario, &user, persona.as_deref()),
        Command::Triggers { scenario, message } => {
            run_triggers(&config, event_logger, &scenario, &message).await
        }
        Command::Simulate {
            scenario,
            user,
            message,
        } => run_simulate(&config, event_logger, &scenario, &user, &message).await,
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        if let Some(path) = &cli.config
            && !path.exists()
        {
            bail!("config file not found: {}", path.display());
        }
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?
    };

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn build_event_logger(config: &FileConfig) -> Arc<dyn EventLogger> {
    match config.logging.event_log.as_ref().and_then(|path| JsonlEventLogger::new(path)) {
        Some(logger) => {
            info!("Writing engine events to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoEventLogger),
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_permissions(scenario_path: &Path, user_id: &str, persona: Option<&str>) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let user = scenario.user(user_id)?;

    let mut metadata = PermissionMetadata::owning(scenario.owned_persona_ids(user));
    if let Some(persona) = persona {
        metadata = metadata.acting_as(PersonaId::new(persona));
    }
    let ctx = PermissionContext::new(user, PermissionAction::Evaluate, &scenario.conversation)
        .with_metadata(metadata);

    let result = PermissionEngine::default().evaluate_permissions(&ctx);
    print_json(&result)
}

async fn run_triggers(
    config: &FileConfig,
    event_logger: Arc<dyn EventLogger>,
    scenario_path: &Path,
    message_id: &str,
) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let message = scenario.message(message_id)?;
    let history = Arc::new(InMemoryMessageHistory::with_messages(
        scenario.messages.iter().cloned(),
    ));

    let orchestrator = AiResponseOrchestrator::with_config(history, config.orchestrator_config())
        .with_jitter(Arc::new(RandomJitter))
        .with_event_logger(event_logger);

    let triggers = orchestrator
        .analyze_response_triggers(&scenario.conversation, message, &scenario.personas)
        .await?;
    print_json(&triggers)
}

async fn run_simulate(
    config: &FileConfig,
    event_logger: Arc<dyn EventLogger>,
    scenario_path: &Path,
    user_id: &str,
    message_id: &str,
) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let user = scenario.user(user_id)?;
    let message = scenario.message(message_id)?;
    let owned = scenario.owned_persona_ids(user);

    // === Dependency Injection ===
    let history = Arc::new(InMemoryMessageHistory::with_messages(
        scenario.messages.iter().cloned(),
    ));
    let generator = Arc::new(LoggingResponseGenerator::new());

    let orchestrator = AiResponseOrchestrator::with_config(history, config.orchestrator_config())
        .with_jitter(Arc::new(RandomJitter))
        .with_event_logger(Arc::clone(&event_logger));
    let scheduler = Arc::new(
        ResponseScheduler::with_config(Arc::clone(&generator), config.scheduler_config())
            .with_event_logger(Arc::clone(&event_logger)),
    );
    let use_case = MessageEventUseCase::new(PermissionEngine::default(), orchestrator, scheduler)
        .with_event_logger(event_logger);

    let author = MessageAuthor {
        user,
        owned_persona_ids: &owned,
    };
    let outcome = use_case
        .handle_new_message(author, &scenario.conversation, message, &scenario.personas)
        .await
        .inspect_err(|e| {
            if e.is_retryable() {
                warn!("Message handling failed, a retry may succeed");
            }
        })?;

    print_json(&outcome)?;

    use_case.scheduler().drain().await;
    eprintln!(
        "{} of {} scheduled replies generated",
        generator.generated(),
        outcome.scheduled.len()
    );
    Ok(())
}
