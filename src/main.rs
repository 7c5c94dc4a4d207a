use std::net::AddrParseError;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use mortgage_evaluator::adapters::{app_router, build_provider, http::EvaluationHandlers};
use mortgage_evaluator::application::{
    ChainSettings, EvaluateApplicationHandler, EvaluationChain, GenerateReportHandler,
};
use mortgage_evaluator::config::{AppConfig, ConfigError, ValidationError};
use mortgage_evaluator::domain::evaluation::{
    schema, EvaluationVariant, InstructionLoadError, InstructionSet, UnknownVariant,
};
use mortgage_evaluator::ports::AIError;
use mortgage_evaluator::telemetry::{self, TelemetryError};

#[derive(Parser, Debug)]
#[command(
    name = "mortgage-evaluator",
    about = "Evaluate mortgage applications with schema-validated LLM calls",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the JSON Schema bound to a variant's tool
    Schema {
        /// evaluator | executive_summary | client_response
        variant: String,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error(transparent)]
    Instructions(#[from] InstructionLoadError),

    #[error("AI provider setup failed: {0}")]
    Provider(#[from] AIError),

    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),

    #[error("invalid bind address: {0}")]
    Address(#[from] AddrParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => serve(args).await,
        Command::Schema { variant } => print_schema(&variant),
    }
}

fn print_schema(variant: &str) -> Result<(), AppError> {
    let variant: EvaluationVariant = variant.parse()?;
    let rendered = serde_json::to_string_pretty(&schema::define(variant).to_json_schema())?;
    println!("{rendered}");
    Ok(())
}

async fn serve(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    config.validate()?;
    telemetry::init(&config.server)?;

    let instructions = match &config.evaluation.prompts_dir {
        Some(dir) => InstructionSet::load(dir)?,
        None => InstructionSet::default(),
    };

    let provider = build_provider(&config.ai)?;
    let provider_info = provider.provider_info();

    let chain = EvaluationChain::with_settings(
        provider,
        instructions,
        ChainSettings {
            max_tokens: config.ai.max_tokens,
            temperature: config.ai.temperature,
            max_concurrent_generations: config.evaluation.max_concurrent_generations,
        },
    );
    let handlers = EvaluationHandlers::new(
        Arc::new(EvaluateApplicationHandler::new(chain.clone())),
        Arc::new(GenerateReportHandler::new(chain)),
    );

    let app = app_router(handlers, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        environment = ?config.server.environment,
        %addr,
        provider = %provider_info.name,
        model = %provider_info.model,
        "mortgage evaluator ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
