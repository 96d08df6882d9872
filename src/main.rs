//! Vigil CLI - deployment status watcher for ML model endpoints.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use vigil::cli::{deploy_model, format_model_list, format_status_line, watch_model, withdraw_model};
use vigil::prelude::*;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(author, version, about = "Deployment status watcher for ML model endpoints", long_about = None)]
struct Cli {
    /// Platform API base URL (default: $VIGIL_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Bearer token for authenticated platforms
    #[arg(long, global = true)]
    token: Option<String>,

    /// Poll interval in milliseconds
    #[arg(long, global = true, default_value_t = 5000)]
    interval_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current status of an endpoint
    Status {
        /// Endpoint name
        endpoint_name: String,
    },
    /// Watch a model until its deployment status settles
    Watch {
        /// Model id
        model_id: ModelId,
    },
    /// Deploy a model and watch the transition
    Deploy {
        /// Model id
        model_id: ModelId,
    },
    /// Withdraw a deployed model and watch the transition
    Withdraw {
        /// Model id
        model_id: ModelId,
    },
    /// List models on the platform
    List,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = runtime.block_on(run(cli)) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn resolve_api_base(cli: &Cli) -> vigil::Result<String> {
    cli.api_base
        .clone()
        .or_else(|| std::env::var("VIGIL_API_BASE").ok())
        .ok_or_else(|| {
            VigilError::InvalidBaseUrl("set --api-base or VIGIL_API_BASE".to_string())
        })
}

async fn run(cli: Cli) -> vigil::Result<()> {
    let base = resolve_api_base(&cli)?;
    let mut client = ApiClient::new(base)?;
    if let Some(token) = &cli.token {
        client = client.with_auth(ApiAuth::Token(token.clone()));
    }
    let api: Arc<dyn PlatformApi> = Arc::new(client);
    let config = WatcherConfig::new(Duration::from_millis(cli.interval_ms));

    match cli.command {
        Commands::Status { endpoint_name } => {
            let status = api.endpoint_status(&endpoint_name).await?;
            println!("{}", format_status_line(&endpoint_name, status));
        }
        Commands::Watch { model_id } => {
            let status = watch_model(api, model_id, config, print_transition).await?;
            println!("Settled: {status} [{}]", status.severity());
        }
        Commands::Deploy { model_id } => {
            println!("Deploying model {model_id}");
            let status = deploy_model(api, model_id, config, print_transition).await?;
            println!("Settled: {status} [{}]", status.severity());
        }
        Commands::Withdraw { model_id } => {
            println!("Withdrawing model {model_id}");
            let status = withdraw_model(api, model_id, config, print_transition).await?;
            println!("Settled: {status} [{}]", status.severity());
        }
        Commands::List => {
            let models = api.list_models().await?;
            print!("{}", format_model_list(&models));
        }
    }

    Ok(())
}

fn print_transition(status: DeploymentStatus) {
    println!("  {status} [{}]", status.severity());
}
