//! CI/CD practice web service entry point.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::runtime::{Builder, Runtime};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cicd_practice::api::{create_router, AppState};
use cicd_practice::config::Config;
use cicd_practice::error::AppError;
use cicd_practice::info::{app_info, APP_NAME, VERSION};
use cicd_practice::metrics;
use cicd_practice::probe::{wait_until_healthy, ProbeConfig};
use cicd_practice::utils::shutdown_signal;

/// CI/CD practice web service.
#[derive(Parser, Debug)]
#[command(name = "cicd-practice")]
#[command(about = "Small web service for practicing CI/CD pipelines")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Bind address.
        #[arg(long)]
        host: Option<String>,

        /// HTTP listen port.
        #[arg(short, long)]
        port: Option<u16>,

        /// Runtime worker threads.
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Probe a running instance's /health endpoint.
    Healthcheck {
        /// Health endpoint URL (defaults to the local server).
        #[arg(long, env = "HEALTHCHECK_URL")]
        url: Option<String>,

        /// Counted failures before giving up.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        retries: u32,

        /// Seconds between attempts.
        #[arg(long, default_value_t = 5)]
        interval_secs: u64,

        /// Per-request timeout in seconds.
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,

        /// Seconds during which failures are not counted.
        #[arg(long, default_value_t = 0)]
        start_period_secs: u64,
    },

    /// Check configuration validity.
    CheckConfig,
}

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load().map_err(AppError::from)?;

    // Initialize logging
    init_tracing(&config, args.verbose || config.verbose);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Healthcheck {
            url,
            retries,
            interval_secs,
            timeout_secs,
            start_period_secs,
        }) => {
            let url = url.unwrap_or_else(|| format!("http://127.0.0.1:{}/health", config.port));
            let probe = ProbeConfig {
                interval: Duration::from_secs(interval_secs),
                timeout: Duration::from_secs(timeout_secs),
                start_period: Duration::from_secs(start_period_secs),
                retries,
            };
            let runtime = Builder::new_current_thread().enable_all().build()?;
            runtime.block_on(cmd_healthcheck(url, probe))
        }
        Some(Command::Serve {
            host,
            port,
            workers,
        }) => {
            // Override with CLI args if provided
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(workers) = workers {
                config.workers = workers;
            }
            serve(config)
        }
        None => serve(config),
    }
}

fn init_tracing(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cicd_practice=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

fn build_runtime(workers: usize) -> std::io::Result<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()
}

/// Validate config, then run the server on a runtime sized by `workers`.
fn serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(AppError::InvalidConfig(e).into());
    }

    let runtime = build_runtime(config.workers)?;
    runtime.block_on(cmd_serve(config))
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    let addr = config.socket_addr().map_err(AppError::InvalidConfig)?;

    info!("Starting {} v{}", APP_NAME, VERSION);
    info!("Environment: {}", config.app_env);
    info!("Build: {}", config.app_build);
    info!("Workers: {}", config.workers);

    let metrics_handle = metrics::install_recorder()?;
    let app_state = AppState::from_config(&config).with_metrics(metrics_handle);
    let router = create_router(app_state);

    let listener = TcpListener::bind(addr).await.map_err(AppError::from)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::from)?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Poll the health endpoint; a non-zero exit marks the instance unhealthy.
async fn cmd_healthcheck(url: String, probe: ProbeConfig) -> anyhow::Result<()> {
    let client = reqwest::Client::builder().timeout(probe.timeout).build()?;

    match wait_until_healthy(&client, &url, &probe).await {
        Ok(body) => {
            println!("{} {} ({})", url, body.status, body.timestamp);
            Ok(())
        }
        Err(e) => {
            error!("Health check failed: {}", e);
            Err(AppError::from(e).into())
        }
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CI/CD PRACTICE APP - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    if let Err(e) = config.validate() {
        println!("FAILED");
        println!("  Error: {}", e);
        return Err(AppError::InvalidConfig(e).into());
    }
    println!("OK");

    print!("Resolving bind address... ");
    let addr = match config.socket_addr() {
        Ok(addr) => {
            println!("OK");
            addr
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(AppError::InvalidConfig(e).into());
        }
    };

    println!("----------------------------------------------------------------------");
    let app = app_info();
    println!("Configuration Summary:");
    println!("  Application: {} ({})", app.name, app.framework);
    println!("  Version: {}", app.version);
    println!("  Listen: {}", addr);
    println!("  Workers: {}", config.workers);
    println!("  Environment: {}", config.app_env);
    println!("  Build: {}", config.app_build);
    println!("  Log Level: {}", config.rust_log);
    println!("  JSON Logs: {}", if config.log_json { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
