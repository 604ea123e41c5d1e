use clap::Parser;
use navguard::{cli, config, errors};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        built_at = env!("BUILD_TIMESTAMP"),
        "navguard starting"
    );

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            errors::NavGuardError::Config(_) | errors::NavGuardError::Yaml(_) => 2,
            errors::NavGuardError::InvalidUrl(_) => 3,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: cli::Cli) -> Result<(), errors::NavGuardError> {
    if let cli::Commands::Validate(args) = &cli.command {
        return handle_validate(args).await;
    }

    let config = match &cli.config {
        Some(path) => config::parse_config(std::path::Path::new(path)).await?,
        None => config::NavGuardConfig::default(),
    };

    match cli.command {
        cli::Commands::Serve(args) => cli::serve::handle_serve(args, config).await,
        cli::Commands::Check(args) => cli::check::handle_check(args, config).await,
        cli::Commands::Validate(_) => Ok(()),
    }
}

async fn handle_validate(args: &cli::commands::ValidateArgs) -> Result<(), errors::NavGuardError> {
    let path = std::path::PathBuf::from(&args.config);
    let config = config::parse_config(&path).await?;
    println!("Configuration is valid: {}", args.config);
    println!(
        "  oracle: {} (enabled: {}, timeout {} ms)",
        config.oracle.endpoint, config.oracle.enabled, config.oracle.timeout_ms
    );
    println!(
        "  thresholds: medium {} / high {} / critical {}",
        config.scoring.thresholds.medium,
        config.scoring.thresholds.high,
        config.scoring.thresholds.critical
    );
    println!("  decision timeout: {}s", config.interceptor.decision_timeout_secs);
    Ok(())
}
