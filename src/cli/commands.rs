use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "navguard", version, about = "Navigation interception and phishing-risk gate")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the local bridge the browser extension talks to
    Serve(ServeArgs),
    /// Evaluate a single URL and print the verdict
    Check(CheckArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port (overrides bridge.port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address (overrides bridge.host)
    #[arg(long)]
    pub host: Option<String>,
}

#[derive(Args, Clone)]
pub struct CheckArgs {
    /// URL to evaluate
    pub url: String,

    /// Skip the remote oracle stage
    #[arg(long)]
    pub offline: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Path to YAML config file
    pub config: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_with_globals() {
        let cli = Cli::parse_from(["navguard", "-vv", "--config", "nav.yaml", "check", "http://a.example/", "--offline"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some("nav.yaml"));
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.url, "http://a.example/");
                assert!(args.offline);
                assert!(!args.json);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["navguard", "serve", "--port", "9000"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert!(args.host.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
