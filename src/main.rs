//! LLDB Debug MCP Server — Main Entry Point

use clap::Parser;
use tracing::{info, error, debug};
use tracing_subscriber::{EnvFilter, fmt};
use rmcp::{ServiceExt, transport::stdio};

use lldb_debug::{Args, Config, DebugToolHandler};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    info!("Starting LLDB Debug MCP Server v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_args(&args);

    let service = DebugToolHandler::new(config)
        .serve(stdio()).await.inspect_err(|e| {
            error!("Serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}

fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(false)
        .with_line_number(false);

    if let Some(log_file) = &args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    debug!("Logging initialized with level: {}", args.log_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use lldb_debug::config::{Args, Config};
    use std::time::Duration;

    #[test]
    fn test_args_parsing_defaults() {
        let args = Args::parse_from(["lldb-debug"]);
        assert!(args.lldb_path.is_none());
        assert_eq!(args.settle_ms, 500);
        assert_eq!(args.startup_grace_ms, 1000);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_args_parsing_with_options() {
        let args = Args::parse_from([
            "lldb-debug",
            "--lldb-path", "/usr/bin/lldb",
            "--settle-ms", "250",
            "--log-level", "debug",
        ]);
        assert_eq!(args.lldb_path.unwrap().to_str().unwrap(), "/usr/bin/lldb");
        assert_eq!(args.settle_ms, 250);
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.lldb_path.is_none());
        assert_eq!(config.settle_interval, Duration::from_millis(500));
        assert_eq!(config.startup_grace, Duration::from_millis(1000));
    }

    #[test]
    fn test_config_from_args() {
        let args = Args::parse_from([
            "lldb-debug",
            "--lldb-path", "/usr/bin/lldb",
            "--startup-grace-ms", "1500",
        ]);
        let config = Config::from_args(&args);
        assert_eq!(config.lldb_path.unwrap().to_str().unwrap(), "/usr/bin/lldb");
        assert_eq!(config.startup_grace, Duration::from_millis(1500));
    }
}
