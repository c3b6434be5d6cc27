use std::env;
use std::process::ExitCode;

use netopt_core::config::{init_tracing, EngineConfig};
use netopt_core::registry::NetworkRegistry;
use netopt_core::stdio::{run_stdio, CommandServer, METHODS};
use tracing::{error, info};

const USAGE: &str = "usage: netopt [--namespace <name>] [--log <filter>]

Reads one JSON request per line on stdin and writes one response per line on stdout.
Environment: NETOPT_NAMESPACE, NETOPT_LOG (or RUST_LOG).";

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        println!("Methods: {}", METHODS.join(", "));
        return ExitCode::SUCCESS;
    }

    let config = match EngineConfig::from_env().apply_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    init_tracing(&config.log_filter);
    info!(namespace = %config.namespace, "starting netopt (stdio mode)");

    let server = CommandServer::new(NetworkRegistry::new(), config.namespace);
    match run_stdio(server).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "stdio server failed");
            ExitCode::FAILURE
        }
    }
}
