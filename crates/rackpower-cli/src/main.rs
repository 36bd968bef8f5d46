//! rackpower - remote power control through PDU outlets and IPMI BMCs.
//!
//! Queries and toggles a host's power via its SNMP-managed PDU outlet and,
//! where configured, its BMC. Hosts are looked up in a per-user registry.

mod cli;
mod commands;
mod error;
mod output;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::{exit_codes, CliError};
use rackpower_core::{default_registry_path, HostRegistry, PowerTarget};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_codes::SUCCESS,
                _ => exit_codes::INVALID_ARGS,
            };
            std::process::exit(code);
        }
    };

    init_tracing(cli.debug);

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            match &e {
                // Operational failures are reported on stdout; the exit code
                // stays 0 for them.
                CliError::Core(core) => println!("{}", core),
                other => eprintln!("Error: {}", other),
            }
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let registry = load_registry()?;

    if cli.on {
        commands::run_power(registry, &cli.host, PowerTarget::On).await
    } else if cli.off {
        commands::run_power(registry, &cli.host, PowerTarget::Off).await
    } else {
        commands::run_status(registry, &cli.host, cli.json).await
    }
}

fn load_registry() -> Result<HostRegistry, CliError> {
    match default_registry_path() {
        Some(path) => {
            HostRegistry::load(&path).map_err(|e| CliError::Core(e.into()))
        }
        // No resolvable home directory behaves like a missing registry file.
        None => Ok(HostRegistry::empty()),
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("warn")
            .add_directive("rackpower=debug".parse().unwrap())
            .add_directive("rackpower_core=debug".parse().unwrap())
            .add_directive("async_snmp=debug".parse().unwrap())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
