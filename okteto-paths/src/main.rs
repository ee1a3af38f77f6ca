//! Okteto Paths
//!
//! Prints the directories, kubeconfig location and timeout the Okteto CLI
//! resolves from the current environment. Any resolution failure ends the
//! process with a non-zero exit code.

mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use okteto_config::{ConfigError, ConfigResolver, LogConfig, init_logging};
use std::process::ExitCode;
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "okteto-paths")]
#[command(author, version = okteto_config::VERSION)]
#[command(about = "Show the paths and timeout the Okteto CLI resolves")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the user home directory
    Home,

    /// Print the okteto folder, creating it if needed
    Folder,

    /// Print a namespace folder, creating it if needed
    Namespace {
        /// Namespace name
        namespace: String,
    },

    /// Print a deployment folder, creating it if needed
    Deployment {
        /// Namespace name
        namespace: String,

        /// Deployment name
        name: String,
    },

    /// Print the kubeconfig path
    Kubeconfig,

    /// Print the per-action timeout
    Timeout {
        /// Print whole seconds instead of a human readable duration
        #[arg(long)]
        secs: bool,
    },

    /// Print every resolved value with where it came from
    Show {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env("warn").with_stderr();
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    let logging_guards = init_logging(&log_config)?;

    let resolver = ConfigResolver::system();
    let status = match run(&resolver, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    };

    // Flush the file sink before the exit status is returned.
    drop(logging_guards);
    Ok(status)
}

fn run(resolver: &ConfigResolver, command: Commands) -> Result<()> {
    match command {
        Commands::Home => output::print_path(&resolver.home_dir()?),
        Commands::Folder => output::print_path(&resolver.okteto_home()?),
        Commands::Namespace { namespace } => {
            output::print_path(&resolver.namespace_home(&namespace)?)
        }
        Commands::Deployment { namespace, name } => {
            output::print_path(&resolver.deployment_home(&namespace, &name)?)
        }
        Commands::Kubeconfig => output::print_path(&resolver.kubeconfig_path()?),
        Commands::Timeout { secs } => output::print_timeout(resolver.timeout(), secs),
        Commands::Show { json } => {
            let snapshot = resolver.snapshot()?;
            debug!(platform = %snapshot.platform, "resolved configuration");
            if json {
                output::print_json(&snapshot)?;
            } else {
                output::print_snapshot(&snapshot);
            }
        }
    }
    Ok(())
}

/// Print a failed command's error and pick the exit status.
fn report(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ConfigError>() {
        Some(config_err) => {
            let code = config_err.code().code_string();
            error!(code = %code, "{}", config_err);
            eprint!("{}", output::format_error(config_err));
        }
        None => {
            error!("{:#}", err);
            eprintln!("error: {err:#}");
        }
    }
    ExitCode::from(1)
}
