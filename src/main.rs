mod commands;
mod errors;
mod installers;
mod libs;
mod logger;
mod schemas;
#[cfg(test)]
mod test_support;

use clap::{Parser, Subcommand};
use commands::install::InstallArgs;
use commands::{env, generate, install};
use schemas::setup_config::Profile;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "setup-sumo", version)]
#[command(about = "Install the SUMO simulator binaries and their native dependencies", long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install dependencies and SUMO binaries (default)
    Install(InstallArgs),
    /// Print the shell exports for the SUMO binaries directory
    Env {
        #[arg(long)]
        config: Option<String>,
        #[arg(long, value_enum)]
        profile: Option<Profile>,
    },
    /// Write a built-in profile to a configuration file
    Generate {
        #[arg(long, value_enum)]
        profile: Option<Profile>,
        /// Destination file, `-` for stdout
        #[arg(long)]
        output: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.debug);

    let result = match cli.command.unwrap_or_else(|| Commands::Install(InstallArgs::default())) {
        Commands::Install(args) => install::run(args),
        Commands::Env { config, profile } => env::run(config, profile),
        Commands::Generate {
            profile,
            output,
            force,
        } => generate::run(profile, output, force),
    };

    ExitCode::from(exit_status(result))
}

/// Logs a failed command and maps it to the process exit status.
fn exit_status(result: anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            log_error!("{:#}", e);
            1
        }
    }
}
