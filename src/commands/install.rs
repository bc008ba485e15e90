// This file contains the logic for `setup-sumo install`, the default command.
// It resolves the configuration, runs the installer against the real system
// and prints the shell exports the user needs.

use crate::libs::config_loading;
use crate::libs::host::HostEnvironment;
use crate::libs::orchestrator::{InstallOptions, Installer};
use crate::libs::paths::resolve_config_source;
use crate::libs::process::SystemRunner;
use crate::libs::utilities::assets::HttpFetcher;
use crate::libs::utilities::path_helpers::expand_with_home;
use crate::schemas::report::{InstallReport, StepOutcome};
use crate::schemas::setup_config::{FailurePolicy, Profile};
use crate::{log_debug, log_info, log_warn};
use anyhow::Context;
use colored::Colorize;

/// Flags of the `install` command.
#[derive(Debug, Default, clap::Args)]
pub struct InstallArgs {
    /// Path to a YAML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Built-in configuration to use instead of a file
    #[arg(long, value_enum)]
    pub profile: Option<Profile>,

    /// Stop at the first failed step instead of continuing
    #[arg(long)]
    pub strict: bool,

    /// Refresh the package index before installing dependencies
    #[arg(long)]
    pub update: bool,

    /// Do not touch the package manager's installed packages
    #[arg(long)]
    pub skip_dependencies: bool,

    /// Empty the target directory before extracting
    #[arg(long)]
    pub clean: bool,

    /// Also append the exports to this shell profile (e.g. ~/.bash_profile)
    #[arg(long, value_name = "RC_FILE")]
    pub persist: Option<String>,
}

pub fn run(args: InstallArgs) -> anyhow::Result<()> {
    log_debug!("Entered install::run() with {:?}", args);

    let host = HostEnvironment::from_process()?;
    let source = resolve_config_source(args.config.as_deref(), args.profile, &host)?;
    let mut config = config_loading::load(&source).context("loading configuration")?;
    if args.strict {
        config.policy = FailurePolicy::FailFast;
    }
    if args.clean {
        config.clean_target = true;
    }

    let persist_to = args
        .persist
        .as_deref()
        .map(|rc| expand_with_home(rc, &host.home))
        .transpose()?;
    let options = InstallOptions {
        update_index: args.update,
        skip_dependencies: args.skip_dependencies,
        persist_to: persist_to.clone(),
    };

    let fetcher = HttpFetcher::new();
    let report = Installer::new(&config, &host, &SystemRunner, &fetcher, options).run()?;

    summarize(&report);
    print_instructions(&report, persist_to.is_some());
    Ok(())
}

fn summarize(report: &InstallReport) {
    if report.is_clean() {
        log_info!("'setup-sumo install' completed!!");
        return;
    }

    let failures: Vec<_> = report.failures().collect();
    log_warn!(
        "'setup-sumo install' finished with {} failed step(s):",
        failures.len().to_string().yellow()
    );
    for record in failures {
        if let StepOutcome::Failed(reason) = &record.outcome {
            log_warn!("  - {}: {}", record.step.to_string().bold(), reason);
        }
    }
}

fn print_instructions(report: &InstallReport, persisted: bool) {
    println!();
    if persisted {
        println!("Your shell profile now sets up SUMO with:");
    } else {
        println!("Add the following lines to your shell profile to use SUMO:");
    }
    for line in &report.exports {
        println!("{line}");
    }
}
