//! # Package Manager Installer
//!
//! Drives the host package manager (Homebrew, apt-get, ...) to install SUMO's
//! native dependencies.
//!
//! The package manager must be on the search path before anything else
//! happens; [`PackageManager::locate`] is that gate. Installs then run one
//! package per invocation, in configuration order, so a failing package is
//! reported on its own and the remaining ones still get their turn.

use crate::errors::{SetupError, SetupResult};
use crate::libs::host::HostEnvironment;
use crate::libs::process::CommandRunner;
use crate::schemas::setup_config::PackageManagerSpec;
use crate::{log_debug, log_info};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// A package manager that has been found on the search path.
pub struct PackageManager<'a, R: CommandRunner> {
    spec: &'a PackageManagerSpec,
    program: PathBuf,
    elevate: Option<PathBuf>,
    runner: &'a R,
}

impl<'a, R: CommandRunner> PackageManager<'a, R> {
    /// Looks the package manager up on the host's search path.
    ///
    /// # Returns
    /// * `Err(SetupError::MissingPackageManager)` carrying the configured
    ///   install hint when the program cannot be found.
    pub fn locate(
        spec: &'a PackageManagerSpec,
        host: &HostEnvironment,
        runner: &'a R,
    ) -> SetupResult<Self> {
        let program = host.find_program(&spec.program).ok_or_else(|| {
            SetupError::MissingPackageManager {
                program: spec.program.clone(),
                hint: spec.install_hint.clone(),
            }
        })?;
        log_debug!(
            "[SUMO::Deps] Found {} at {}",
            spec.program.bold(),
            program.display().to_string().cyan()
        );

        // An unresolvable wrapper is still run by name and left to the OS.
        let elevate = spec.elevate_with.as_ref().map(|wrapper| {
            host.find_program(wrapper)
                .unwrap_or_else(|| PathBuf::from(wrapper))
        });

        Ok(Self {
            spec,
            program,
            elevate,
            runner,
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn can_update(&self) -> bool {
        self.spec.update_args.is_some()
    }

    /// Refreshes the package index (`brew update`, `apt-get update`).
    pub fn update(&self) -> SetupResult<()> {
        let args = self.spec.update_args.clone().unwrap_or_default();
        log_info!("[SUMO::Deps] Refreshing package index with {}", self.spec.program.bold());
        self.execute(args)
    }

    /// Installs a single package.
    pub fn install(&self, package: &str) -> SetupResult<()> {
        log_info!("[SUMO::Deps] Installing {}", package.bold());
        let mut args = self.spec.install_args.clone();
        args.push(package.to_string());
        self.execute(args)?;
        log_info!("[SUMO::Deps] Installed {}", package.green());
        Ok(())
    }

    /// Builds the final command line, prepending the privilege wrapper if any.
    fn command_line(&self, args: Vec<String>) -> (PathBuf, Vec<String>) {
        match &self.elevate {
            Some(wrapper) => {
                let mut wrapped = Vec::with_capacity(args.len() + 1);
                wrapped.push(self.program.to_string_lossy().into_owned());
                wrapped.extend(args);
                (wrapper.clone(), wrapped)
            }
            None => (self.program.clone(), args),
        }
    }

    fn execute(&self, args: Vec<String>) -> SetupResult<()> {
        let (program, args) = self.command_line(args);
        let command = format!("{} {}", program.display(), args.join(" "));
        log_debug!("[SUMO::Deps] Executing: {}", command.cyan());

        let outcome = self.runner.run(&program, &args).map_err(|source| SetupError::Spawn {
            program: program.display().to_string(),
            source,
        })?;

        if outcome.success {
            Ok(())
        } else {
            Err(SetupError::CommandFailed {
                command,
                status: outcome.describe(),
            })
        }
    }
}
