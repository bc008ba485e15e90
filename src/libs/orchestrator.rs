// Runs a complete SUMO installation in the fixed order:
// package manager check, optional index refresh, dependencies, target
// directory, download, extract, archive removal, permissions, exports.
//
// A missing package manager always ends the run before anything else is
// touched. Every later step is recorded in the `InstallReport`; under
// `FailurePolicy::BestEffort` a failure is logged and the next step still
// runs, under `FailurePolicy::FailFast` it ends the run.

use crate::errors::{SetupError, SetupResult};
use crate::installers::archive::InstallScope;
use crate::installers::package_manager::PackageManager;
use crate::libs::host::HostEnvironment;
use crate::libs::paths::resolve_target_dir;
use crate::libs::process::CommandRunner;
use crate::libs::shell_configurator::{export_lines, persist_exports};
use crate::libs::utilities::assets::{ArchiveFetcher, ArchiveKind, archive_file_name};
use crate::schemas::report::{InstallReport, Step, StepOutcome};
use crate::schemas::setup_config::{FailurePolicy, SetupConfig};
use crate::{log_debug, log_info, log_warn};
use colored::Colorize;
use std::path::PathBuf;

/// Per-run switches that are not part of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub update_index: bool,
    pub skip_dependencies: bool,
    pub persist_to: Option<PathBuf>,
}

pub struct Installer<'a, R: CommandRunner, F: ArchiveFetcher> {
    config: &'a SetupConfig,
    host: &'a HostEnvironment,
    runner: &'a R,
    fetcher: &'a F,
    options: InstallOptions,
}

impl<'a, R: CommandRunner, F: ArchiveFetcher> Installer<'a, R, F> {
    pub fn new(
        config: &'a SetupConfig,
        host: &'a HostEnvironment,
        runner: &'a R,
        fetcher: &'a F,
        options: InstallOptions,
    ) -> Self {
        Self {
            config,
            host,
            runner,
            fetcher,
            options,
        }
    }

    pub fn run(&self) -> SetupResult<InstallReport> {
        log_debug!("[SUMO::Install] Policy: {:?}, options: {:?}", self.config.policy, self.options);

        // Pure computations first so configuration errors never leave partial state.
        let target = resolve_target_dir(&self.config.target_dir, self.host)?;
        let url = self.config.archive_url.trim();
        let file_name = archive_file_name(url)
            .ok_or_else(|| SetupError::Config(format!("archive_url has no file name: '{url}'")))?;
        let kind = ArchiveKind::from_file_name(&file_name)?;

        let mut report = InstallReport::default();

        let manager = PackageManager::locate(&self.config.package_manager, self.host, self.runner)?;
        log_info!(
            "[SUMO::Deps] Using package manager at {}",
            manager.program().display().to_string().cyan()
        );
        report.record(Step::CheckPackageManager, StepOutcome::Done);

        if self.options.update_index {
            if manager.can_update() {
                self.settle(&mut report, Step::UpdatePackageIndex, manager.update())?;
            } else {
                report.record(
                    Step::UpdatePackageIndex,
                    StepOutcome::Skipped("no update command configured".to_string()),
                );
            }
        }

        for dependency in &self.config.dependencies {
            let step = Step::InstallDependency(dependency.clone());
            if self.options.skip_dependencies {
                report.record(step, StepOutcome::Skipped("dependencies skipped".to_string()));
                continue;
            }
            self.settle(&mut report, step, manager.install(dependency))?;
        }

        {
            let scope = InstallScope::new(&target);
            self.settle(&mut report, Step::CreateTargetDir, scope.prepare(self.config.clean_target))?;

            let archive = scope.archive_path(&file_name);
            self.settle(&mut report, Step::Download, scope.download(self.fetcher, url, &archive))?;
            self.settle(&mut report, Step::Extract, scope.extract(&archive, kind))?;
            self.settle(&mut report, Step::RemoveArchive, scope.remove_archive(&archive))?;
            if let Some(count) = self.settle(&mut report, Step::MarkExecutable, scope.mark_executable())? {
                log_info!(
                    "[SUMO::Archive] {} file(s) ready in {}",
                    count,
                    scope.target().display().to_string().green()
                );
            }
        }

        report.exports = export_lines(&self.config.home_var, &target);

        if let Some(rc_path) = &self.options.persist_to {
            let persisted = persist_exports(rc_path, &report.exports);
            self.settle(&mut report, Step::PersistExports, persisted)?;
        }

        Ok(report)
    }

    /// Records the outcome of a step and applies the failure policy.
    ///
    /// # Returns
    /// * `Ok(Some(value))` when the step succeeded.
    /// * `Ok(None)` when it failed under best-effort.
    /// * `Err(error)` when it failed under fail-fast.
    fn settle<T>(
        &self,
        report: &mut InstallReport,
        step: Step,
        result: SetupResult<T>,
    ) -> SetupResult<Option<T>> {
        match result {
            Ok(value) => {
                report.record(step, StepOutcome::Done);
                Ok(Some(value))
            }
            Err(e) => {
                report.record(step.clone(), StepOutcome::Failed(e.to_string()));
                match self.config.policy {
                    FailurePolicy::BestEffort => {
                        log_warn!("[SUMO::Install] Step '{}' failed, continuing: {}", step, e);
                        Ok(None)
                    }
                    FailurePolicy::FailFast => {
                        log_debug!("[SUMO::Install] Step '{}' failed, stopping", step);
                        Err(e)
                    }
                }
            }
        }
    }
}
