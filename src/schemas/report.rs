// Records what each installation step did, so that a best-effort run can tell
// the user which steps failed instead of finishing silently.

use std::fmt;

/// The installation steps, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    CheckPackageManager,
    UpdatePackageIndex,
    InstallDependency(String),
    CreateTargetDir,
    Download,
    Extract,
    RemoveArchive,
    MarkExecutable,
    PersistExports,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::CheckPackageManager => write!(f, "check package manager"),
            Step::UpdatePackageIndex => write!(f, "update package index"),
            Step::InstallDependency(name) => write!(f, "install {name}"),
            Step::CreateTargetDir => write!(f, "create target directory"),
            Step::Download => write!(f, "download archive"),
            Step::Extract => write!(f, "extract archive"),
            Step::RemoveArchive => write!(f, "remove archive"),
            Step::MarkExecutable => write!(f, "mark binaries executable"),
            Step::PersistExports => write!(f, "persist exports"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Result of a run that reached the end, possibly with failed steps.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub steps: Vec<StepRecord>,
    /// The two `export` lines for the user's shell profile.
    pub exports: Vec<String>,
}

impl InstallReport {
    pub fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.steps.push(StepRecord { step, outcome });
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps
            .iter()
            .filter(|r| matches!(r.outcome, StepOutcome::Failed(_)))
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}
