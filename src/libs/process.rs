// Runs external programs (the package manager and its privilege wrapper).
//
// The installer only talks to processes through `CommandRunner`, so tests can
// record invocations instead of mutating the host's package set.

use crate::log_debug;
use std::io;
use std::path::Path;
use std::process::Command;

/// Exit information of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutcome {
    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "termination by signal".to_string(),
        }
    }
}

pub trait CommandRunner {
    /// Runs `program args...` to completion. `Err` means the process could
    /// not be started at all.
    fn run(&self, program: &Path, args: &[String]) -> io::Result<CommandOutcome>;
}

/// Spawns real processes. Output is inherited so the package manager's own
/// diagnostics reach the console unchanged.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<CommandOutcome> {
        log_debug!(
            "[SUMO::Process] Executing: {} {}",
            program.display(),
            args.join(" ")
        );
        let status = Command::new(program).args(args).status()?;
        Ok(CommandOutcome {
            success: status.success(),
            code: status.code(),
        })
    }
}
