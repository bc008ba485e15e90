// `setup-sumo generate` writes a built-in profile out as a YAML file the user
// can then edit (different mirror, extra packages, another target directory).

use crate::libs::host::HostEnvironment;
use crate::libs::utilities::path_helpers::expand_with_home;
use crate::log_info;
use crate::schemas::setup_config::Profile;
use anyhow::{Context, bail};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_OUTPUT: &str = "~/.setup-sumo/config.yaml";

pub fn run(profile: Option<Profile>, output: Option<String>, force: bool) -> anyhow::Result<()> {
    let profile = profile.unwrap_or_else(Profile::for_host);
    let yaml = render(profile)?;

    if output.as_deref() == Some("-") {
        print!("{yaml}");
        return Ok(());
    }

    let host = HostEnvironment::from_process()?;
    let path = expand_with_home(output.as_deref().unwrap_or(DEFAULT_OUTPUT), &host.home)?;
    let written = write_config(&path, &yaml, force)?;
    log_info!(
        "Wrote {:?} profile to {}",
        profile,
        written.display().to_string().green()
    );
    Ok(())
}

fn render(profile: Profile) -> anyhow::Result<String> {
    serde_yaml::to_string(&profile.config()).context("serializing configuration")
}

fn write_config(path: &Path, yaml: &str, force: bool) -> anyhow::Result<PathBuf> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, yaml).with_context(|| format!("writing {}", path.display()))?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::config_loading::load_config;
    use tempfile::TempDir;

    #[test]
    fn generated_file_loads_back_as_the_profile() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.yaml");

        write_config(&path, &render(Profile::Macos).unwrap(), false).unwrap();

        assert_eq!(load_config(&path).unwrap(), Profile::Macos.config());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "keep me").unwrap();

        assert!(write_config(&path, "new", false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

        write_config(&path, "new", true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
