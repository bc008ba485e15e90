// Resolves where the configuration comes from and where the binaries go.

use crate::errors::{SetupError, SetupResult};
use crate::libs::host::HostEnvironment;
use crate::libs::utilities::path_helpers::expand_with_home;
use crate::log_debug;
use crate::schemas::setup_config::Profile;
use colored::Colorize;
use std::path::{Component, Path, PathBuf};

/// Config file picked up when neither `--config` nor `--profile` is given.
const DEFAULT_CONFIG_PATH: &str = "~/.setup-sumo/config.yaml";

/// Where the configuration of a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Profile(Profile),
}

/// `--config` wins, then `--profile`, then `~/.setup-sumo/config.yaml` if it
/// exists, then the profile for the build platform.
pub fn resolve_config_source(
    config_path: Option<&str>,
    profile: Option<Profile>,
    host: &HostEnvironment,
) -> SetupResult<ConfigSource> {
    if let Some(path) = config_path {
        return Ok(ConfigSource::File(expand_with_home(path, &host.home)?));
    }
    if let Some(profile) = profile {
        return Ok(ConfigSource::Profile(profile));
    }

    let default_file = expand_with_home(DEFAULT_CONFIG_PATH, &host.home)?;
    if default_file.is_file() {
        log_debug!(
            "[SUMO::Paths] Using default config file {}",
            default_file.display().to_string().cyan()
        );
        return Ok(ConfigSource::File(default_file));
    }
    Ok(ConfigSource::Profile(Profile::for_host()))
}

/// Turns the configured target directory into an absolute path.
///
/// The home directory itself and its ancestors are refused: the target gets
/// cleaned and recursively marked executable.
pub fn resolve_target_dir(raw: &str, host: &HostEnvironment) -> SetupResult<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SetupError::Config("target_dir is empty".to_string()));
    }

    let resolved = normalize(&expand_with_home(trimmed, &host.home)?);
    if !resolved.is_absolute() {
        return Err(SetupError::Config(format!(
            "target_dir '{}' does not resolve to an absolute path",
            resolved.display()
        )));
    }
    if normalize(&host.home).starts_with(&resolved) {
        return Err(SetupError::Config(format!(
            "target_dir '{}' would cover the home directory {}",
            resolved.display(),
            host.home.display()
        )));
    }

    log_debug!(
        "[SUMO::Paths] Target directory resolved to {}",
        resolved.display().to_string().cyan()
    );
    Ok(resolved)
}

/// Drops `.` and folds `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn host_at(home: &std::path::Path) -> HostEnvironment {
        HostEnvironment::new(home, None)
    }

    #[test]
    fn target_dir_follows_the_home_directory() {
        let host = host_at(std::path::Path::new("/home/bob"));
        assert_eq!(
            resolve_target_dir("~/sumo_binaries/bin", &host).unwrap(),
            PathBuf::from("/home/bob/sumo_binaries/bin")
        );
    }

    #[test]
    fn relative_and_empty_targets_are_rejected() {
        let host = host_at(std::path::Path::new("/home/bob"));
        assert!(matches!(
            resolve_target_dir("sumo/bin", &host),
            Err(SetupError::Config(_))
        ));
        assert!(matches!(
            resolve_target_dir("  ", &host),
            Err(SetupError::Config(_))
        ));
    }

    #[test]
    fn home_and_its_ancestors_are_rejected() {
        let host = host_at(std::path::Path::new("/home/bob"));
        for raw in ["~", "~/", "$HOME", "/home", "/", "~/sumo/../..", "/home/bob/."] {
            assert!(
                matches!(resolve_target_dir(raw, &host), Err(SetupError::Config(_))),
                "{raw} should be rejected"
            );
        }
        assert_eq!(
            resolve_target_dir("~/sumo/../bin", &host).unwrap(),
            PathBuf::from("/home/bob/bin")
        );
        assert_eq!(
            resolve_target_dir("/opt/sumo", &host).unwrap(),
            PathBuf::from("/opt/sumo")
        );
    }

    #[test]
    fn explicit_choices_take_precedence() {
        let home = TempDir::new().unwrap();
        let host = host_at(home.path());

        let source = resolve_config_source(Some("~/custom.yaml"), Some(Profile::Macos), &host).unwrap();
        assert_eq!(source, ConfigSource::File(home.path().join("custom.yaml")));

        let source = resolve_config_source(None, Some(Profile::Ubuntu), &host).unwrap();
        assert_eq!(source, ConfigSource::Profile(Profile::Ubuntu));
    }

    #[test]
    fn default_file_is_used_when_present() {
        let home = TempDir::new().unwrap();
        let host = host_at(home.path());

        assert_eq!(
            resolve_config_source(None, None, &host).unwrap(),
            ConfigSource::Profile(Profile::for_host())
        );

        let dir = home.path().join(".setup-sumo");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yaml"), "").unwrap();
        assert_eq!(
            resolve_config_source(None, None, &host).unwrap(),
            ConfigSource::File(dir.join("config.yaml"))
        );
    }
}
