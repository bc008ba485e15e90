use crate::errors::{SetupError, SetupResult};
use crate::libs::paths::ConfigSource;
use crate::libs::utilities::assets::{ArchiveKind, archive_file_name};
use crate::schemas::setup_config::SetupConfig;
use crate::{log_debug, log_info};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Produces the validated configuration for a run.
pub fn load(source: &ConfigSource) -> SetupResult<SetupConfig> {
    let config = match source {
        ConfigSource::File(path) => load_config(path)?,
        ConfigSource::Profile(profile) => {
            log_info!(
                "[SUMO::Config] Using built-in profile: {}",
                format!("{profile:?}").to_lowercase().cyan()
            );
            profile.config()
        }
    };
    validate(&config)?;

    match serde_json::to_string_pretty(&config) {
        Ok(pretty) => log_debug!("[SUMO::Config] Effective configuration:\n{}", pretty),
        Err(_) => log_debug!("[SUMO::Config] Effective configuration: {:#?}", config),
    }
    Ok(config)
}

/// Reads a YAML configuration file.
pub fn load_config(path: &Path) -> SetupResult<SetupConfig> {
    log_info!(
        "[SUMO::Config] Using configuration file: {}",
        path.display().to_string().cyan()
    );
    let contents = fs::read_to_string(path).map_err(|e| {
        SetupError::Config(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_yaml::from_str(&contents).map_err(|e| {
        SetupError::Config(format!(
            "{} is not a valid setup-sumo configuration: {e}",
            path.display()
        ))
    })
}

/// Rejects configurations that cannot possibly complete a run.
pub fn validate(config: &SetupConfig) -> SetupResult<()> {
    let program = &config.package_manager.program;
    if program.trim().is_empty() {
        return Err(SetupError::Config(
            "package_manager.program is empty".to_string(),
        ));
    }
    if program.trim() != program {
        return Err(SetupError::Config(format!(
            "package_manager.program has surrounding whitespace: '{program}'"
        )));
    }

    if let Some(position) = config.dependencies.iter().position(|d| d.trim().is_empty()) {
        return Err(SetupError::Config(format!(
            "dependency #{} has an empty name",
            position + 1
        )));
    }

    let url = config.archive_url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(SetupError::Config(format!(
            "archive_url must start with http:// or https://: '{url}'"
        )));
    }
    if url.contains(' ') {
        return Err(SetupError::Config(format!(
            "archive_url contains spaces: '{url}'"
        )));
    }
    let file_name = archive_file_name(url)
        .ok_or_else(|| SetupError::Config(format!("archive_url has no file name: '{url}'")))?;
    ArchiveKind::from_file_name(&file_name)?;

    if config.home_var.trim().is_empty() {
        return Err(SetupError::Config("home_var is empty".to_string()));
    }
    Ok(())
}
