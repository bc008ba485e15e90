// `setup-sumo env` prints the export lines alone, so they can be evaluated
// directly: `eval "$(setup-sumo env)"`.

use crate::libs::config_loading;
use crate::libs::host::HostEnvironment;
use crate::libs::paths::{ConfigSource, resolve_config_source, resolve_target_dir};
use crate::libs::shell_configurator::export_lines;
use crate::schemas::setup_config::Profile;

pub fn run(config: Option<String>, profile: Option<Profile>) -> anyhow::Result<()> {
    let host = HostEnvironment::from_process()?;
    let source = resolve_config_source(config.as_deref(), profile, &host)?;
    for line in render(&source, &host)? {
        println!("{line}");
    }
    Ok(())
}

fn render(source: &ConfigSource, host: &HostEnvironment) -> anyhow::Result<Vec<String>> {
    let config = config_loading::load(source)?;
    let target = resolve_target_dir(&config.target_dir, host)?;
    Ok(export_lines(&config.home_var, &target))
}
