// Core building blocks of an installation run.

pub mod config_loading;
pub mod host;
pub mod orchestrator;
pub mod paths;
pub mod process;
pub mod shell_configurator;
pub mod utilities;
