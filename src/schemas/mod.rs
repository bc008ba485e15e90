// Data structures for configuration files and run reports.

pub mod report;
pub mod setup_config;
