// Register application subcommands.
// Each module corresponds to a specific `setup-sumo` command-line action.

// Prints the shell exports for the configured target directory.
pub mod env;
// Writes a built-in profile to a configuration file.
pub mod generate;
// Installs dependencies and SUMO binaries (the default command).
pub mod install;
