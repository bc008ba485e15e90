// Defines the configuration consumed by `setup-sumo`: which package manager to
// drive, which packages to install, where the SUMO archive lives and where it
// gets unpacked. Built-in profiles reproduce the stock macOS and Ubuntu setups.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const SUMO_ARCHIVE_BASE: &str = "https://akreidieh.s3.amazonaws.com/sumo/flow-0.4.0";
const DEFAULT_TARGET_DIR: &str = "~/sumo_binaries/bin";

const MACOS_DEPENDENCIES: &[&str] = &[
    // rendering and input libraries
    "swig",
    "sdl",
    "sdl_image",
    "sdl_mixer",
    "sdl_ttf",
    "portmidi",
    // SUMO runtime libraries
    "Caskroom/cask/xquartz",
    "autoconf",
    "automake",
    "pkg-config",
    "libtool",
    "gdal",
    "proj",
    "xerces-c",
    "fox",
];

const UBUNTU_DEPENDENCIES: &[&str] = &[
    "cmake",
    "swig",
    "libgtest-dev",
    "python-pygame",
    "python-scipy",
    "autoconf",
    "libtool",
    "pkg-config",
    "libgdal-dev",
    "libxerces-c-dev",
    "libproj-dev",
    "libfox-1.6-dev",
    "libxml2-dev",
    "libxslt1-dev",
    "build-essential",
    "curl",
    "unzip",
    "flex",
    "bison",
    "python",
    "python-dev",
    "python3-dev",
];

/// What to do when a step after the package manager check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Log the failure and carry on with the next step.
    #[default]
    BestEffort,
    /// Stop at the first failed step.
    FailFast,
}

/// How to talk to the host package manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManagerSpec {
    /// Program name looked up on PATH, e.g. `brew`.
    pub program: String,

    /// Arguments placed before each package name.
    #[serde(default = "default_install_args")]
    pub install_args: Vec<String>,

    /// Arguments that refresh the package index. Only used with `--update`.
    #[serde(default)]
    pub update_args: Option<Vec<String>>,

    /// Privilege wrapper prepended to every invocation, e.g. `sudo`.
    #[serde(default)]
    pub elevate_with: Option<String>,

    /// Shell command shown when `program` is missing.
    #[serde(default)]
    pub install_hint: String,
}

fn default_install_args() -> Vec<String> {
    vec!["install".to_string()]
}

fn default_target_dir() -> String {
    DEFAULT_TARGET_DIR.to_string()
}

fn default_home_var() -> String {
    "SUMO_HOME".to_string()
}

/// The complete description of one installation run.
///
/// ```yaml
/// package_manager:
///   program: brew
///   install_args: [install]
///   update_args: [update]
/// dependencies: [swig, sdl, fox]
/// archive_url: https://example.com/binaries-mac.tar.xz
/// target_dir: ~/sumo_binaries/bin
/// policy: best-effort
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupConfig {
    pub package_manager: PackageManagerSpec,

    /// Installed one at a time, in this order.
    #[serde(default)]
    pub dependencies: Vec<String>,

    pub archive_url: String,

    /// May start with `~` or reference `$HOME`.
    #[serde(default = "default_target_dir")]
    pub target_dir: String,

    /// Name of the exported variable that points at the target directory.
    #[serde(default = "default_home_var")]
    pub home_var: String,

    #[serde(default)]
    pub policy: FailurePolicy,

    /// Empty the target directory before extracting.
    #[serde(default)]
    pub clean_target: bool,
}

/// Built-in configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// Homebrew on macOS.
    Macos,
    /// apt-get on Ubuntu 18.04.
    Ubuntu,
}

impl Profile {
    /// The profile matching the platform this binary was built for.
    pub fn for_host() -> Self {
        if cfg!(target_os = "macos") {
            Profile::Macos
        } else {
            Profile::Ubuntu
        }
    }

    pub fn config(self) -> SetupConfig {
        match self {
            Profile::Macos => SetupConfig {
                package_manager: PackageManagerSpec {
                    program: "brew".to_string(),
                    install_args: default_install_args(),
                    update_args: Some(vec!["update".to_string()]),
                    elevate_with: None,
                    install_hint: "/bin/bash -c \"$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)\"".to_string(),
                },
                dependencies: to_owned_list(MACOS_DEPENDENCIES),
                archive_url: format!("{SUMO_ARCHIVE_BASE}/binaries-mac.tar.xz"),
                target_dir: default_target_dir(),
                home_var: default_home_var(),
                policy: FailurePolicy::BestEffort,
                clean_target: false,
            },
            Profile::Ubuntu => SetupConfig {
                package_manager: PackageManagerSpec {
                    program: "apt-get".to_string(),
                    install_args: vec!["install".to_string(), "-y".to_string()],
                    update_args: Some(vec!["update".to_string()]),
                    elevate_with: Some("sudo".to_string()),
                    install_hint: "sudo apt install --reinstall apt".to_string(),
                },
                dependencies: to_owned_list(UBUNTU_DEPENDENCIES),
                archive_url: format!("{SUMO_ARCHIVE_BASE}/binaries-ubuntu1804.tar.xz"),
                target_dir: default_target_dir(),
                home_var: default_home_var(),
                policy: FailurePolicy::BestEffort,
                clean_target: false,
            },
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
