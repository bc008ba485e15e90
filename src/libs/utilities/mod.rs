// Low-level helpers shared by the installers.

pub mod assets;
pub mod binary;
pub mod compression;
pub mod path_helpers;
