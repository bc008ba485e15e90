use crate::errors::{SetupError, SetupResult};
use std::convert::Infallible;
use std::path::{Path, PathBuf};

/// Expands a leading `~` and `$HOME` / `${HOME}` against the given home
/// directory. Other variables are left as written; the process environment
/// is never consulted.
pub fn expand_with_home(raw: &str, home: &Path) -> SetupResult<PathBuf> {
    let home_str = home.to_string_lossy().into_owned();
    let expanded = shellexpand::full_with_context(
        raw,
        || Some(home_str.clone()),
        |var: &str| -> Result<Option<String>, Infallible> {
            Ok((var == "HOME").then(|| home_str.clone()))
        },
    )
    .map_err(|e| SetupError::Config(format!("cannot expand '{raw}': {e}")))?;

    Ok(PathBuf::from(expanded.as_ref()))
}
