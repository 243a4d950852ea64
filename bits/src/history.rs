//! Locations of per-user files, following the XDG base directory layout.
use anyhow::{anyhow, Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};


/// The directory named by `var`, or `$HOME/<fallback>` when `var` is unset
/// or empty.
pub fn base_dir(var: &str, fallback: &str) -> Result<PathBuf> {
    resolve_base_dir(std::env::var_os(var), std::env::var_os("HOME"), fallback)
        .ok_or_else(|| anyhow!("neither {} nor HOME is set", var))
}

fn resolve_base_dir(
    xdg: Option<OsString>,
    home: Option<OsString>,
    fallback: &str,
) -> Option<PathBuf> {
    match xdg {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home
            .filter(|h| !h.is_empty())
            .map(|h| Path::new(&h).join(fallback)),
    }
}

/// The interactive history file, `$XDG_STATE_HOME/bits/history` unless
/// overridden. Its directory is created if needed.
pub fn history_file(override_path: Option<&Path>) -> Result<PathBuf> {
    let file = match override_path {
        Some(path) => path.to_path_buf(),
        None => base_dir("XDG_STATE_HOME", ".local/state")?
            .join("bits")
            .join("history"),
    };
    if let Some(dir) = file.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    Ok(file)
}
