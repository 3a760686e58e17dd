//! File system helpers for networks, profiles, and result tables.

use super::{Network, Profile};

use itertools::Itertools;
use serde::Serialize;

use std::io::prelude::*;
use std::path::{Path, PathBuf};

/// Read a network record from a JSON file.
pub fn read_network_from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Network> {
    let content = std::fs::read_to_string(&path)?;
    let network: Network = serde_json::from_str(&content)?;
    Ok(network)
}

/// Read a load profile from a JSON file.
pub fn read_profile_from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Profile> {
    let content = std::fs::read_to_string(&path)?;
    let profile: Profile = serde_json::from_str(&content)?;
    Ok(profile)
}

/// Convert a table name to a sanitized JSON filename.
pub fn name_to_json(name: &str) -> String {
    let name = name.split_whitespace().join("-");
    let name = name + ".json";
    sanitize_filename::sanitize(name)
}

/// Save a serializable result table under `dir` as human-readable (pretty)
/// JSON, deriving the filename from `name`. Returns the written path.
pub fn save_table<T: Serialize, P: AsRef<Path>>(
    table: &T,
    dir: P,
    name: &str,
) -> std::io::Result<PathBuf> {
    let path = dir.as_ref().join(name_to_json(name));
    let content = serde_json::to_string_pretty(table)?;
    let mut file = std::fs::File::create(&path)?;
    file.write_all(content.as_bytes())?;
    log::info!("Saved table: {}", path.display());
    Ok(path)
}
