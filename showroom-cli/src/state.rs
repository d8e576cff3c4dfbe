//! `~/.showroom` home-directory helpers and the persisted CLI profile.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub fn showroom_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".showroom"))
}

pub fn ensure_showroom_home() -> Result<PathBuf> {
    let dir = showroom_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Session defaults persisted across runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Profile {
    pub created_at_utc: Option<String>,
    /// Email to start chat sessions logged in as, unless --login overrides.
    #[serde(default)]
    pub email: Option<String>,
    /// Inventory JSON to load by default, unless --inventory overrides.
    #[serde(default)]
    pub inventory_file: Option<String>,
}

pub fn profile_path() -> Result<PathBuf> {
    Ok(ensure_showroom_home()?.join("profile.json"))
}

pub fn read_profile() -> Result<Profile> {
    let path = profile_path()?;
    if !path.exists() {
        return Ok(Profile::default());
    }
    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let profile = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(profile)
}

pub fn write_profile(profile: &Profile) -> Result<()> {
    let path = profile_path()?;
    let json = serde_json::to_string_pretty(profile)?;
    fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
