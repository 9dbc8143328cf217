//! User configuration management
//!
//! This module handles reading and writing the vpm-catalog settings file.
//! Configuration is stored in TOML format at `~/.vpm-catalog/config.toml`.
//!
//! # Examples
//!
//! ```no_run
//! use vpm_catalog::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::load()?;
//!
//! println!("Show prereleases: {}", config.visibility.show_prerelease_packages);
//!
//! config.hide_repository("com.example.repo");
//! config.save()?;
//! # Ok(())
//! # }
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

/// User configuration file (`~/.vpm-catalog/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Which packages show up in package listings
    #[serde(default)]
    pub visibility: RepositoryVisibility,

    /// User-added repositories, in the order the user arranged them
    #[serde(default)]
    pub repositories: Vec<UserRepository>,
}

/// Repository visibility settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryVisibility {
    /// Repository ids whose packages are hidden
    #[serde(default)]
    pub hidden_repositories: BTreeSet<String>,

    /// Hide packages from the local user package folder
    #[serde(default)]
    pub hide_local_user_packages: bool,

    /// List prerelease versions
    #[serde(default)]
    pub show_prerelease_packages: bool,
}

impl RepositoryVisibility {
    pub fn is_repository_hidden(&self, id: &str) -> bool {
        self.hidden_repositories.contains(id)
    }
}

/// A repository the user added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRepository {
    pub id: String,
    pub display_name: String,
}

impl UserRepository {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl Config {
    /// Get the default config file path
    ///
    /// Uses VPM_CATALOG_CONFIG_DIR if set, otherwise ~/.vpm-catalog/config.toml
    pub fn default_path() -> Result<PathBuf> {
        // Check for custom config directory (useful for testing)
        if let Ok(config_dir) = std::env::var("VPM_CATALOG_CONFIG_DIR") {
            return Ok(PathBuf::from(config_dir).join("config.toml"));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| Error::Other("Could not find home directory".to_string()))?;

        Ok(home.join(".vpm-catalog").join("config.toml"))
    }

    /// Load config from file, or return the default if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Hide a repository. Returns false if it was already hidden.
    pub fn hide_repository(&mut self, id: &str) -> bool {
        self.visibility.hidden_repositories.insert(id.to_string())
    }

    /// Unhide a repository. Returns false if it was not hidden.
    pub fn show_repository(&mut self, id: &str) -> bool {
        self.visibility.hidden_repositories.remove(id)
    }

    /// Add a repository at the end, or rename it in place if the id exists
    pub fn add_repository(&mut self, repository: UserRepository) {
        match self.repositories.iter_mut().find(|r| r.id == repository.id) {
            Some(existing) => *existing = repository,
            None => self.repositories.push(repository),
        }
    }

    /// Remove a repository; it is also dropped from the hidden set
    pub fn remove_repository(&mut self, id: &str) -> Result<UserRepository> {
        let position = self
            .repositories
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::RepositoryNotConfigured(id.to_string()))?;

        self.visibility.hidden_repositories.remove(id);
        Ok(self.repositories.remove(position))
    }

    pub fn find_repository(&self, id: &str) -> Option<&UserRepository> {
        self.repositories.iter().find(|r| r.id == id)
    }
}
