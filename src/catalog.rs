//! Catalog snapshots
//!
//! A catalog snapshot is everything the package sources currently list: the
//! union of every configured repository's packages plus the local user
//! packages. Fetching and caching the repositories happens elsewhere; this
//! module only reads the already-materialized snapshot from disk.
//!
//! The file is a JSON array of [`CatalogPackage`] entries.

use crate::package::CatalogPackage;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Every package version listed by every source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogSnapshot {
    pub packages: Vec<CatalogPackage>,
}

impl CatalogSnapshot {
    pub fn new(packages: Vec<CatalogPackage>) -> Self {
        Self { packages }
    }

    /// Load a catalog snapshot from a JSON file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::InvalidSnapshot(format!(
                "catalog snapshot '{}' does not exist",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        let snapshot: CatalogSnapshot = serde_json::from_str(&contents)?;

        tracing::debug!(
            path = %path.display(),
            packages = snapshot.packages.len(),
            "loaded catalog snapshot"
        );

        Ok(snapshot)
    }

    /// Save the snapshot as pretty-printed JSON
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    pub fn packages(&self) -> &[CatalogPackage] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
