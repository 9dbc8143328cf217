//! Project snapshots
//!
//! The installed-package state of one Unity project: which editor line it
//! uses and which package manifests sit in its `Packages/` folder.
//!
//! # Examples
//!
//! ```
//! use vpm_catalog::ProjectSnapshot;
//!
//! let json = r#"{
//!     "unity": "2022.3.22f1",
//!     "packages": [ { "name": "com.vrchat.avatars", "version": "3.7.0" } ]
//! }"#;
//!
//! let project = ProjectSnapshot::from_json(json).unwrap();
//! assert!(project.is_installed("com.vrchat.avatars"));
//! ```

use crate::package::PackageManifest;
use crate::version::UnityVersion;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Installed state of a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Editor line of the project, if known
    #[serde(default)]
    pub unity: Option<UnityVersion>,

    /// Installed package manifests, one per package id
    #[serde(default)]
    pub packages: Vec<PackageManifest>,
}

impl ProjectSnapshot {
    /// Build a snapshot from installed manifests; package ids must be unique
    pub fn new(unity: Option<UnityVersion>, packages: Vec<PackageManifest>) -> Result<Self> {
        let snapshot = Self { unity, packages };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Parse a project snapshot and check that package ids are unique
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: ProjectSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Load a project snapshot from a JSON file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::InvalidSnapshot(format!(
                "project snapshot '{}' does not exist",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&contents)?;

        tracing::debug!(
            path = %path.display(),
            unity = ?snapshot.unity,
            installed = snapshot.packages.len(),
            "loaded project snapshot"
        );

        Ok(snapshot)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for package in &self.packages {
            if !seen.insert(package.id.as_str()) {
                return Err(Error::InvalidSnapshot(format!(
                    "package '{}' is installed more than once",
                    package.id
                )));
            }
        }
        Ok(())
    }

    pub fn installed_packages(&self) -> &[PackageManifest] {
        &self.packages
    }

    /// Get an installed package by id
    pub fn get_package(&self, id: &str) -> Option<&PackageManifest> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn is_installed(&self, id: &str) -> bool {
        self.get_package(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;
    use tempfile::TempDir;

    #[test]
    fn test_parse_project() {
        let project = ProjectSnapshot::from_json(
            r#"{
                "unity": "2019.4.31f1",
                "packages": [
                    {
                        "name": "com.vrchat.worlds",
                        "version": "3.4.0",
                        "legacyPackages": ["com.old.thing"]
                    },
                    { "name": "com.example.tool", "version": "1.0.0", "yanked": true }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(project.unity, Some(UnityVersion::new(2019, 4)));
        assert_eq!(project.installed_packages().len(), 2);
        assert!(project.get_package("com.example.tool").unwrap().yanked);
        assert!(!project.is_installed("com.vrchat.avatars"));
    }

    #[test]
    fn test_parse_project_without_unity() {
        let project = ProjectSnapshot::from_json(r#"{ "unity": null, "packages": [] }"#).unwrap();
        assert!(project.unity.is_none());
        assert!(project.packages.is_empty());

        let project = ProjectSnapshot::from_json("{}").unwrap();
        assert!(project.unity.is_none());
    }

    #[test]
    fn test_duplicate_installed_package_rejected() {
        let err = ProjectSnapshot::from_json(
            r#"{ "packages": [
                { "name": "com.example.tool", "version": "1.0.0" },
                { "name": "com.example.tool", "version": "1.1.0" }
            ] }"#,
        )
        .unwrap_err();

        assert!(matches!(err, Error::InvalidSnapshot(_)));
        assert!(err.to_string().contains("installed more than once"));
    }

    #[test]
    fn test_new_rejects_duplicate_installed_package() {
        let tool = |version| PackageManifest::new("com.example.tool", Version::new(1, version, 0));

        let err = ProjectSnapshot::new(None, vec![tool(0), tool(1)]).unwrap_err();
        assert!(matches!(err, Error::InvalidSnapshot(_)));

        let project = ProjectSnapshot::new(None, vec![tool(1)]).unwrap();
        assert!(project.is_installed("com.example.tool"));
    }

    #[test]
    fn test_invalid_unity_rejected() {
        let err = ProjectSnapshot::from_json(r#"{ "unity": "latest" }"#).unwrap_err();
        assert!(err.to_string().contains("latest"));
    }

    #[test]
    fn test_invalid_package_version_is_json_error() {
        let err = ProjectSnapshot::from_json(
            r#"{ "packages": [ { "name": "com.example.tool", "version": "one" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("project.json");
        fs::write(&path, r#"{ "unity": "2022.3", "packages": [] }"#).unwrap();

        let project = ProjectSnapshot::load_from(&path).unwrap();
        assert_eq!(project.unity, Some(UnityVersion::new(2022, 3)));

        let missing = ProjectSnapshot::load_from(temp_dir.path().join("nope.json"));
        assert!(missing.is_err());
    }
}
