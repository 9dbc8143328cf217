//! Package manifest and catalog entry types
//!
//! A [`PackageManifest`] is the `package.json` of one VPM package version, as
//! published by a repository or as found in a project's `Packages/` folder.
//! A [`CatalogPackage`] pairs a manifest with the [`PackageSource`] it was
//! listed in.
//!
//! # Examples
//!
//! ```
//! use vpm_catalog::{CatalogPackage, PackageSource};
//!
//! let json = r#"{
//!     "name": "com.vrchat.avatars",
//!     "version": "3.7.0",
//!     "displayName": "VRChat SDK - Avatars",
//!     "unity": "2022.3",
//!     "vpmDependencies": { "com.vrchat.base": "3.7.0" },
//!     "source": { "remote": { "id": "com.vrchat.repos.official", "displayName": "Official" } }
//! }"#;
//!
//! let pkg: CatalogPackage = serde_json::from_str(json).unwrap();
//! assert_eq!(pkg.manifest.id, "com.vrchat.avatars");
//! assert_eq!(pkg.source.display_name(), "Official");
//! ```

use crate::version::{is_stable, UnityVersion};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Repository id of the official VRChat repository
pub const OFFICIAL_REPOSITORY: &str = "com.vrchat.repos.official";

/// Repository id of the curated VRChat repository
pub const CURATED_REPOSITORY: &str = "com.vrchat.repos.curated";

/// Source name shown for packages added from the local user package folder
pub const LOCAL_USER_SOURCE_NAME: &str = "User";

/// Manifest of a single package version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Package id (e.g., `com.vrchat.avatars`)
    #[serde(rename = "name")]
    pub id: String,
    pub version: Version,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Minimum Unity editor line this version supports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unity: Option<UnityVersion>,
    /// Dependency id -> version range
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vpm_dependencies: BTreeMap<String, String>,
    /// Ids of packages this package supersedes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legacy_packages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub yanked: bool,
}

impl PackageManifest {
    /// Create a bare manifest with only an id and a version
    pub fn new(id: impl Into<String>, version: Version) -> Self {
        Self {
            id: id.into(),
            version,
            display_name: None,
            description: None,
            aliases: Vec::new(),
            unity: None,
            vpm_dependencies: BTreeMap::new(),
            legacy_packages: Vec::new(),
            changelog_url: None,
            documentation_url: None,
            yanked: false,
        }
    }

    /// Display name, falling back to the package id
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    pub fn is_prerelease(&self) -> bool {
        !is_stable(&self.version)
    }

    /// Ids of the packages this version depends on
    pub fn dependency_ids(&self) -> impl Iterator<Item = &str> {
        self.vpm_dependencies.keys().map(String::as_str)
    }
}

/// Remote repository a package was listed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSource {
    pub id: String,
    pub display_name: String,
}

/// Where a catalog entry came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PackageSource {
    /// User package folder on the local machine
    LocalUser,
    /// A remote repository listing
    Remote(RemoteSource),
}

impl PackageSource {
    pub fn remote(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        PackageSource::Remote(RemoteSource {
            id: id.into(),
            display_name: display_name.into(),
        })
    }

    /// Name shown to users in source lists
    pub fn display_name(&self) -> &str {
        match self {
            PackageSource::LocalUser => LOCAL_USER_SOURCE_NAME,
            PackageSource::Remote(remote) => &remote.display_name,
        }
    }
}

/// A package version as listed by one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPackage {
    #[serde(flatten)]
    pub manifest: PackageManifest,
    pub source: PackageSource,
}

impl CatalogPackage {
    pub fn new(manifest: PackageManifest, source: PackageSource) -> Self {
        Self { manifest, source }
    }

    pub fn id(&self) -> &str {
        &self.manifest.id
    }

    pub fn version(&self) -> &Version {
        &self.manifest.version
    }
}
