//! Package rows: the reconciled view of catalog and project
//!
//! [`combine_packages_and_project_details`] merges every source's package
//! listings with a project's installed packages into one [`PackageRow`] per
//! package id. It runs in stages:
//!
//! 1. filter the catalog by visibility and group it by source ([`visibility`])
//! 2. aggregate versions into rows, split by Unity compatibility
//! 3. compute latest / stable latest and overlay the installed state
//! 4. drop the SDK lineage the project does not use, and legacy packages
//! 5. put installed rows first
//!
//! The function is pure: rows borrow from the inputs and nothing is kept
//! between calls.
//!
//! # Examples
//!
//! ```
//! use semver::Version;
//! use vpm_catalog::{
//!     combine_packages_and_project_details, CatalogPackage, LatestStatus, PackageManifest,
//!     PackageSource, ProjectSnapshot, RepositoryVisibility,
//! };
//!
//! let official = PackageSource::remote("com.vrchat.repos.official", "Official");
//! let catalog = vec![
//!     CatalogPackage::new(PackageManifest::new("a", Version::new(1, 0, 0)), official.clone()),
//!     CatalogPackage::new(PackageManifest::new("a", Version::new(1, 1, 0)), official),
//! ];
//! let installed = vec![PackageManifest::new("a", Version::new(1, 0, 0))];
//! let project = ProjectSnapshot::new(None, installed).unwrap();
//!
//! let rows = combine_packages_and_project_details(
//!     &catalog,
//!     Some(&project),
//!     &RepositoryVisibility::default(),
//!     &[],
//! );
//!
//! assert_eq!(rows.len(), 1);
//! assert!(matches!(rows[0].latest, LatestStatus::Upgradable(_)));
//! ```

mod builder;
mod prune;
mod visibility;

pub use prune::{AVATARS_SDK, WORLDS_SDK};

use crate::config::{RepositoryVisibility, UserRepository};
use crate::package::{CatalogPackage, PackageManifest};
use crate::project::ProjectSnapshot;
use builder::RowTable;
use semver::Version;
use std::collections::BTreeSet;
use visibility::VisibleCatalog;

/// Where a changelog or documentation URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlProvenance<'a> {
    /// The installed package's manifest; always wins
    Installed,
    /// A catalog listing of this version
    Catalog(&'a Version),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedUrl<'a> {
    pub url: &'a str,
    pub provenance: UrlProvenance<'a>,
}

/// The version a project currently has
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstalledPackage<'a> {
    pub pkg: &'a PackageManifest,
    /// Marked yanked in the installed manifest or by its repository
    pub yanked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestPackage<'a> {
    pub pkg: &'a CatalogPackage,
    /// A Unity-incompatible version newer than `pkg` exists
    pub has_unity_incompatible_latest: bool,
}

/// Newest usable version of a package relative to what is installed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LatestStatus<'a> {
    /// No Unity-compatible version is listed
    None,
    /// Latest version known; not newer than the installed one, or nothing installed
    Contains(LatestPackage<'a>),
    /// Latest version is newer than the installed one
    Upgradable(LatestPackage<'a>),
}

impl<'a> LatestStatus<'a> {
    pub fn package(&self) -> Option<&'a CatalogPackage> {
        match self {
            LatestStatus::None => None,
            LatestStatus::Contains(latest) | LatestStatus::Upgradable(latest) => Some(latest.pkg),
        }
    }

    pub fn version(&self) -> Option<&'a Version> {
        self.package().map(CatalogPackage::version)
    }

    pub fn is_upgradable(&self) -> bool {
        matches!(self, LatestStatus::Upgradable(_))
    }

    pub fn has_unity_incompatible_latest(&self) -> bool {
        match self {
            LatestStatus::None => false,
            LatestStatus::Contains(latest) | LatestStatus::Upgradable(latest) => {
                latest.has_unity_incompatible_latest
            }
        }
    }
}

/// Everything known about one package id
#[derive(Debug, Clone)]
pub struct PackageRow<'a> {
    pub id: &'a str,
    /// Version the display metadata below was taken from
    pub info_source: &'a Version,
    pub display_name: &'a str,
    pub aliases: Vec<&'a str>,
    pub description: Option<&'a str>,
    /// Unity-compatible versions, newest first
    pub unity_compatible: Vec<&'a CatalogPackage>,
    /// Unity-incompatible versions, newest first
    pub unity_incompatible: Vec<&'a CatalogPackage>,
    /// Display names of the sources listing this package
    pub sources: BTreeSet<&'a str>,
    /// Some source lists a non-yanked version of this package
    pub is_there_source: bool,
    pub installed: Option<InstalledPackage<'a>>,
    pub latest: LatestStatus<'a>,
    pub stable_latest: LatestStatus<'a>,
    pub changelog_url: Option<TrackedUrl<'a>>,
    pub documentation_url: Option<TrackedUrl<'a>>,
}

impl<'a> PackageRow<'a> {
    pub fn is_installed(&self) -> bool {
        self.installed.is_some()
    }

    pub fn installed_version(&self) -> Option<&'a Version> {
        self.installed.map(|installed| &installed.pkg.version)
    }

    /// Latest status, restricted to stable versions when `stable` is set
    pub fn latest_for(&self, stable: bool) -> LatestStatus<'a> {
        if stable {
            self.stable_latest
        } else {
            self.latest
        }
    }

    /// Case-insensitive match on id, display name, or any alias
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        std::iter::once(self.id)
            .chain(std::iter::once(self.display_name))
            .chain(self.aliases.iter().copied())
            .any(|text| text.to_lowercase().contains(&query))
    }
}

/// Build the package rows for a catalog and an optional project.
///
/// * `packages` - every listing from every source, yanked and prerelease included
/// * `project` - installed state, if a project is open
/// * `visibility` - hidden repositories, local user packages, prereleases
/// * `repositories` - user-configured repositories in display order
pub fn combine_packages_and_project_details<'a>(
    packages: &'a [CatalogPackage],
    project: Option<&'a ProjectSnapshot>,
    visibility: &RepositoryVisibility,
    repositories: &[UserRepository],
) -> Vec<PackageRow<'a>> {
    let VisibleCatalog {
        yanked,
        known,
        buckets,
    } = VisibleCatalog::classify(packages, visibility);

    let project_unity = project.and_then(|p| p.unity);

    let mut table = RowTable::default();
    for pkg in buckets.into_ordered(repositories) {
        table.add_catalog_package(pkg, project_unity);
    }
    table.compute_latest();

    if let Some(project) = project {
        for installed in project.installed_packages() {
            table.apply_installed(installed, &yanked, &known);
        }
    }

    let rows_before_pruning = table.len();
    let pruned = prune::remove_unused_sdk_lineage(&mut table);
    let legacy = match project {
        Some(project) => prune::remove_legacy_packages(&mut table, project),
        None => Vec::new(),
    };

    tracing::debug!(
        rows = rows_before_pruning,
        pruned = pruned.len(),
        legacy = legacy.len(),
        "combined packages and project details"
    );

    prune::installed_first(table.into_rows())
}

/// Rows matching a search query; an empty query matches everything
pub fn filter_rows<'r, 'a>(rows: &'r [PackageRow<'a>], query: &str) -> Vec<&'r PackageRow<'a>> {
    let query = query.trim();
    rows.iter()
        .filter(|row| query.is_empty() || row.matches_query(query))
        .collect()
}
