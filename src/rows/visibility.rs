//! Source classification and visibility filtering
//!
//! Splits the raw catalog into per-repository buckets after applying the
//! user's visibility settings, and records which ids and versions were seen
//! along the way so installed packages can be checked against them later.

use crate::config::{RepositoryVisibility, UserRepository};
use crate::package::{CatalogPackage, PackageSource, CURATED_REPOSITORY, OFFICIAL_REPOSITORY};
use semver::Version;
use std::collections::{BTreeMap, HashSet};

/// Result of filtering the catalog against the visibility settings
pub(crate) struct VisibleCatalog<'a> {
    /// `(id, version)` pairs withdrawn by their repository
    pub yanked: HashSet<(&'a str, &'a Version)>,
    /// Ids with at least one listed, non-yanked version, whether or not its repository is hidden
    pub known: HashSet<&'a str>,
    pub buckets: RepositoryBuckets<'a>,
}

/// Visible packages grouped by the source that listed them
#[derive(Default)]
pub(crate) struct RepositoryBuckets<'a> {
    remote: BTreeMap<&'a str, Vec<&'a CatalogPackage>>,
    local_user: Vec<&'a CatalogPackage>,
}

impl<'a> VisibleCatalog<'a> {
    pub fn classify(packages: &'a [CatalogPackage], visibility: &RepositoryVisibility) -> Self {
        let mut yanked = HashSet::new();
        let mut known = HashSet::new();
        let mut buckets = RepositoryBuckets::default();
        let mut hidden = 0usize;

        for pkg in packages {
            let manifest = &pkg.manifest;

            if !visibility.show_prerelease_packages && manifest.is_prerelease() {
                continue;
            }

            if manifest.yanked {
                yanked.insert((manifest.id.as_str(), &manifest.version));
                continue;
            }

            known.insert(manifest.id.as_str());

            match &pkg.source {
                PackageSource::LocalUser => {
                    if visibility.hide_local_user_packages {
                        hidden += 1;
                        continue;
                    }
                    buckets.local_user.push(pkg);
                }
                PackageSource::Remote(remote) => {
                    if visibility.is_repository_hidden(&remote.id) {
                        hidden += 1;
                        continue;
                    }
                    buckets.remote.entry(remote.id.as_str()).or_default().push(pkg);
                }
            }
        }

        tracing::debug!(
            total = packages.len(),
            yanked = yanked.len(),
            hidden,
            repositories = buckets.remote.len(),
            local_user = buckets.local_user.len(),
            "classified catalog packages"
        );

        Self {
            yanked,
            known,
            buckets,
        }
    }
}

impl<'a> RepositoryBuckets<'a> {
    /// Flatten the buckets in the order that decides display-metadata ties:
    /// official, curated, local user, the user's repositories in their
    /// configured order, then repositories that are no longer configured
    /// (by ascending id).
    pub fn into_ordered(mut self, repositories: &[UserRepository]) -> Vec<&'a CatalogPackage> {
        let mut ordered = Vec::new();

        for predefined in [OFFICIAL_REPOSITORY, CURATED_REPOSITORY] {
            if let Some(packages) = self.remote.remove(predefined) {
                ordered.extend(packages);
            }
        }

        ordered.append(&mut self.local_user);

        for repository in repositories {
            if let Some(packages) = self.remote.remove(repository.id.as_str()) {
                ordered.extend(packages);
            }
        }

        if !self.remote.is_empty() {
            tracing::debug!(
                unconfigured = ?self.remote.keys().collect::<Vec<_>>(),
                "packages from repositories that are not configured"
            );
        }

        for packages in self.remote.into_values() {
            ordered.extend(packages);
        }

        ordered
    }
}
