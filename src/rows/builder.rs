//! Row aggregation
//!
//! Rows live in an arena in creation order and are looked up by package id.
//! Removal only marks a slot dead, so indices stay stable while pruning.

use super::{InstalledPackage, LatestPackage, LatestStatus, PackageRow, TrackedUrl, UrlProvenance};
use crate::compat::is_unity_compatible;
use crate::package::{CatalogPackage, PackageManifest};
use crate::version::{compare_version, is_stable, UnityVersion};
use semver::Version;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

impl<'a> PackageRow<'a> {
    fn from_manifest(manifest: &'a PackageManifest, provenance: UrlProvenance<'a>) -> Self {
        let track = |url: &'a Option<String>| {
            url.as_deref().map(|url| TrackedUrl { url, provenance })
        };

        Self {
            id: &manifest.id,
            info_source: &manifest.version,
            display_name: manifest.display_name(),
            aliases: manifest.aliases.iter().map(String::as_str).collect(),
            description: manifest.description.as_deref().filter(|d| !d.is_empty()),
            unity_compatible: Vec::new(),
            unity_incompatible: Vec::new(),
            sources: BTreeSet::new(),
            is_there_source: false,
            installed: None,
            latest: LatestStatus::None,
            stable_latest: LatestStatus::None,
            changelog_url: track(&manifest.changelog_url),
            documentation_url: track(&manifest.documentation_url),
        }
    }

    /// File a listing under the compatible or incompatible versions. A version
    /// is compatible if any listing of it is; each version appears once.
    fn add_version(&mut self, pkg: &'a CatalogPackage, compatible: bool) {
        let version = pkg.version();
        if self.unity_compatible.iter().any(|p| p.version() == version) {
            return;
        }

        let incompatible = self
            .unity_incompatible
            .iter()
            .position(|p| p.version() == version);

        match (incompatible, compatible) {
            (Some(slot), true) => {
                self.unity_incompatible.remove(slot);
                self.unity_compatible.push(pkg);
            }
            (Some(_), false) => {}
            (None, true) => self.unity_compatible.push(pkg),
            (None, false) => self.unity_incompatible.push(pkg),
        }
    }
}

/// Descending listing order. Build metadata only breaks ties so that
/// distinct listings never compare equal.
fn newest_first(a: &&CatalogPackage, b: &&CatalogPackage) -> Ordering {
    compare_version(b.version(), a.version())
        .then_with(|| b.version().build.cmp(&a.version().build))
}

/// Keep the catalog URL from the highest version; an installed URL is never replaced
fn prefer_catalog_url<'a>(
    current: Option<TrackedUrl<'a>>,
    incoming: Option<&'a str>,
    version: &'a Version,
) -> Option<TrackedUrl<'a>> {
    let Some(url) = incoming else {
        return current;
    };

    match current {
        Some(TrackedUrl {
            provenance: UrlProvenance::Installed,
            ..
        }) => current,
        Some(TrackedUrl {
            provenance: UrlProvenance::Catalog(current_version),
            ..
        }) if compare_version(version, current_version) != Ordering::Greater => current,
        _ => Some(TrackedUrl {
            url,
            provenance: UrlProvenance::Catalog(version),
        }),
    }
}

/// Latest entry of the compatible list, optionally restricted to stable versions
fn find_latest<'a>(
    compatible: &[&'a CatalogPackage],
    incompatible: &[&'a CatalogPackage],
    stable_only: bool,
) -> LatestStatus<'a> {
    let first = |list: &[&'a CatalogPackage]| {
        list.iter()
            .copied()
            .find(|p| !stable_only || is_stable(p.version()))
    };

    let Some(latest) = first(compatible) else {
        return LatestStatus::None;
    };

    let has_unity_incompatible_latest = first(incompatible)
        .is_some_and(|p| compare_version(p.version(), latest.version()) == Ordering::Greater);

    LatestStatus::Contains(LatestPackage {
        pkg: latest,
        has_unity_incompatible_latest,
    })
}

impl<'a> LatestStatus<'a> {
    /// Promote to `Upgradable` when the installed version is older
    fn against_installed(self, installed: &Version) -> Self {
        match self {
            LatestStatus::Contains(latest)
                if compare_version(installed, latest.pkg.version()) == Ordering::Less =>
            {
                LatestStatus::Upgradable(latest)
            }
            other => other,
        }
    }
}

#[derive(Default)]
pub(crate) struct RowTable<'a> {
    rows: Vec<PackageRow<'a>>,
    alive: Vec<bool>,
    index: HashMap<&'a str, usize>,
}

impl<'a> RowTable<'a> {
    fn get_or_insert_with(
        &mut self,
        id: &'a str,
        create: impl FnOnce() -> PackageRow<'a>,
    ) -> &mut PackageRow<'a> {
        let slot = match self.index.get(id) {
            Some(&slot) => slot,
            None => {
                self.rows.push(create());
                self.alive.push(true);
                let slot = self.rows.len() - 1;
                self.index.insert(id, slot);
                slot
            }
        };
        &mut self.rows[slot]
    }

    pub fn get(&self, id: &str) -> Option<&PackageRow<'a>> {
        self.index.get(id).map(|&slot| &self.rows[slot])
    }

    /// Remove a row. Returns false if there was no live row with this id.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.index.remove(id) {
            Some(slot) => {
                self.alive[slot] = false;
                true
            }
            None => false,
        }
    }

    /// Live rows in creation order
    pub fn rows(&self) -> impl Iterator<Item = &PackageRow<'a>> {
        self.rows
            .iter()
            .zip(&self.alive)
            .filter_map(|(row, &alive)| alive.then_some(row))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn into_rows(self) -> Vec<PackageRow<'a>> {
        self.rows
            .into_iter()
            .zip(self.alive)
            .filter_map(|(row, alive)| alive.then_some(row))
            .collect()
    }

    /// Merge one visible catalog entry into its row
    pub fn add_catalog_package(
        &mut self,
        pkg: &'a CatalogPackage,
        project_unity: Option<UnityVersion>,
    ) {
        let manifest = &pkg.manifest;
        let row = self.get_or_insert_with(&manifest.id, || {
            PackageRow::from_manifest(manifest, UrlProvenance::Catalog(&manifest.version))
        });

        row.is_there_source = true;

        if compare_version(&manifest.version, row.info_source) == Ordering::Greater {
            row.info_source = &manifest.version;
            row.display_name = manifest.display_name();
            row.aliases = manifest.aliases.iter().map(String::as_str).collect();
            if let Some(description) = manifest.description.as_deref().filter(|d| !d.is_empty()) {
                row.description = Some(description);
            }
        }

        row.changelog_url = prefer_catalog_url(
            row.changelog_url,
            manifest.changelog_url.as_deref(),
            &manifest.version,
        );
        row.documentation_url = prefer_catalog_url(
            row.documentation_url,
            manifest.documentation_url.as_deref(),
            &manifest.version,
        );

        row.add_version(pkg, is_unity_compatible(manifest, project_unity));

        row.sources.insert(pkg.source.display_name());
    }

    /// Sort version lists and derive latest / stable latest for every row
    pub fn compute_latest(&mut self) {
        for row in &mut self.rows {
            row.unity_compatible.sort_by(newest_first);
            row.unity_incompatible.sort_by(newest_first);

            row.latest = find_latest(&row.unity_compatible, &row.unity_incompatible, false);
            row.stable_latest = find_latest(&row.unity_compatible, &row.unity_incompatible, true);
        }
    }

    /// Overlay one installed package onto its row
    pub fn apply_installed(
        &mut self,
        installed: &'a PackageManifest,
        yanked: &HashSet<(&'a str, &'a Version)>,
        known: &HashSet<&'a str>,
    ) {
        let row = self.get_or_insert_with(&installed.id, || {
            PackageRow::from_manifest(installed, UrlProvenance::Installed)
        });

        let mut aliases: Vec<&'a str> =
            Vec::with_capacity(installed.aliases.len() + row.aliases.len());
        let installed_aliases = installed.aliases.iter().map(String::as_str);
        for alias in installed_aliases.chain(row.aliases.iter().copied()) {
            if !aliases.contains(&alias) {
                aliases.push(alias);
            }
        }
        row.aliases = aliases;

        let yanked =
            installed.yanked || yanked.contains(&(installed.id.as_str(), &installed.version));
        row.installed = Some(InstalledPackage {
            pkg: installed,
            yanked,
        });

        row.latest = row.latest.against_installed(&installed.version);
        row.stable_latest = row.stable_latest.against_installed(&installed.version);

        row.is_there_source = known.contains(installed.id.as_str());

        if let Some(url) = installed.changelog_url.as_deref() {
            row.changelog_url = Some(TrackedUrl {
                url,
                provenance: UrlProvenance::Installed,
            });
        }
        if let Some(url) = installed.documentation_url.as_deref() {
            row.documentation_url = Some(TrackedUrl {
                url,
                provenance: UrlProvenance::Installed,
            });
        }
    }
}
