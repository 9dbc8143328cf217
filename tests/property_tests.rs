//! Property-based tests for vpm-catalog
//!
//! These tests verify:
//! - Version comparison is a total order
//! - Row version lists are sorted and never repeat a version
//! - Upgrade detection agrees with the installed version
//! - Installed rows always come first

use proptest::prelude::*;
use semver::{Prerelease, Version};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use vpm_catalog::{
    combine_packages_and_project_details, compare_version, CatalogPackage, LatestStatus,
    PackageManifest, PackageSource, ProjectSnapshot, RepositoryVisibility, UnityVersion,
};

// =============================================================================
// Strategies
// =============================================================================

fn prerelease_strategy() -> impl Strategy<Value = Prerelease> {
    prop_oneof![
        3 => Just(Prerelease::EMPTY),
        1 => prop::sample::select(vec!["alpha", "alpha.1", "beta", "beta.2", "rc.1", "1", "2"])
            .prop_map(|tag| Prerelease::new(tag).expect("valid prerelease")),
    ]
}

fn version_strategy() -> impl Strategy<Value = Version> {
    (0u64..3, 0u64..3, 0u64..3, prerelease_strategy()).prop_map(|(major, minor, patch, pre)| {
        let mut version = Version::new(major, minor, patch);
        version.pre = pre;
        version
    })
}

fn unity_strategy() -> impl Strategy<Value = Option<UnityVersion>> {
    prop_oneof![
        Just(None),
        Just(Some(UnityVersion::new(2019, 4))),
        Just(Some(UnityVersion::new(2022, 3))),
    ]
}

fn source_strategy() -> impl Strategy<Value = PackageSource> {
    prop_oneof![
        Just(PackageSource::remote("com.vrchat.repos.official", "Official")),
        Just(PackageSource::remote("com.vrchat.repos.curated", "Curated")),
        Just(PackageSource::remote("com.example.extra", "Extra")),
        Just(PackageSource::LocalUser),
    ]
}

fn package_id(index: usize) -> String {
    format!("com.example.pkg{}", index)
}

fn listing_strategy() -> impl Strategy<Value = CatalogPackage> {
    (0usize..5, version_strategy(), unity_strategy(), source_strategy(), prop::bool::weighted(0.1))
        .prop_map(|(index, version, unity, source, yanked)| {
            let mut manifest = PackageManifest::new(package_id(index), version);
            manifest.unity = unity;
            manifest.yanked = yanked;
            CatalogPackage::new(manifest, source)
        })
}

fn catalog_strategy() -> impl Strategy<Value = Vec<CatalogPackage>> {
    prop::collection::vec(listing_strategy(), 0..30)
}

fn project_strategy() -> impl Strategy<Value = ProjectSnapshot> {
    (
        unity_strategy(),
        prop::collection::btree_map(0usize..7, version_strategy(), 0..4),
    )
        .prop_map(|(unity, installed): (_, BTreeMap<usize, Version>)| {
            let packages = installed
                .into_iter()
                .map(|(index, version)| PackageManifest::new(package_id(index), version))
                .collect();
            ProjectSnapshot::new(unity, packages).expect("btree_map keys are unique")
        })
}

fn visibility_strategy() -> impl Strategy<Value = RepositoryVisibility> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(hide_extra, hide_local, prerelease)| {
        let mut visibility = RepositoryVisibility {
            hide_local_user_packages: hide_local,
            show_prerelease_packages: prerelease,
            ..Default::default()
        };
        if hide_extra {
            visibility.hidden_repositories.insert("com.example.extra".to_string());
        }
        visibility
    })
}

// =============================================================================
// Version Ordering Properties
// =============================================================================

proptest! {
    /// compare_version: every version equals itself
    #[test]
    fn version_order_reflexive(v in version_strategy()) {
        prop_assert_eq!(compare_version(&v, &v), Ordering::Equal);
    }

    /// compare_version: swapping arguments reverses the result
    #[test]
    fn version_order_antisymmetric(a in version_strategy(), b in version_strategy()) {
        prop_assert_eq!(compare_version(&a, &b), compare_version(&b, &a).reverse());
    }

    /// compare_version: a <= b and b <= c implies a <= c
    #[test]
    fn version_order_transitive(
        a in version_strategy(),
        b in version_strategy(),
        c in version_strategy(),
    ) {
        if compare_version(&a, &b) != Ordering::Greater
            && compare_version(&b, &c) != Ordering::Greater
        {
            prop_assert_ne!(compare_version(&a, &c), Ordering::Greater);
        }
    }

    /// compare_version: a release is newer than any of its prereleases
    #[test]
    fn release_newer_than_prerelease(v in version_strategy()) {
        let release = Version::new(v.major, v.minor, v.patch);
        if !v.pre.is_empty() {
            prop_assert_eq!(compare_version(&release, &v), Ordering::Greater);
        }
    }
}

// =============================================================================
// Row Properties
// =============================================================================

proptest! {
    /// Each package id yields at most one row
    #[test]
    fn row_ids_unique(
        catalog in catalog_strategy(),
        project in project_strategy(),
        visibility in visibility_strategy(),
    ) {
        let rows = combine_packages_and_project_details(&catalog, Some(&project), &visibility, &[]);
        let mut seen = HashSet::new();
        for row in &rows {
            prop_assert!(seen.insert(row.id), "duplicate row {}", row.id);
        }
    }

    /// Version lists are strictly descending and share no version
    #[test]
    fn row_versions_sorted_and_disjoint(
        catalog in catalog_strategy(),
        project in project_strategy(),
        visibility in visibility_strategy(),
    ) {
        let rows = combine_packages_and_project_details(&catalog, Some(&project), &visibility, &[]);
        for row in &rows {
            for list in [&row.unity_compatible, &row.unity_incompatible] {
                for pair in list.windows(2) {
                    prop_assert_eq!(
                        compare_version(pair[0].version(), pair[1].version()),
                        Ordering::Greater
                    );
                }
            }

            let compatible: HashSet<_> = row.unity_compatible.iter().map(|p| p.version()).collect();
            for pkg in &row.unity_incompatible {
                prop_assert!(!compatible.contains(pkg.version()));
            }
        }
    }

    /// Listing order never moves a version between the compatible and incompatible lists
    #[test]
    fn version_split_ignores_listing_order(
        catalog in catalog_strategy(),
        project in project_strategy(),
        visibility in visibility_strategy(),
    ) {
        let mut reversed = catalog.clone();
        reversed.reverse();

        let forward =
            combine_packages_and_project_details(&catalog, Some(&project), &visibility, &[]);
        let backward =
            combine_packages_and_project_details(&reversed, Some(&project), &visibility, &[]);

        let split = |rows: &[vpm_catalog::PackageRow<'_>]| {
            let mut split: Vec<_> = rows
                .iter()
                .map(|row| {
                    let listed = |list: &[&CatalogPackage]| {
                        list.iter().map(|p| p.version().to_string()).collect::<Vec<_>>()
                    };
                    (
                        row.id.to_string(),
                        listed(&row.unity_compatible),
                        listed(&row.unity_incompatible),
                        row.latest.version().map(ToString::to_string),
                    )
                })
                .collect();
            split.sort();
            split
        };

        prop_assert_eq!(split(&forward), split(&backward));
    }

    /// Yanked listings never appear in a row
    #[test]
    fn yanked_never_listed(catalog in catalog_strategy(), project in project_strategy()) {
        let rows = combine_packages_and_project_details(
            &catalog,
            Some(&project),
            &RepositoryVisibility::default(),
            &[],
        );
        for row in &rows {
            for pkg in row.unity_compatible.iter().chain(&row.unity_incompatible) {
                prop_assert!(!pkg.manifest.yanked);
            }
        }
    }

    /// Upgradable exactly when the latest version is newer than the installed one
    #[test]
    fn upgradable_iff_installed_older(
        catalog in catalog_strategy(),
        project in project_strategy(),
        visibility in visibility_strategy(),
    ) {
        let rows = combine_packages_and_project_details(&catalog, Some(&project), &visibility, &[]);
        for row in &rows {
            for latest in [row.latest, row.stable_latest] {
                match (latest, row.installed_version()) {
                    (LatestStatus::None, _) => {}
                    (status, Some(installed)) => {
                        let newer = compare_version(installed, status.version().unwrap())
                            == Ordering::Less;
                        prop_assert_eq!(status.is_upgradable(), newer);
                    }
                    (status, None) => prop_assert!(!status.is_upgradable()),
                }
            }

            if let LatestStatus::Contains(latest) | LatestStatus::Upgradable(latest) = row.latest {
                prop_assert!(std::ptr::eq(latest.pkg, row.unity_compatible[0]));
            }
        }
    }

    /// Installed rows form a prefix of the result
    #[test]
    fn installed_rows_first(
        catalog in catalog_strategy(),
        project in project_strategy(),
        visibility in visibility_strategy(),
    ) {
        let rows = combine_packages_and_project_details(&catalog, Some(&project), &visibility, &[]);
        let first_not_installed = rows
            .iter()
            .position(|row| !row.is_installed())
            .unwrap_or(rows.len());
        prop_assert!(rows[first_not_installed..].iter().all(|row| !row.is_installed()));
        prop_assert_eq!(first_not_installed, project.installed_packages().len());
    }

    /// The same inputs always produce the same rows
    #[test]
    fn combine_is_deterministic(
        catalog in catalog_strategy(),
        project in project_strategy(),
        visibility in visibility_strategy(),
    ) {
        let combine = || {
            combine_packages_and_project_details(&catalog, Some(&project), &visibility, &[])
        };
        let first = combine();
        let second = combine();

        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(a.id, b.id);
            prop_assert_eq!(a.display_name, b.display_name);
            prop_assert_eq!(&a.sources, &b.sources);
            prop_assert_eq!(a.latest, b.latest);
            prop_assert_eq!(a.stable_latest, b.stable_latest);
        }
    }
}
