//! Row pruning and final ordering

use super::builder::RowTable;
use super::PackageRow;
use crate::project::ProjectSnapshot;
use std::collections::{HashMap, HashSet};

/// Avatar SDK lineage root
pub const AVATARS_SDK: &str = "com.vrchat.avatars";

/// World SDK lineage root
pub const WORLDS_SDK: &str = "com.vrchat.worlds";

/// When exactly one SDK lineage is installed, drop the other lineage root and
/// everything that depends on it through the rows' latest versions.
///
/// Returns the removed ids.
pub(crate) fn remove_unused_sdk_lineage<'a>(table: &mut RowTable<'a>) -> Vec<&'a str> {
    let is_installed = |id: &str| table.get(id).is_some_and(|row| row.installed.is_some());
    let avatars_installed = is_installed(AVATARS_SDK);
    let worlds_installed = is_installed(WORLDS_SDK);

    if avatars_installed == worlds_installed {
        return Vec::new();
    }

    let unused = if avatars_installed { WORLDS_SDK } else { AVATARS_SDK };

    // dependency id -> ids of rows whose latest version depends on it
    let mut dependents: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
    for row in table.rows() {
        if let Some(latest) = row.latest.package() {
            for dependency in latest.manifest.dependency_ids() {
                dependents.entry(dependency).or_default().push(row.id);
            }
        }
    }

    let mut queue = vec![unused];
    let mut visited = HashSet::new();
    let mut removed = Vec::new();

    while let Some(id) = queue.pop() {
        if !visited.insert(id) {
            continue;
        }
        if table.remove(id) {
            removed.push(id);
        }
        if let Some(ids) = dependents.get(id) {
            queue.extend(ids.iter().copied());
        }
    }

    tracing::debug!(lineage = unused, removed = ?removed, "removed unused SDK lineage");

    removed
}

/// Drop every package that an installed package declares as superseded.
///
/// Returns the removed ids.
pub(crate) fn remove_legacy_packages<'a>(
    table: &mut RowTable<'a>,
    project: &'a ProjectSnapshot,
) -> Vec<&'a str> {
    let mut removed = Vec::new();

    for installed in project.installed_packages() {
        for legacy in &installed.legacy_packages {
            if table.remove(legacy) {
                tracing::debug!(legacy = %legacy, by = %installed.id, "removed legacy package");
                removed.push(legacy.as_str());
            }
        }
    }

    removed
}

/// Stable partition: installed rows first
pub(crate) fn installed_first(rows: Vec<PackageRow<'_>>) -> Vec<PackageRow<'_>> {
    let (mut installed, not_installed): (Vec<_>, Vec<_>) =
        rows.into_iter().partition(|row| row.installed.is_some());
    installed.extend(not_installed);
    installed
}
