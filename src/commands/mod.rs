use anyhow::{Context, Result};
use std::path::PathBuf;
use vpm_catalog::{
    combine_packages_and_project_details, CatalogSnapshot, Config, LatestStatus, PackageRow,
    ProjectSnapshot,
};

pub mod config;
pub mod list;
pub mod outdated;
pub mod show;

/// Snapshot files given on the command line
pub struct SnapshotPaths {
    pub catalog: Option<PathBuf>,
    pub project: Option<PathBuf>,
}

/// Everything the row commands read
pub struct Snapshots {
    pub catalog: CatalogSnapshot,
    pub project: Option<ProjectSnapshot>,
    pub config: Config,
}

impl Snapshots {
    pub fn load(paths: &SnapshotPaths) -> Result<Self> {
        let catalog_path = paths.catalog.as_ref().context(
            "No catalog snapshot given\n\n\
             Pass the catalog file with: --catalog <FILE>",
        )?;

        let catalog = CatalogSnapshot::load_from(catalog_path)
            .with_context(|| format!("Failed to load catalog '{}'", catalog_path.display()))?;

        let project = match &paths.project {
            Some(path) => Some(
                ProjectSnapshot::load_from(path)
                    .with_context(|| format!("Failed to load project '{}'", path.display()))?,
            ),
            None => None,
        };

        let config = Config::load()?;

        Ok(Self {
            catalog,
            project,
            config,
        })
    }

    pub fn rows(&self) -> Vec<PackageRow<'_>> {
        combine_packages_and_project_details(
            self.catalog.packages(),
            self.project.as_ref(),
            &self.config.visibility,
            &self.config.repositories,
        )
    }
}

/// Short text for a latest status
pub fn format_latest(status: &LatestStatus<'_>) -> String {
    match status.version() {
        Some(version) => version.to_string(),
        None => "-".to_string(),
    }
}

/// Flags shown next to a row
pub fn row_notes(row: &PackageRow<'_>) -> Vec<&'static str> {
    let mut notes = Vec::new();

    if row.latest.is_upgradable() {
        notes.push("upgradable");
    }
    if row.installed.is_some_and(|installed| installed.yanked) {
        notes.push("yanked");
    }
    if !row.is_there_source {
        notes.push("no source");
    }
    if row.latest.has_unity_incompatible_latest() {
        notes.push("newer version needs another Unity");
    } else if matches!(row.latest, LatestStatus::None) && !row.unity_incompatible.is_empty() {
        notes.push("incompatible with project Unity");
    }

    notes
}
