//! vpm-catalog - Package catalog reconciliation for VPM projects
//!
//! vpm-catalog takes the package listings of every configured VPM repository
//! and the installed state of one Unity project, and works out what the user
//! should see in a package list:
//!
//! - One row per package id, merging listings from every visible source
//! - Versions split by Unity compatibility, newest first
//! - Latest and stable-latest versions, with upgrade detection
//! - Yanked installed versions flagged
//! - Only the avatar or world SDK lineage when a project uses just one of them
//! - Legacy packages superseded by installed packages hidden
//!
//! Fetching repositories is not part of this crate; it works on snapshots.
//!
//! # Examples
//!
//! ```no_run
//! use vpm_catalog::{
//!     combine_packages_and_project_details, CatalogSnapshot, Config, ProjectSnapshot,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let catalog = CatalogSnapshot::load_from("catalog.json")?;
//! let project = ProjectSnapshot::load_from("project.json")?;
//!
//! let rows = combine_packages_and_project_details(
//!     catalog.packages(),
//!     Some(&project),
//!     &config.visibility,
//!     &config.repositories,
//! );
//!
//! for row in rows.iter().filter(|row| row.latest.is_upgradable()) {
//!     println!("{} can be upgraded", row.display_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`version`] - Package and Unity version ordering
//! - [`compat`] - Unity compatibility checks
//! - [`package`] - Package manifests and sources
//! - [`catalog`] - Catalog snapshots
//! - [`project`] - Project snapshots
//! - [`rows`] - Package row reconciliation
//! - [`config`] - User configuration management
//! - [`error`] - Error types and result handling

pub mod catalog;
pub mod compat;
pub mod config;
pub mod error;
pub mod package;
pub mod project;
pub mod rows;
pub mod version;

pub use catalog::CatalogSnapshot;
pub use compat::is_unity_compatible;
pub use config::{Config, RepositoryVisibility, UserRepository};
pub use error::{Error, Result};
pub use package::{CatalogPackage, PackageManifest, PackageSource, RemoteSource};
pub use project::ProjectSnapshot;
pub use rows::{
    combine_packages_and_project_details, filter_rows, InstalledPackage, LatestPackage,
    LatestStatus, PackageRow, TrackedUrl, UrlProvenance,
};
pub use version::{compare_unity_version, compare_version, UnityVersion};
