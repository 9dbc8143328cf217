use anyhow::{bail, Result};
use vpm_catalog::{CatalogPackage, TrackedUrl, UrlProvenance};

use super::{format_latest, row_notes, SnapshotPaths, Snapshots};

pub fn run(paths: &SnapshotPaths, id: &str) -> Result<()> {
    let snapshots = Snapshots::load(paths)?;
    let rows = snapshots.rows();

    let Some(row) = rows.iter().find(|row| row.id == id) else {
        bail!(
            "Package '{}' is not listed\n\n\
             Suggestions:\n  \
             • Check the package id spelling\n  \
             • Search for packages: vpm-catalog list <query>\n  \
             • Check hidden repositories: vpm-catalog config show",
            id
        );
    };

    println!("{} ({})", row.display_name, row.id);
    if let Some(description) = row.description {
        println!("  {}", description);
    }
    println!();

    if !row.aliases.is_empty() {
        println!("Aliases:       {}", row.aliases.join(", "));
    }
    if !row.sources.is_empty() {
        let sources: Vec<_> = row.sources.iter().copied().collect();
        println!("Sources:       {}", sources.join(", "));
    }
    match row.installed {
        Some(installed) => println!(
            "Installed:     {}{}",
            installed.pkg.version,
            if installed.yanked { " (yanked)" } else { "" }
        ),
        None => println!("Installed:     -"),
    }
    println!("Latest:        {}", format_latest(&row.latest));
    println!("Stable latest: {}", format_latest(&row.stable_latest));

    let notes = row_notes(row);
    if !notes.is_empty() {
        println!("Notes:         {}", notes.join(", "));
    }
    println!();

    print_versions("Compatible versions", &row.unity_compatible);
    print_versions("Incompatible versions", &row.unity_incompatible);

    print_url("Changelog", row.changelog_url);
    print_url("Documentation", row.documentation_url);

    Ok(())
}

fn print_versions(title: &str, packages: &[&CatalogPackage]) {
    if packages.is_empty() {
        return;
    }

    println!("{}:", title);
    for pkg in packages {
        match pkg.manifest.unity {
            Some(unity) => println!(
                "  {:<20} Unity {}+  [{}]",
                pkg.version().to_string(),
                unity,
                pkg.source.display_name()
            ),
            None => println!(
                "  {:<20} [{}]",
                pkg.version().to_string(),
                pkg.source.display_name()
            ),
        }
    }
    println!();
}

fn print_url(title: &str, url: Option<TrackedUrl<'_>>) {
    let Some(url) = url else {
        return;
    };

    let from = match url.provenance {
        UrlProvenance::Installed => "installed".to_string(),
        UrlProvenance::Catalog(version) => version.to_string(),
    };
    println!("{}: {} (from {})", title, url.url, from);
}
