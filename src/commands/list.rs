use anyhow::Result;
use vpm_catalog::filter_rows;

use super::{format_latest, row_notes, SnapshotPaths, Snapshots};

pub fn run(paths: &SnapshotPaths, query: Option<String>) -> Result<()> {
    let snapshots = Snapshots::load(paths)?;
    let rows = snapshots.rows();
    let shown = filter_rows(&rows, query.as_deref().unwrap_or_default());

    if shown.is_empty() {
        match &query {
            Some(query) => println!("No packages match '{}'.", query),
            None => println!("No packages found."),
        }
        println!();
        println!("Check hidden repositories with: vpm-catalog config show");
        return Ok(());
    }

    println!(
        "{:<40} {:<15} {:<15} {}",
        "Package", "Installed", "Latest", "Notes"
    );
    println!("{}", "-".repeat(90));

    for row in &shown {
        let installed = row
            .installed_version()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<40} {:<15} {:<15} {}",
            row.id,
            installed,
            format_latest(&row.latest),
            row_notes(row).join(", ")
        );
    }

    let installed_count = shown.iter().filter(|row| row.is_installed()).count();

    println!();
    println!(
        "Total: {} package{} ({} installed)",
        shown.len(),
        if shown.len() == 1 { "" } else { "s" },
        installed_count
    );

    Ok(())
}
