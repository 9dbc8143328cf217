use anyhow::Result;

use super::{format_latest, SnapshotPaths, Snapshots};

pub fn run(paths: &SnapshotPaths, stable: bool) -> Result<()> {
    if paths.project.is_none() {
        println!("✗ No project snapshot given");
        println!();
        println!("Pass the project with: --project <FILE>");
        return Ok(());
    }

    println!("Checking for outdated packages...");
    println!();

    let snapshots = Snapshots::load(paths)?;
    let rows = snapshots.rows();

    let outdated: Vec<_> = rows
        .iter()
        .filter(|row| row.latest_for(stable).is_upgradable())
        .collect();

    if outdated.is_empty() {
        println!("✓ All packages are up to date!");
        println!();
        return Ok(());
    }

    println!("Found {} outdated packages:", outdated.len());
    println!();

    println!("{:<40} {:<15} {:<15}", "Package", "Current", "Latest");
    println!("{}", "-".repeat(72));

    for row in outdated {
        let current = row
            .installed_version()
            .map(|v| v.to_string())
            .unwrap_or_default();

        println!(
            "{:<40} {:<15} {:<15}",
            row.id,
            current,
            format_latest(&row.latest_for(stable))
        );
    }

    println!();

    Ok(())
}
