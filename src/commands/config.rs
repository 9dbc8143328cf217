use anyhow::Result;
use vpm_catalog::{Config, UserRepository};

pub fn run(action: &crate::ConfigAction) -> Result<()> {
    use crate::ConfigAction;

    match action {
        ConfigAction::Show => show_config(),
        ConfigAction::Set { key, value } => set_config(key, value),
        ConfigAction::HideRepo { id } => hide_repository(id),
        ConfigAction::ShowRepo { id } => show_repository(id),
        ConfigAction::AddRepo { id, name } => add_repository(id, name),
        ConfigAction::RemoveRepo { id } => remove_repository(id),
    }
}

fn show_config() -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::default_path()?;

    println!();
    println!("Config file: {}", config_path.display());
    println!();

    println!("Visibility:");
    println!(
        "  Hide local user packages:  {}",
        format_bool(config.visibility.hide_local_user_packages)
    );
    println!(
        "  Show prerelease packages:  {}",
        format_bool(config.visibility.show_prerelease_packages)
    );
    println!();

    println!("Repositories:");
    if config.repositories.is_empty() {
        println!("  No repositories configured");
        println!("  Add one with: vpm-catalog config add-repo <id> <name>");
    } else {
        for repository in &config.repositories {
            let hidden = if config.visibility.is_repository_hidden(&repository.id) {
                " (hidden)"
            } else {
                ""
            };
            println!("  {:<40} {}{}", repository.id, repository.display_name, hidden);
        }
    }

    // Hidden ids that are not user repositories (e.g. the official or curated repository)
    let other_hidden: Vec<_> = config
        .visibility
        .hidden_repositories
        .iter()
        .filter(|id| config.find_repository(id).is_none())
        .map(String::as_str)
        .collect();
    if !other_hidden.is_empty() {
        println!();
        println!("Other hidden repositories: {}", other_hidden.join(", "));
    }
    println!();

    println!("Modify settings:");
    println!("   vpm-catalog config set <key> <value>");
    println!();
    println!("   Available keys:");
    println!("     • visibility.hide_local_user_packages");
    println!("     • visibility.show_prerelease_packages");
    println!();

    Ok(())
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "enabled"
    } else {
        "disabled"
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    value
        .parse::<bool>()
        .map_err(|_| anyhow::anyhow!("Invalid boolean value. Use 'true' or 'false'"))
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "visibility.hide_local_user_packages" => {
            config.visibility.hide_local_user_packages = parse_bool(value)?;
        }
        "visibility.show_prerelease_packages" => {
            config.visibility.show_prerelease_packages = parse_bool(value)?;
        }
        _ => {
            anyhow::bail!(
                "Unknown configuration key: {}\n\n\
                 Available keys:\n  \
                 • visibility.hide_local_user_packages\n  \
                 • visibility.show_prerelease_packages",
                key
            );
        }
    }

    config.save()?;
    println!("✓ {} = {}", key, value);

    Ok(())
}

fn hide_repository(id: &str) -> Result<()> {
    let mut config = Config::load()?;

    if config.hide_repository(id) {
        config.save()?;
        println!("✓ Hid repository {}", id);
    } else {
        println!("Repository {} is already hidden", id);
    }

    Ok(())
}

fn show_repository(id: &str) -> Result<()> {
    let mut config = Config::load()?;

    if config.show_repository(id) {
        config.save()?;
        println!("✓ Repository {} is visible again", id);
    } else {
        println!("Repository {} is not hidden", id);
    }

    Ok(())
}

fn add_repository(id: &str, name: &str) -> Result<()> {
    let mut config = Config::load()?;

    config.add_repository(UserRepository::new(id, name));
    config.save()?;
    println!("✓ Added repository {} ({})", id, name);

    Ok(())
}

fn remove_repository(id: &str) -> Result<()> {
    let mut config = Config::load()?;

    let removed = config.remove_repository(id)?;
    config.save()?;
    println!("✓ Removed repository {} ({})", removed.id, removed.display_name);

    Ok(())
}
