use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// vpm-catalog - Package listings for VPM projects
#[derive(Parser)]
#[command(name = "vpm-catalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog snapshot (JSON array of package listings)
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Project snapshot (Unity version and installed packages)
    #[arg(long, global = true, value_name = "FILE")]
    project: Option<PathBuf>,

    /// Show debug logging (VPM_CATALOG_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List packages, installed ones first
    List {
        /// Only show packages whose id, name, or alias contains this text
        query: Option<String>,
    },

    /// List installed packages with a newer compatible version
    Outdated {
        /// Only consider stable (non-prerelease) versions
        #[arg(long)]
        stable: bool,
    },

    /// Show every version and source of a package
    Show {
        /// Package id (e.g., com.vrchat.avatars)
        id: String,
    },

    /// Manage visibility settings and repositories
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., visibility.show_prerelease_packages)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Hide packages from a repository
    HideRepo {
        /// Repository id
        id: String,
    },

    /// Show packages from a previously hidden repository
    ShowRepo {
        /// Repository id
        id: String,
    },

    /// Add a repository (or rename an existing one)
    AddRepo {
        /// Repository id
        id: String,
        /// Name shown in source lists
        name: String,
    },

    /// Remove a repository
    RemoveRepo {
        /// Repository id
        id: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("VPM_CATALOG_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let snapshots = commands::SnapshotPaths {
        catalog: cli.catalog,
        project: cli.project,
    };

    let result = match cli.command {
        Commands::List { query } => commands::list::run(&snapshots, query),
        Commands::Outdated { stable } => commands::outdated::run(&snapshots, stable),
        Commands::Show { id } => commands::show::run(&snapshots, &id),
        Commands::Config { action } => commands::config::run(&action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "vpm-catalog", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
