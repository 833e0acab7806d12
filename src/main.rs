//! CLI entry point for project-journal

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use project_journal::commands::build;
use project_journal::generator::Generator;
use project_journal::Journal;

#[derive(Parser)]
#[command(name = "project-journal")]
#[command(author)]
#[command(version)]
#[command(about = "Search index, RSS feed and preview images for a project journal", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Site root URL, overrides `url` in _config.yml
    #[arg(long, global = true)]
    site: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate search.json, rss.xml and preview images
    #[command(alias = "b")]
    Build {
        /// Rebuild on content changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Serve the artifacts from memory
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4321")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Disable content reloading
        #[arg(long)]
        r#static: bool,
    },

    /// Validate every project without writing anything
    Check,

    /// List projects, drafts, featured, tags, tech or techniques
    List {
        #[arg(default_value = "projects")]
        r#type: String,
    },

    /// Scaffold a new draft project
    New {
        /// Title of the new project
        title: String,
    },

    /// Remove the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "project_journal=debug,info"
    } else {
        "project_journal=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };
    let site = cli.site;
    let journal = || -> Result<Journal> {
        Ok(Journal::new(&base_dir)?.with_site_url(site.clone()))
    };

    match cli.command {
        Commands::Build { watch } => {
            let journal = journal()?;
            tracing::info!("Building artifacts...");

            let generator =
                Generator::new(&journal).context("Cannot set up preview rendering")?;
            let report = build::run_with(&journal, &generator)?;
            if watch {
                for failure in &report.failures {
                    println!("Failed: {}", failure);
                }
                build::watch(&journal, generator, site.clone())?;
            } else if !report.is_success() {
                for failure in &report.failures {
                    eprintln!("Failed: {}", failure);
                }
                anyhow::bail!("{} artifact(s) could not be generated", report.failures.len());
            } else {
                println!("Built {} artifacts", report.written.len());
            }
        }

        Commands::Server { port, ip, r#static } => {
            let journal = journal()?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            project_journal::server::start(&journal, &ip, port, !r#static).await?;
        }

        Commands::Check => {
            project_journal::commands::check::run(&journal()?)?;
        }

        Commands::List { r#type } => {
            project_journal::commands::list::run(&journal()?, &r#type)?;
        }

        Commands::New { title } => {
            let path = journal()?.new_project(&title)?;
            println!("Created: {:?}", path);
        }

        Commands::Clean => {
            let journal = journal()?;
            tracing::info!("Cleaning public folder...");
            journal.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("project-journal version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
