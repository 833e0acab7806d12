//! Build the public artifacts

use anyhow::{Context, Result};
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::{BuildReport, Generator};
use crate::Journal;

/// Load, validate and write every artifact
pub fn run(journal: &Journal) -> Result<BuildReport> {
    let generator = Generator::new(journal).context("Cannot set up preview rendering")?;
    run_with(journal, &generator)
}

/// Same as [`run`] with an already prepared generator
pub fn run_with(journal: &Journal, generator: &Generator) -> Result<BuildReport> {
    let start = Instant::now();

    let collection = journal.load_collection()?;
    let report = generator.generate(&collection)?;

    let duration = start.elapsed();
    tracing::info!("Built in {:.2}s", duration.as_secs_f64());

    Ok(report)
}

/// Watch content and config, rebuilding on change with the generator that
/// did the initial build.
///
/// `site_override` is the `--site` value, re-applied whenever the config is re-read.
pub fn watch(journal: &Journal, mut generator: Generator, site_override: Option<String>) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if journal.content_dir.exists() {
        watcher.watch(&journal.content_dir, notify::RecursiveMode::Recursive)?;
    }

    let config_path = journal.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", journal.content_dir);

    // Debounce events
    let mut last_rebuild = Instant::now();
    let mut journal = journal.clone();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("Content changed, rebuilding...");
                    let (reloaded, result) = rebuild(journal, &mut generator, site_override.clone());
                    journal = reloaded;
                    match result {
                        Ok(report) if report.is_success() => {}
                        Ok(report) => {
                            tracing::warn!("{} artifact(s) failed", report.failures.len())
                        }
                        Err(e) => tracing::error!("Build failed: {:#}", e),
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// One watch iteration: re-read the config, point the generator at it and
/// build again. The preview font stays loaded.
pub fn rebuild(
    journal: Journal,
    generator: &mut Generator,
    site_override: Option<String>,
) -> (Journal, Result<BuildReport>) {
    let journal = reload_config(journal, site_override);
    generator.reconfigure(&journal);
    let result = run_with(&journal, generator);
    (journal, result)
}

/// Re-read `_config.yml`; the previous config stays on error
fn reload_config(journal: Journal, site_override: Option<String>) -> Journal {
    match Journal::new(&journal.base_dir) {
        Ok(fresh) => fresh.with_site_url(site_override),
        Err(e) => {
            tracing::error!("Keeping previous configuration: {:#}", e);
            journal
        }
    }
}
