//! Preview server
//!
//! Serves the three artifacts straight from the in-memory collection and
//! everything else from the public directory.

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::Collection;
use crate::generator::{feed, search, PreviewRenderer};
use crate::Journal;

/// Server state
struct ServerState {
    config: SiteConfig,
    public_dir: PathBuf,
    collection: RwLock<Collection>,
    previews: Arc<PreviewRenderer>,
}

impl ServerState {
    /// Swap in a freshly loaded collection; a failed load keeps the current one
    fn reload(&self, loaded: Result<Collection>) -> bool {
        match loaded {
            Ok(collection) => {
                *self.collection.blocking_write() = collection;
                true
            }
            Err(e) => {
                tracing::error!("Reload failed, keeping previous content: {:#}", e);
                false
            }
        }
    }
}

/// Start the server
pub async fn start(journal: &Journal, ip: &str, port: u16, watch: bool) -> Result<()> {
    let previews = PreviewRenderer::from_font_file(&journal.font_path)
        .context("Cannot set up preview rendering")?;
    let collection = journal.load_collection()?;

    let state = Arc::new(ServerState {
        config: journal.config.clone(),
        public_dir: journal.public_dir.clone(),
        collection: RwLock::new(collection),
        previews: Arc::new(previews),
    });

    let app = router(Arc::clone(&state));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching {:?} for changes...", journal.content_dir);
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let journal = journal.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(journal, state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/search.json", get(search_handler))
        .route("/rss.xml", get(feed_handler))
        .route("/og/*path", get(preview_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Reload the collection whenever a content file changes
fn watch_and_reload(journal: Journal, state: Arc<ServerState>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid reloads
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if journal.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&journal.content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", journal.content_dir);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    let path_str = e.path.to_string_lossy();
                    !path_str.contains(".git")
                        && !path_str.contains(".DS_Store")
                        && !path_str.ends_with('~')
                });
                if !relevant {
                    continue;
                }

                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }
                if state.reload(journal.load_collection()) {
                    tracing::info!("Content reloaded");
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

async fn search_handler(State(state): State<Arc<ServerState>>) -> Response {
    let collection = state.collection.read().await;
    match search::render(&collection) {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => server_error("search.json", &e),
    }
}

async fn feed_handler(State(state): State<Arc<ServerState>>) -> Response {
    let collection = state.collection.read().await;
    match feed::render(&state.config, &collection) {
        Ok(xml) => (
            [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
            xml,
        )
            .into_response(),
        Err(e) => server_error("rss.xml", &e),
    }
}

/// `/og/{id}.png`
async fn preview_handler(
    State(state): State<Arc<ServerState>>,
    Path(path): Path<String>,
) -> Response {
    let Some(id) = path.trim_start_matches('/').strip_suffix(".png") else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    // drafts are not visible, so they 404 as well
    let entry = match state.collection.read().await.get(id) {
        Some(entry) => entry.clone(),
        None => return (StatusCode::NOT_FOUND, "Not found").into_response(),
    };

    let previews = Arc::clone(&state.previews);
    match tokio::task::spawn_blocking(move || previews.render(&entry)).await {
        Ok(Ok(png)) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Ok(Err(e)) => server_error(&path, &e),
        Err(e) => server_error(&path, &e),
    }
}

fn server_error(artifact: &str, error: &dyn std::fmt::Display) -> Response {
    tracing::error!("Failed to generate {}: {}", artifact, error);
    (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response()
}

/// Fallback handler that serves files from the public directory
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}
