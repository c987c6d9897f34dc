//! Reader server: listing and detail views, with optional live reload

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tower_http::trace::TraceLayer;

use crate::content::{ContentLoader, Manifest, ManifestSource, PostSummary};
use crate::views::Views;
use crate::Reader;

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
})();
</script>
</body>
"#;

/// Server state
pub struct ServerState {
    views: Views,
    /// Current manifest; replaced wholesale when the source changes
    manifest: RwLock<Arc<Manifest>>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl ServerState {
    pub fn new(views: Views, manifest: Manifest, live_reload: bool) -> Self {
        let (reload_tx, _) = broadcast::channel::<()>(16);
        Self {
            views,
            manifest: RwLock::new(Arc::new(manifest)),
            reload_tx,
            live_reload,
        }
    }

    async fn current_manifest(&self) -> Arc<Manifest> {
        self.manifest.read().await.clone()
    }

    async fn replace_manifest(&self, manifest: Manifest) {
        *self.manifest.write().await = Arc::new(manifest);
    }

    fn page(&self, html: String) -> Html<String> {
        if self.live_reload {
            Html(inject_live_reload(&html))
        } else {
            Html(html)
        }
    }
}

/// Query string of the listing and API routes
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Build the router, nested under the configured root
pub fn router(state: Arc<ServerState>) -> Router {
    let root = state.views.config().root.trim_end_matches('/').to_string();

    let views = Router::new()
        .route("/", get(listing_handler))
        .route("/blog/*path", get(post_handler))
        .route("/api/posts", get(api_posts_handler));

    let app = if root.is_empty() {
        views
    } else {
        Router::new()
            .route(&format!("{}/", root), get(listing_handler))
            .nest(&root, views)
    };

    app.route("/__livereload", get(livereload_handler))
        .fallback(fallback_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the reader server
pub async fn start(reader: &Reader, ip: &str, port: u16, watch: bool) -> Result<()> {
    // A failed initial load still serves an empty listing
    let manifest = match reader.source.read_async().await {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::error!("Failed to load posts from {:?}: {}", reader.source.path(), e);
            Manifest::new()
        }
    };
    tracing::info!("Serving {} posts", manifest.len());

    let state = Arc::new(ServerState::new(
        Views::new(reader.config.clone()),
        manifest,
        watch,
    ));
    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Live reload enabled. Watching {:?}", reader.source.path());
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let source = reader.source.clone();
        let state = state.clone();
        let handle = tokio::runtime::Handle::current();
        std::thread::spawn(move || {
            if let Err(e) = watch_and_reload(source, state, handle) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch the manifest source, rebuild the manifest on change, and notify browsers
fn watch_and_reload(
    source: ManifestSource,
    state: Arc<ServerState>,
    handle: tokio::runtime::Handle,
) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Debounce so a burst of saves triggers one rebuild
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    let mode = match source {
        ManifestSource::Scan(_) => RecursiveMode::Recursive,
        ManifestSource::File(_) => RecursiveMode::NonRecursive,
    };
    if source.path().exists() {
        debouncer.watcher().watch(source.path(), mode)?;
        tracing::debug!("Watching: {:?}", source.path());
    } else {
        tracing::warn!("{:?} does not exist, nothing to watch", source.path());
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    let path = e.path.to_string_lossy();
                    !path.contains(".git") && !path.contains(".DS_Store") && !path.ends_with('~')
                });
                if !relevant {
                    continue;
                }

                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }

                let manifest = source.read().unwrap_or_else(|e| {
                    tracing::error!("Failed to reload posts: {}", e);
                    Manifest::new()
                });
                tracing::info!("Reloaded {} posts", manifest.len());
                handle.block_on(state.replace_manifest(manifest));
                let _ = state.reload_tx.send(());
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

/// Listing view: every mount builds its own collection
async fn listing_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let manifest = state.current_manifest().await;
    let collection = ContentLoader::new(&manifest).load_posts();
    let posts = collection.filter(&params.q);
    state.page(state.views.listing(&posts, &params.q))
}

/// Detail view for one post
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(path): Path<String>,
) -> Response {
    let manifest = state.current_manifest().await;
    match ContentLoader::new(&manifest).load_post(&path) {
        Ok(post) => state.page(state.views.detail(&post)).into_response(),
        Err(e) => {
            if !e.is_not_found() {
                tracing::warn!("Failed to load post {:?}: {}", path, e);
            }
            (StatusCode::NOT_FOUND, state.page(state.views.not_found())).into_response()
        }
    }
}

/// JSON summaries of matching posts
async fn api_posts_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let manifest = state.current_manifest().await;
    let collection = ContentLoader::new(&manifest).load_posts();
    let summaries: Vec<PostSummary> = collection
        .filter(&params.q)
        .into_iter()
        .map(PostSummary::from)
        .collect();
    Json(summaries).into_response()
}

async fn fallback_handler(State(state): State<Arc<ServerState>>) -> Response {
    (StatusCode::NOT_FOUND, state.page(state.views.not_found())).into_response()
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}
