//! Development server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::{Site, CONFIG_FILE};

/// Path of the live reload WebSocket
const LIVE_RELOAD_PATH: &str = "/__livereload";

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
    ws.onclose = function() {
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    public_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Routes serving `public_dir`, with the reload socket when `live_reload` is set
fn router(public_dir: PathBuf, reload_tx: broadcast::Sender<()>, live_reload: bool) -> Router {
    let state = Arc::new(ServerState {
        public_dir,
        reload_tx,
        live_reload,
    });

    Router::new()
        .route(LIVE_RELOAD_PATH, get(livereload_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the public directory, rebuilding on changes unless `watch` is off
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);
    let app = router(site.public_dir.clone(), reload_tx.clone(), watch);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let site = site.clone();
        tokio::spawn(async move {
            if let Err(e) = watch_and_reload(site, reload_tx).await {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch content, static files and the config, rebuilding one change batch at a time
async fn watch_and_reload(site: Site, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<DebounceEventResult>();

    // The debouncer calls back on its own thread; forward into the runtime
    let mut debouncer = new_debouncer(Duration::from_millis(500), move |res: DebounceEventResult| {
        let _ = tx.send(res);
    })?;

    let config_path = site.base_dir.join(CONFIG_FILE);
    for (path, mode) in [
        (&site.content_dir, RecursiveMode::Recursive),
        (&site.static_dir, RecursiveMode::Recursive),
        (&config_path, RecursiveMode::NonRecursive),
    ] {
        if path.exists() {
            debouncer.watcher().watch(path, mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    let mut site = site;
    while let Some(result) = rx.recv().await {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed: Vec<_> = events
            .iter()
            .map(|e| e.path.as_path())
            .filter(|p| is_relevant(p, &site.public_dir))
            .collect();
        if changed.is_empty() {
            continue;
        }
        for path in &changed {
            tracing::info!("File changed: {}", path.display());
        }

        if changed.iter().any(|p| p.ends_with(CONFIG_FILE)) {
            match Site::new(&site.base_dir) {
                Ok(reloaded) => site = reloaded,
                Err(e) => {
                    tracing::error!("Failed to reload {}: {:#}", CONFIG_FILE, e);
                    continue;
                }
            }
        }

        tracing::info!("Regenerating...");
        match site.generate().await {
            Ok(()) => {
                let _ = reload_tx.send(());
            }
            Err(e) => tracing::error!("Generation failed: {:#}", e),
        }
    }

    Ok(())
}

/// Editor droppings, VCS metadata and our own output never trigger a rebuild
fn is_relevant(path: &Path, public_dir: &Path) -> bool {
    if path.starts_with(public_dir) {
        return false;
    }
    if path
        .components()
        .any(|c| c.as_os_str() == ".git" || c.as_os_str() == ".DS_Store")
    {
        return false;
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    !name.ends_with('~') && !name.ends_with(".swp")
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

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

/// Serves files, injecting the live reload script into HTML pages
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    if state.live_reload {
        if let Some(file_path) = html_file_for(&state.public_dir, request.uri().path()) {
            return match tokio::fs::read_to_string(&file_path).await {
                Ok(content) => Html(inject_live_reload(&content)).into_response(),
                Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
            };
        }
    }

    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// The HTML page a request path maps to, if it is one
fn html_file_for(public_dir: &Path, path: &str) -> Option<PathBuf> {
    let clean_path = path.trim_start_matches('/');
    if clean_path.split('/').any(|c| c == "..") {
        return None;
    }

    let candidate = public_dir.join(clean_path);
    let file_path = if candidate.is_dir() {
        candidate.join("index.html")
    } else {
        candidate
    };

    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);
    (is_html && file_path.is_file()).then_some(file_path)
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", LIVE_RELOAD_SCRIPT, 1)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}
