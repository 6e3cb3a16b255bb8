use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Instant;

use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tokio::{fs, net::TcpSocket};
use tracing::{Level, debug};

use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::consts::PORT;
use crate::server_utils::{CustomOnResponse, find_open_port, log_server_start};

const FALLBACK_404: &str = "<!DOCTYPE html><html><head><title>Not Found</title></head><body><h1>404 - Not Found</h1></body></html>";

pub struct PreviewOptions {
    pub dist_dir: PathBuf,
    pub host: bool,
    /// Answer unknown paths with `index.html`, letting the client-side router resolve them.
    pub spa: bool,
    /// Path prefix the site is served under, e.g. `/matsu.fi`.
    pub base: Option<String>,
}

/// The response for a path with no file behind it.
pub async fn fallback_response(dist_dir: &Path, spa: bool) -> Response {
    let html = [(header::CONTENT_TYPE, "text/html; charset=utf-8")];

    if spa {
        if let Ok(index) = fs::read_to_string(dist_dir.join("index.html")).await {
            return (StatusCode::OK, html, index).into_response();
        }
    }

    let content = match fs::read_to_string(dist_dir.join("404.html")).await {
        Ok(custom_content) => custom_content,
        Err(_) => FALLBACK_404.to_string(),
    };

    (StatusCode::NOT_FOUND, html, content).into_response()
}

pub fn preview_router(options: &PreviewOptions) -> Router {
    let dist_dir = options.dist_dir.clone();
    let spa = options.spa;
    let service = (move || {
        let dist_dir = dist_dir.clone();
        async move { fallback_response(&dist_dir, spa).await }
    })
    .into_service();
    let serve_dir = ServeDir::new(&options.dist_dir).not_found_service(service);

    let router = match options.base.as_deref().filter(|base| *base != "/") {
        Some(base) => {
            let dist_dir = options.dist_dir.clone();
            Router::new().nest_service(base, serve_dir).fallback(move || {
                let dist_dir = dist_dir.clone();
                async move { fallback_response(&dist_dir, false).await }
            })
        }
        None => Router::new().fallback_service(serve_dir),
    };

    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(CustomOnResponse),
    )
}

pub async fn start_preview_web_server(options: PreviewOptions) -> io::Result<()> {
    let start_time = Instant::now();

    // --host listens on every interface, localhost otherwise
    let addr = if options.host {
        IpAddr::from([0, 0, 0, 0])
    } else {
        IpAddr::from([127, 0, 0, 1])
    };

    let port = find_open_port(&addr, PORT)?;
    let socket = TcpSocket::new_v4()?;
    let _ = socket.set_reuseaddr(true);
    socket.bind(SocketAddr::new(addr, port))?;

    let listener = socket.listen(1024)?;
    let local_addr = listener.local_addr()?;
    debug!(name: "server", "listening on {}", local_addr);

    let router = preview_router(&options);

    log_server_start(start_time, options.host, local_addr, options.base.as_deref());

    axum::serve(listener, router.into_make_service()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{body::Body, http::Request};
    use tower::ServiceExt;
    use tracing::{
        Subscriber,
        span::{Attributes, Id},
    };
    use tracing_subscriber::{
        Layer,
        layer::{Context, SubscriberExt},
    };

    struct RequestSpans(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for RequestSpans {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            if attrs.metadata().name() == "request" {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn options(dist_dir: &Path, base: Option<&str>) -> PreviewOptions {
        PreviewOptions {
            dist_dir: dist_dir.to_path_buf(),
            host: false,
            spa: false,
            base: base.map(str::to_string),
        }
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn dist() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Home</h1>").unwrap();
        std::fs::write(dir.path().join("404.html"), "<h1>Gone</h1>").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_fallback_serves_404_page() {
        let dir = dist();

        let response = fallback_response(dir.path(), false).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(response).await, "<h1>Gone</h1>");
    }

    #[tokio::test]
    async fn test_fallback_serves_index_in_spa_mode() {
        let dir = dist();

        let response = fallback_response(dir.path(), true).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await, "<h1>Home</h1>");
    }

    #[tokio::test]
    async fn test_fallback_without_404_page() {
        let dir = tempfile::tempdir().unwrap();

        let response = fallback_response(dir.path(), false).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body(response).await.contains("404 - Not Found"));
    }

    #[tokio::test]
    async fn test_each_request_is_traced_once() {
        let dir = dist();
        let spans = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(RequestSpans(spans.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let response = preview_router(&options(dir.path(), None))
            .oneshot(get("/"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(spans.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_router_serves_under_base() {
        let dir = dist();
        let router = preview_router(&options(dir.path(), Some("/matsu.fi")));

        let response = router.clone().oneshot(get("/matsu.fi/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await, "<h1>Home</h1>");

        let response = router.oneshot(get("/elsewhere")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(response).await, "<h1>Gone</h1>");
    }
}
