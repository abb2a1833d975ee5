//! Tests of the HTTP data source against a local server.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::StatusCode;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::header;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use storefront_grid::error::SourceError;
use storefront_grid::model::RowId;
use storefront_grid::resources::Resource;
use storefront_grid::source::DataSource;
use storefront_grid::source::HttpSource;
use storefront_grid::surface::MemoryHost;
use storefront_grid::{DataGrid, LoadOutcome};

/// Headers of a request received by the test server.
#[derive(Debug, Clone)]
struct Seen {
    path: String,
    accept: Option<String>,
    cache_control: Option<String>,
    cookie: Option<String>,
}

type Log = Arc<Mutex<Vec<Seen>>>;

fn reply(path: &str) -> (StatusCode, &'static str) {
    match path {
        "/api/users" => (
            StatusCode::OK,
            r#"[{"id":1,"firstname":"Marie","lastname":"Durand","is_email_verified":true}]"#,
        ),
        "/api/product/brands" => (
            StatusCode::OK,
            r#"[{"id":"b2","name":"Puma"},{"id":"b1","name":"Adidas"}]"#,
        ),
        "/api/forbidden" => (StatusCode::FORBIDDEN, r#"{"error":"Admin required"}"#),
        "/api/private" => (StatusCode::UNAUTHORIZED, r#"{"message":"Session expired"}"#),
        "/api/object" => (StatusCode::OK, r#"{"id":1}"#),
        "/api/no-id" => (StatusCode::OK, r#"[{"name":"orphan"}]"#),
        "/api/slow" => (StatusCode::OK, "[]"),
        _ => (StatusCode::NOT_FOUND, "Not Found"),
    }
}

async fn serve() -> (SocketAddr, Log) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    let server_log = log.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let log = server_log.clone();
            let service = service_fn(move |req: Request<Incoming>| {
                let log = log.clone();
                async move {
                    let text = |name: header::HeaderName| {
                        req.headers()
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string)
                    };
                    let path = req.uri().path().to_string();
                    log.lock().unwrap().push(Seen {
                        path: path.clone(),
                        accept: text(header::ACCEPT),
                        cache_control: text(header::CACHE_CONTROL),
                        cookie: text(header::COOKIE),
                    });
                    if path == "/api/slow" {
                        tokio::time::sleep(Duration::from_millis(500)).await;
                    }
                    let (status, body) = reply(&path);
                    Ok::<_, Infallible>(
                        Response::builder()
                            .status(status)
                            .header(header::CONTENT_TYPE, "application/json")
                            .body(Full::new(Bytes::from(body)))
                            .unwrap(),
                    )
                }
            });
            tokio::spawn(async move {
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    (addr, log)
}

fn source(addr: SocketAddr) -> HttpSource {
    HttpSource::builder()
        .base_url(format!("http://{}/api/", addr))
        .session("abc123")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetch_sends_headers_and_parses_rows() {
    let (addr, log) = serve().await;
    let rows = source(addr).fetch("/users", true).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id(), &RowId::Number(1));
    assert_eq!(rows[0].get("lastname").unwrap(), "Durand");

    let seen = log.lock().unwrap()[0].clone();
    assert_eq!(seen.path, "/api/users");
    assert_eq!(seen.accept.as_deref(), Some("application/json"));
    assert_eq!(seen.cache_control.as_deref(), Some("no-cache"));
    assert_eq!(seen.cookie.as_deref(), Some("token=abc123"));
}

#[tokio::test]
async fn test_cookie_only_with_credentials() {
    let (addr, log) = serve().await;
    source(addr).fetch("product/brands", false).await.unwrap();
    assert_eq!(log.lock().unwrap()[0].cookie, None);
}

#[tokio::test]
async fn test_error_statuses() {
    let (addr, _log) = serve().await;
    let source = source(addr);

    let err = source.fetch("/forbidden", true).await.unwrap_err();
    assert_eq!(err.status_code(), Some(403));
    assert_eq!(err.to_string(), "HTTP 403: Admin required");

    let err = source.fetch("/private", true).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Unauthorized: Session expired");

    let err = source.fetch("/missing", true).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 404: Not Found");
}

#[tokio::test]
async fn test_malformed_bodies() {
    let (addr, _log) = serve().await;
    let source = source(addr);

    let err = source.fetch("/object", false).await.unwrap_err();
    assert!(matches!(err, SourceError::Parse { body: Some(_), .. }));

    let err = source.fetch("/no-id", false).await.unwrap_err();
    assert!(matches!(err, SourceError::Parse { .. }));
}

#[tokio::test]
async fn test_timeout() {
    let (addr, _log) = serve().await;
    let source = HttpSource::builder()
        .base_url(format!("http://{}/api", addr))
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = source.fetch("/slow", false).await.unwrap_err();
    assert!(matches!(err, SourceError::Timeout(_)));
}

#[tokio::test]
async fn test_resource_grid_loads_over_http() {
    let (addr, log) = serve().await;
    let mut host = MemoryHost::new();
    let frames = host.add_container(Resource::Brands.container_id());

    let config = Resource::Brands
        .config(&format!("http://{}", addr))
        .source(Arc::new(source(addr)));
    let mut grid = DataGrid::new(&mut host, Resource::Brands.container_id(), config).unwrap();

    assert_eq!(grid.load().await, LoadOutcome::Applied { rows: 2 });
    let view = frames.last().unwrap();
    assert_eq!(view.rows()[0].cells[0].as_str(), "Adidas");
    assert_eq!(view.rows()[0].id, RowId::from("b1"));
    assert_eq!(log.lock().unwrap()[0].cookie, None);
}
