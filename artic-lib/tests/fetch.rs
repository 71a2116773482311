//! Integration tests for page fetching against a local stub of the artworks API.
//!
//! Each test binds an HTTP/1 server on `127.0.0.1:0` that answers
//! `GET /api/v1/artworks?page=N` from a table of canned responses and records
//! every query string it receives.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use artic_lib::ArticClient;
use artic_lib::api::query::PageIndex;
use artic_lib::error::ApiError;
use artic_lib::error::Error;
use artic_lib::table::Applied;
use artic_lib::table::FetchOutcome;
use artic_lib::table::TableConfig;
use artic_lib::table::TableController;
use artic_lib::table::TableEvent;
use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

// =============================================================================
// Stub server
// =============================================================================

#[derive(Clone)]
struct Route {
    status: u16,
    body: String,
    delay: Duration,
}

impl Route {
    fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

struct StubServer {
    endpoint: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    async fn start(routes: impl IntoIterator<Item = (usize, Route)>) -> Self {
        let routes: Arc<HashMap<usize, Route>> = Arc::new(routes.into_iter().collect());
        let queries = Arc::new(Mutex::new(Vec::new()));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");

        let seen = queries.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = routes.clone();
                let seen = seen.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let routes = routes.clone();
                        let seen = seen.clone();
                        async move {
                            let query = req.uri().query().unwrap_or_default().to_string();
                            seen.lock().unwrap().push(query.clone());

                            let route = query
                                .split('&')
                                .find_map(|pair| pair.strip_prefix("page="))
                                .and_then(|n| n.parse::<usize>().ok())
                                .and_then(|n| routes.get(&n).cloned())
                                .unwrap_or_else(|| Route::status(404, ""));

                            if !route.delay.is_zero() {
                                tokio::time::sleep(route.delay).await;
                            }

                            Ok::<_, Infallible>(
                                Response::builder()
                                    .status(route.status)
                                    .header("content-type", "application/json")
                                    .body(Full::new(Bytes::from(route.body)))
                                    .unwrap(),
                            )
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self {
            endpoint: format!("http://{}/api/v1/artworks", addr),
            queries,
        }
    }

    fn client(&self) -> ArticClient {
        ArticClient::builder()
            .endpoint(&self.endpoint)
            .build()
            .expect("valid stub endpoint")
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

fn artworks_body(page: usize, rows: usize, total: Option<u64>) -> String {
    let data: Vec<_> = (0..rows)
        .map(|i| {
            serde_json::json!({
                "title": format!("Artwork {}-{}", page, i),
                "place_of_origin": "France",
                "artist_display": "Claude Monet\nFrench, 1840-1926",
                "inscriptions": null,
                "date_start": 1890 + i as i64,
                "date_end": 1891 + i as i64,
            })
        })
        .collect();

    let pagination = match total {
        Some(total) => serde_json::json!({ "total": total, "limit": 12, "current_page": page }),
        None => serde_json::json!({ "limit": 12, "current_page": page }),
    };

    serde_json::json!({ "pagination": pagination, "data": data }).to_string()
}

// =============================================================================
// ArticClient
// =============================================================================

#[tokio::test]
async fn test_requests_one_based_page() {
    let server = StubServer::start([(4, Route::ok(artworks_body(4, 12, Some(60))))]).await;
    let client = server.client();

    let page = client.fetch_page(PageIndex::new(3)).await.unwrap();

    assert_eq!(server.queries(), vec!["page=4".to_string()]);
    assert_eq!(page.len(), 12);
    assert_eq!(page.total_count(), Some(60));
    assert_eq!(page.records()[0].title.as_deref(), Some("Artwork 4-0"));
}

#[tokio::test]
async fn test_http_error_status() {
    let server = StubServer::start([(1, Route::status(503, "down for maintenance"))]).await;

    let err = server.client().fetch_page(PageIndex::FIRST).await.unwrap_err();

    match err {
        Error::Api(ApiError::Http { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "down for maintenance");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_bodies() {
    let server = StubServer::start([
        (1, Route::ok("<html>not json</html>")),
        (2, Route::ok(r#"{"data": 5, "pagination": {"total": 1}}"#)),
        (3, Route::ok(r#"{"pagination": {"total": 1}}"#)),
    ])
    .await;
    let client = server.client();

    for index in 0..3 {
        let err = client.fetch_page(PageIndex::new(index)).await.unwrap_err();
        assert!(
            matches!(err, Error::Api(ApiError::Parse { body: Some(_), .. })),
            "page {} should fail to parse, got {:?}",
            index + 1,
            err
        );
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ArticClient::builder()
        .endpoint(format!("http://{}/api/v1/artworks", addr))
        .build()
        .unwrap();

    let err = client.fetch_page(PageIndex::FIRST).await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Network(_))), "got {err:?}");
}

#[tokio::test]
async fn test_timeout() {
    let server = StubServer::start([(
        1,
        Route::ok(artworks_body(1, 1, Some(1))).delayed(Duration::from_secs(5)),
    )])
    .await;
    let client = ArticClient::builder()
        .endpoint(&server.endpoint)
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = client.fetch_page(PageIndex::FIRST).await.unwrap_err();
    assert!(
        matches!(err, Error::Api(ApiError::Timeout(d)) if d == Duration::from_millis(100)),
        "got {err:?}"
    );
}

// =============================================================================
// TableController over ArticClient
// =============================================================================

#[tokio::test]
async fn test_first_page_shows_rows_and_total() {
    let server = StubServer::start([(1, Route::ok(artworks_body(1, 5, Some(60))))]).await;
    let client = server.client();
    let mut table = TableController::new(TableConfig::default());

    let outcome = table.start().run(&client).await;
    assert_eq!(table.apply(outcome), Applied::Updated);

    assert_eq!(server.queries(), vec!["page=1".to_string()]);
    assert_eq!(table.records().len(), 5);
    assert_eq!(table.total_records(), Some(60));
    assert_eq!(table.first_row(), 0);
}

#[tokio::test]
async fn test_page_change_moves_offset() {
    let server = StubServer::start([
        (1, Route::ok(artworks_body(1, 12, Some(60)))),
        (4, Route::ok(artworks_body(4, 12, Some(60)))),
    ])
    .await;
    let client = server.client();
    let mut table = TableController::new(TableConfig::default());
    table.refresh(&client).await;

    let request = table.handle(TableEvent::Page { page: Some(3) }).unwrap();
    let outcome = request.run(&client).await;
    table.apply(outcome);

    assert_eq!(server.queries().last().map(String::as_str), Some("page=4"));
    assert_eq!(table.first_row(), 36);
    assert_eq!(table.records()[0].title.as_deref(), Some("Artwork 4-0"));
}

#[tokio::test]
async fn test_selecting_two_rows() {
    let server = StubServer::start([(1, Route::ok(artworks_body(1, 5, Some(60))))]).await;
    let client = server.client();
    let mut table = TableController::new(TableConfig::default());
    table.refresh(&client).await;

    let picked = table.records()[1..3].to_vec();
    table.handle(TableEvent::Selection(picked));

    assert_eq!(table.selected_count(), 2);
}

#[tokio::test]
async fn test_failed_page_keeps_previous_rows() {
    let server = StubServer::start([(1, Route::ok(artworks_body(1, 5, Some(60))))]).await;
    let client = server.client();
    let mut table = TableController::new(TableConfig::default());
    table.refresh(&client).await;
    let before = table.records().to_vec();

    // Page index 2 is page number 3, which the stub answers with 404.
    let request = table.on_page_change(Some(2)).unwrap();
    let outcome = request.run(&client).await;

    assert_eq!(table.apply(outcome), Applied::Failed);
    assert_eq!(table.records(), before.as_slice());
    assert_eq!(table.total_records(), Some(60));
}

#[tokio::test]
async fn test_missing_total_does_not_crash() {
    let server = StubServer::start([(1, Route::ok(artworks_body(1, 5, None)))]).await;
    let client = server.client();
    let mut table = TableController::new(TableConfig::default());

    assert_eq!(table.refresh(&client).await, Applied::Updated);
    assert_eq!(table.records().len(), 5);
    assert_eq!(table.total_records(), None);
}

#[tokio::test]
async fn test_slow_older_page_never_overwrites_newer() {
    let server = StubServer::start([
        (
            2,
            Route::ok(artworks_body(2, 12, Some(60))).delayed(Duration::from_millis(300)),
        ),
        (3, Route::ok(artworks_body(3, 12, Some(60)))),
    ])
    .await;
    let client = server.client();
    let mut table = TableController::new(TableConfig::default());

    let slow = table.on_page_change(Some(1)).unwrap();
    let fast = table.on_page_change(Some(2)).unwrap();
    assert!(slow.cancel.is_cancelled());

    // Let the superseded request complete anyway, as a response already on
    // the wire would.
    let slow_client = client.clone();
    let slow_task = tokio::spawn(async move {
        FetchOutcome {
            token: slow.token,
            index: slow.index,
            result: slow_client.fetch_page(slow.index).await,
        }
    });
    let fast_outcome = fast.run(&client).await;
    assert_eq!(table.apply(fast_outcome), Applied::Updated);

    let slow_outcome = slow_task.await.unwrap();
    assert!(slow_outcome.result.is_ok(), "slow page should resolve with data");
    assert!(server.queries().contains(&"page=2".to_string()));

    assert_eq!(table.apply(slow_outcome), Applied::Stale);
    assert_eq!(table.page_index(), PageIndex::new(2));
    assert_eq!(table.records()[0].title.as_deref(), Some("Artwork 3-0"));
}

#[tokio::test]
async fn test_superseded_request_is_cancelled_before_sending() {
    let server = StubServer::start([(3, Route::ok(artworks_body(3, 12, Some(60))))]).await;
    let client = server.client();
    let mut table = TableController::new(TableConfig::default());

    let older = table.on_page_change(Some(1)).unwrap();
    let newer = table.on_page_change(Some(2)).unwrap();

    let older_outcome = older.run(&client).await;
    assert!(matches!(older_outcome.result, Err(Error::Cancelled)));
    assert_eq!(table.apply(older_outcome), Applied::Stale);

    let newer_outcome = newer.run(&client).await;
    assert_eq!(table.apply(newer_outcome), Applied::Updated);
    assert_eq!(server.queries(), vec!["page=3".to_string()]);
}
