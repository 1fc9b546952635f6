use std::sync::{Arc, Mutex};

use atlas_content_client::{
    ClientConfig, ContentClient, ContentRecord, RestErrorKind, SubmissionError,
};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use bytes::Bytes;
use sonic_rs::json;
use tokio::net::TcpListener;

const API_KEY: &str = "e2e-key";

#[derive(Clone, Default)]
struct AppState {
    received: Arc<Mutex<Vec<(Option<String>, Bytes)>>>,
}

#[tokio::test]
async fn e2e_created_response_is_parsed() {
    let server = TestServer::start("/api/content", created_handler).await;
    let client = ContentClient::new(ClientConfig::new(server.url("/api"), API_KEY));

    let resource = client
        .submit(&ContentRecord::new("T", "B", "business").with_tag("x"))
        .await
        .expect("created response should parse");

    assert_eq!(resource, json!({"id": "abc123", "title": "X"}));

    let received = server.state.received.lock().expect("state mutex").clone();
    assert_eq!(received.len(), 1);
    let (api_key, body) = &received[0];
    assert_eq!(api_key.as_deref(), Some(API_KEY));
    assert_eq!(
        &body[..],
        br#"{"title":"T","body":"B","category":"business","status":"published","tags":["x"],"sources":[]}"#
    );
}

#[tokio::test]
async fn e2e_forbidden_is_rejected_with_body_text() {
    let server = TestServer::start("/api/content", forbidden_handler).await;
    let client = ContentClient::new(ClientConfig::new(server.url("/api"), API_KEY));

    let err = client
        .submit(&ContentRecord::new("T", "B", "business"))
        .await
        .expect_err("403 should be rejected");

    match err {
        SubmissionError::Rejected {
            status_code,
            body_text,
        } => {
            assert_eq!(status_code, 403);
            assert_eq!(body_text, "forbidden");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn e2e_refused_connection_is_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = ContentClient::new(ClientConfig::new(format!("http://{addr}/api"), API_KEY));
    let err = client
        .submit(&ContentRecord::new("T", "B", "business"))
        .await
        .expect_err("nothing is listening");

    assert!(matches!(
        err,
        SubmissionError::TransportFailure {
            kind: RestErrorKind::Connect,
            ..
        }
    ));
}

struct TestServer {
    base_url: String,
    state: AppState,
    task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start<H, T>(path: &str, handler: H) -> Self
    where
        H: axum::handler::Handler<T, AppState>,
        T: 'static,
    {
        let state = AppState::default();
        let app = Router::new()
            .route(path, post(handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        let base_url = format!("http://{}", addr);

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url,
            state,
            task,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn record(state: &AppState, headers: &HeaderMap, body: Bytes) {
    let api_key = headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state
        .received
        .lock()
        .expect("state mutex")
        .push((api_key, body));
}

async fn created_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    record(&state, &headers, body);
    (StatusCode::CREATED, r#"{"id": "abc123", "title": "X"}"#)
}

async fn forbidden_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    record(&state, &headers, body);
    (StatusCode::FORBIDDEN, "forbidden")
}
