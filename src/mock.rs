use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};

use bytes::Bytes;
use serde::Serialize;

use super::adapter::{
    RestBytes, RestError, RestErrorKind, RestFuture, RestRequest, RestResponse, RestResult,
    RestTransport,
};

/// What the mock does with the next request, before any queued response is
/// consulted.
#[derive(Clone, Debug, Default)]
pub enum MockBehavior {
    #[default]
    Pass,
    Fail {
        kind: RestErrorKind,
        reason: String,
    },
}

impl MockBehavior {
    pub fn pass() -> Self {
        Self::Pass
    }

    pub fn fail(kind: RestErrorKind, reason: impl Into<String>) -> Self {
        Self::Fail {
            kind,
            reason: reason.into(),
        }
    }

    pub fn connect_error(reason: impl Into<String>) -> Self {
        Self::fail(RestErrorKind::Connect, reason)
    }

    pub fn receive_error(reason: impl Into<String>) -> Self {
        Self::fail(RestErrorKind::Receive, reason)
    }

    pub fn timeout_error(reason: impl Into<String>) -> Self {
        Self::fail(RestErrorKind::Timeout, reason)
    }
}

#[derive(Clone, Debug)]
pub struct MockResponse {
    pub status: u16,
    pub body: RestBytes,
}

impl MockResponse {
    pub fn new(status: u16, body: impl Into<RestBytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, body.into())
    }

    pub fn json<T: Serialize>(status: u16, payload: &T) -> RestResult<Self> {
        let body = sonic_rs::to_vec(payload)?;
        Ok(Self::new(status, body))
    }

    pub fn created<T: Serialize>(payload: &T) -> RestResult<Self> {
        Self::json(201, payload)
    }
}

#[derive(Clone, Debug)]
pub struct MockRestStateSnapshot {
    pub request_count: usize,
    pub last_url: Option<String>,
    pub last_status: Option<u16>,
    pub last_error: Option<String>,
    pub behavior_remaining: usize,
    pub response_queue_len: usize,
}

#[derive(Debug, Default)]
struct MockRestAdapterState {
    request_count: usize,
    last_url: Option<String>,
    last_status: Option<u16>,
    last_error: Option<String>,
    behaviors: VecDeque<MockBehavior>,
    responses: VecDeque<MockResponse>,
    outbound_log: Vec<RestRequest>,
}

impl MockRestAdapterState {
    fn snapshot(&self) -> MockRestStateSnapshot {
        MockRestStateSnapshot {
            request_count: self.request_count,
            last_url: self.last_url.clone(),
            last_status: self.last_status,
            last_error: self.last_error.clone(),
            behavior_remaining: self.behaviors.len(),
            response_queue_len: self.responses.len(),
        }
    }
}

/// In-memory [`RestTransport`] that answers from a FIFO of queued responses
/// and records every request it receives. An empty queue answers `200` with
/// an empty body.
#[derive(Clone, Debug, Default)]
pub struct MockRestAdapter {
    state: Arc<Mutex<MockRestAdapterState>>,
}

impl MockRestAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behaviors(behaviors: impl IntoIterator<Item = MockBehavior>) -> Self {
        let adapter = Self::new();
        adapter.lock().behaviors.extend(behaviors);
        adapter
    }

    fn lock(&self) -> MutexGuard<'_, MockRestAdapterState> {
        self.state.lock().expect("mock-restapi mutex poisoned")
    }

    pub fn snapshot(&self) -> MockRestStateSnapshot {
        self.lock().snapshot()
    }

    pub fn push_behavior(&self, behavior: MockBehavior) {
        self.lock().behaviors.push_back(behavior);
    }

    pub fn queue_response(&self, response: MockResponse) {
        self.lock().responses.push_back(response);
    }

    pub fn queue_text(&self, status: u16, body: impl Into<String>) {
        self.queue_response(MockResponse::text(status, body));
    }

    pub fn outbound_requests(&self) -> Vec<RestRequest> {
        self.lock().outbound_log.clone()
    }

    pub fn last_request(&self) -> Option<RestRequest> {
        self.lock().outbound_log.last().cloned()
    }
}

impl RestTransport for MockRestAdapter {
    fn execute(&self, request: RestRequest) -> RestFuture<RestResult<RestResponse>> {
        let adapter = self.clone();
        Box::pin(async move {
            let start = Instant::now();
            let mut state = adapter.lock();
            state.request_count += 1;
            state.last_url = Some(request.url.clone());
            state.outbound_log.push(request);

            let behavior = state.behaviors.pop_front().unwrap_or_default();
            if let MockBehavior::Fail { kind, reason } = behavior {
                state.last_status = None;
                state.last_error = Some(reason.clone());
                return Err(RestError::new(kind, reason));
            }

            let (status, body) = match state.responses.pop_front() {
                Some(response) => (response.status, response.body),
                None => (200, Bytes::new()),
            };
            state.last_status = Some(status);
            state.last_error = None;

            Ok(RestResponse {
                status,
                body,
                elapsed: start.elapsed(),
            })
        })
    }
}
