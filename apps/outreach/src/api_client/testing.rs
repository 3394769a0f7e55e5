use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;

use super::{ApiClient, ApiRequest, Transport};
use crate::coordinator::{ManualClock, RequestCoordinator, DEFAULT_CACHE_WINDOW};
use crate::errors::ApiError;

type Responder = dyn Fn(&ApiRequest) -> Result<Value, ApiError> + Send + Sync;

/// In-memory backend. Records every request and answers through `respond`.
/// When gated, the first request waits until the returned sender fires.
pub(crate) struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    respond: Box<Responder>,
    gate: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
}

impl MockTransport {
    pub(crate) fn new(
        respond: impl Fn(&ApiRequest) -> Result<Value, ApiError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            respond: Box::new(respond),
            gate: tokio::sync::Mutex::new(None),
        }
    }

    pub(crate) fn gated(self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let this = Self {
            gate: tokio::sync::Mutex::new(Some(rx)),
            ..self
        };
        (this, tx)
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let gate = self.gate.lock().await.take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        (self.respond)(&request)
    }
}

/// Client over `transport` with a manual clock, for deterministic cache tests.
pub(crate) fn client_with(transport: Arc<MockTransport>) -> (ApiClient, ManualClock) {
    let clock = ManualClock::new();
    let coordinator = RequestCoordinator::with_clock(DEFAULT_CACHE_WINDOW, Arc::new(clock.clone()));
    (ApiClient::new(transport, coordinator), clock)
}

pub(crate) const SHORT: Duration = Duration::from_millis(200);
