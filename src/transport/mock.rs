//! Scripted in-memory transport for unit tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::transport::{HttpRequest, HttpResponse, Transport};

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync;

/// Answers every request with `handler` and records what was sent.
pub(crate) struct ScriptedTransport {
    handler: Box<Handler>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// "METHOD url" for each request, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.sent()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.sent.lock().unwrap().push(request.clone());
        (self.handler)(&request)
    }
}
