use crate::logger;
use crate::remote::embedding_client::{EmbeddingResponse, EmbeddingService};
use crate::types::sentence_data::{Point, Rgb, SeriesPair};
use anyhow::{anyhow, Result};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

/// A sentence pair to place next to the precomputed ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub active: String,
    pub passive: String,
}

impl LookupRequest {
    /// Both halves are required; one without the other means no lookup.
    pub fn from_parts(active: Option<String>, passive: Option<String>) -> Option<Self> {
        match (active, passive) {
            (Some(active), Some(passive)) => Some(Self { active, passive }),
            _ => None,
        }
    }
}

/// Appends the looked-up pair as one extension point on each series.
pub fn extend(mut pair: SeriesPair, request: &LookupRequest, response: &EmbeddingResponse) -> SeriesPair {
    pair.push_pair(
        Point {
            x: response.active.x,
            y: response.active.y,
            label: request.active.clone(),
            border: Rgb::EXTENSION_BORDER,
            fill: Rgb::EXTENSION_FILL,
        },
        Point {
            x: response.passive.x,
            y: response.passive.y,
            label: request.passive.clone(),
            border: Rgb::EXTENSION_BORDER,
            fill: Rgb::EXTENSION_FILL,
        },
    );
    pair
}

/// A lookup running on a worker thread. The worker sends exactly one result.
pub struct PendingLookup {
    request: LookupRequest,
    rx: Receiver<Result<EmbeddingResponse>>,
}

impl PendingLookup {
    /// `notify` runs on the worker once the result is queued (the UI uses it
    /// to request a repaint).
    pub fn spawn<N>(service: Arc<dyn EmbeddingService>, request: LookupRequest, notify: N) -> Self
    where
        N: FnOnce() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let worker_request = request.clone();
        logger::debug(&format!(
            "Looking up embeddings for \"{}\" / \"{}\"",
            request.active, request.passive
        ));
        thread::spawn(move || {
            let result = service.embed(&worker_request.active, &worker_request.passive);
            // receiver gone means the session was dropped
            let _ = tx.send(result);
            notify();
        });
        Self { request, rx }
    }

    pub fn request(&self) -> &LookupRequest {
        &self.request
    }

    /// `None` while the worker is still running.
    pub fn poll(&self) -> Option<Result<EmbeddingResponse>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(anyhow!("Embedding lookup worker exited without a result")))
            }
        }
    }
}
