//! Startup flow: base series in, optional lookup, chart out.
//!
//! When a sentence pair is supplied the chart is withheld until the lookup
//! worker answers. A failed lookup still releases the chart with the base
//! data and records the error for the banner.

use crate::config::Config;
use crate::logger;
use crate::parsing::csv_loader::load_records;
use crate::plotting::reshape::reshape_with_limit;
use crate::remote::embedding_client::EmbeddingService;
use crate::remote::extender::{extend, LookupRequest, PendingLookup};
use crate::types::sentence_data::SeriesPair;
use anyhow::Result;
use std::sync::Arc;

/// Loads the CSV named in `config` and reshapes it under its row limit.
pub fn load_base_series(config: &Config) -> Result<SeriesPair> {
    let records = load_records(&config.data_path)?;
    if records.len() > config.row_limit {
        logger::debug(&format!(
            "Showing the first {} of {} rows",
            config.row_limit,
            records.len()
        ));
    }
    Ok(reshape_with_limit(&records, config.row_limit))
}

enum ChartState {
    AwaitingLookup(PendingLookup),
    Ready(SeriesPair),
}

/// Text mirrored into the side-panel form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub active: String,
    pub passive: String,
}

pub struct Session {
    base: SeriesPair,
    state: ChartState,
    service: Arc<dyn EmbeddingService>,
    lookup_error: Option<String>,
    pub form: FormFields,
}

impl Session {
    /// `notify` runs once, when the startup lookup (if any) finishes; the UI
    /// passes a repaint request. Later lookups bring their own via [`Session::submit`].
    pub fn start<N>(
        base: SeriesPair,
        request: Option<LookupRequest>,
        service: Arc<dyn EmbeddingService>,
        notify: N,
    ) -> Self
    where
        N: FnOnce() + Send + 'static,
    {
        let mut session = Self {
            state: ChartState::Ready(base.clone()),
            base,
            service,
            lookup_error: None,
            form: FormFields::default(),
        };
        if let Some(request) = request {
            session.begin_lookup(request, notify);
        }
        session
    }

    fn begin_lookup<N>(&mut self, request: LookupRequest, notify: N)
    where
        N: FnOnce() + Send + 'static,
    {
        self.form = FormFields {
            active: request.active.clone(),
            passive: request.passive.clone(),
        };
        self.lookup_error = None;
        self.state = ChartState::AwaitingLookup(PendingLookup::spawn(
            Arc::clone(&self.service),
            request,
            notify,
        ));
    }

    /// Starts a new lookup from the form, replacing any earlier extension.
    /// Returns `false` (and does nothing) while another lookup is in flight.
    pub fn submit<N>(&mut self, request: LookupRequest, notify: N) -> bool
    where
        N: FnOnce() + Send + 'static,
    {
        if self.is_waiting() {
            return false;
        }
        self.begin_lookup(request, notify);
        true
    }

    /// Collects a finished lookup, if any. Returns `true` when the chart
    /// data changed.
    pub fn poll(&mut self) -> bool {
        let ChartState::AwaitingLookup(pending) = &self.state else {
            return false;
        };
        let Some(result) = pending.poll() else {
            return false;
        };

        let request = pending.request().clone();
        let series = match result {
            Ok(response) => {
                logger::success(&format!(
                    "Embedded \"{}\" at ({:.3}, {:.3}) and \"{}\" at ({:.3}, {:.3})",
                    request.active,
                    response.active.x,
                    response.active.y,
                    request.passive,
                    response.passive.x,
                    response.passive.y
                ));
                extend(self.base.clone(), &request, &response)
            }
            Err(e) => {
                let msg = format!("Embedding lookup failed: {:#}", e);
                logger::error(&msg);
                self.lookup_error = Some(msg);
                self.base.clone()
            }
        };
        self.state = ChartState::Ready(series);
        true
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state, ChartState::AwaitingLookup(_))
    }

    /// The series to draw, or `None` until a pending lookup resolves.
    pub fn series(&self) -> Option<&SeriesPair> {
        match &self.state {
            ChartState::Ready(series) => Some(series),
            ChartState::AwaitingLookup(_) => None,
        }
    }

    pub fn lookup_error(&self) -> Option<&str> {
        self.lookup_error.as_deref()
    }

    pub fn base(&self) -> &SeriesPair {
        &self.base
    }
}
