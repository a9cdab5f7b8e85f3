//! Filtered views over an immutable record sequence
//!
//! A [`ViewRefresher`] owns a single background task that recomputes the
//! view whenever a new [`FilterRequest`] arrives. Requests are debounced:
//! only the last one submitted within the quiet window is evaluated. Each
//! finished pass is published as a new immutable [`FilteredView`] snapshot,
//! so readers always see either the previous or the next complete view.

use crate::filter::{Combine, FilterSet};
use crate::level::LogLevel;
use crate::parser::LogRecord;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Ordered record positions that passed the active filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    version: u64,
    rows: Vec<usize>,
}

impl FilteredView {
    pub fn new(version: u64, rows: Vec<usize>) -> Self {
        Self { version, rows }
    }

    /// Version 0: every record, before any filter has run
    pub fn unfiltered(len: usize) -> Self {
        Self::new(0, (0..len).collect())
    }

    /// Incremented by one for every published recomputation
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Record position shown at view row `row`
    pub fn model_index(&self, row: usize) -> Option<usize> {
        self.rows.get(row).copied()
    }

    /// View row showing record position `model_index`, if it passed the filter
    pub fn row_of(&self, model_index: usize) -> Option<usize> {
        self.rows.binary_search(&model_index).ok()
    }
}

/// Everything the user selects to filter the records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub query: String,
    pub min_level: LogLevel,
    pub combine: Combine,
}

impl FilterRequest {
    pub fn new(query: impl Into<String>, min_level: LogLevel, combine: Combine) -> Self {
        Self {
            query: query.into(),
            min_level,
            combine,
        }
    }

    pub fn filter_set(&self) -> FilterSet {
        FilterSet::from_query(&self.query, self.min_level, self.combine)
    }
}

/// Debounced background recomputation of a [`FilteredView`]
///
/// Must be created inside a Tokio runtime.
pub struct ViewRefresher {
    requests: mpsc::UnboundedSender<FilterRequest>,
    snapshots: watch::Receiver<Arc<FilteredView>>,
    worker: JoinHandle<()>,
}

impl ViewRefresher {
    pub fn spawn(records: Arc<[LogRecord]>, debounce: Duration) -> Self {
        let (requests, request_rx) = mpsc::unbounded_channel();
        let (publisher, snapshots) = watch::channel(Arc::new(FilteredView::unfiltered(records.len())));
        let worker = tokio::spawn(run_worker(records, request_rx, publisher, debounce));

        Self {
            requests,
            snapshots,
            worker,
        }
    }

    /// Queues a recomputation; it supersedes any request still in its quiet window
    pub fn submit(&self, request: FilterRequest) {
        if self.requests.send(request).is_err() {
            warn!("filter worker is gone, request dropped");
        }
    }

    /// The latest published view
    pub fn current(&self) -> Arc<FilteredView> {
        Arc::clone(&self.snapshots.borrow())
    }

    /// A receiver notified on every publication
    pub fn subscribe(&self) -> watch::Receiver<Arc<FilteredView>> {
        self.snapshots.clone()
    }

    /// Waits until a view with at least `version` is published.
    /// Returns `None` if the worker stops first.
    pub async fn wait_for_version(&self, version: u64) -> Option<Arc<FilteredView>> {
        let mut snapshots = self.snapshots.clone();
        let view = snapshots.wait_for(|view| view.version() >= version).await.ok()?;
        Some(Arc::clone(&view))
    }

    /// Stops accepting requests, lets the worker finish the last one and waits for it
    pub async fn shutdown(self) {
        drop(self.requests);
        if let Err(err) = self.worker.await {
            warn!(error = %err, "filter worker ended abnormally");
        }
    }
}

async fn run_worker(
    records: Arc<[LogRecord]>,
    mut requests: mpsc::UnboundedReceiver<FilterRequest>,
    publisher: watch::Sender<Arc<FilteredView>>,
    debounce: Duration,
) {
    let mut version = 0;

    while let Some(mut request) = requests.recv().await {
        let mut closed = false;
        loop {
            match tokio::time::timeout(debounce, requests.recv()).await {
                Ok(Some(newer)) => {
                    debug!(superseded = %request.query, query = %newer.query, "filter request superseded");
                    request = newer;
                }
                Ok(None) => {
                    closed = true;
                    break;
                }
                Err(_) => break,
            }
        }

        let filter = request.filter_set();
        let model = Arc::clone(&records);
        let rows = match tokio::task::spawn_blocking(move || filter.evaluate(&model)).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(error = %err, query = %request.query, "filter pass failed");
                if closed {
                    break;
                }
                continue;
            }
        };

        version += 1;
        debug!(
            version,
            rows = rows.len(),
            query = %request.query,
            min_level = %request.min_level,
            combine = %request.combine,
            "publishing filtered view"
        );
        publisher.send_replace(Arc::new(FilteredView::new(version, rows)));

        if closed {
            break;
        }
    }
}

/// A slice of the unfiltered records around one position
#[derive(Debug, Clone, Copy)]
pub struct ContextWindow<'a> {
    pub records: &'a [LogRecord],
    /// Position of `records[0]` in the full sequence
    pub start: usize,
    /// Index of the requested record inside `records`
    pub focus: usize,
}

/// Up to `radius` records on each side of `model_index`, clamped to the sequence
pub fn context_window(
    records: &[LogRecord],
    model_index: usize,
    radius: usize,
) -> Option<ContextWindow<'_>> {
    if model_index >= records.len() {
        return None;
    }
    let start = model_index.saturating_sub(radius);
    let end = model_index.saturating_add(radius).min(records.len() - 1);
    Some(ContextWindow {
        records: &records[start..=end],
        start,
        focus: model_index - start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_view_lists_every_row() {
        let view = FilteredView::unfiltered(4);
        assert_eq!(view.version(), 0);
        assert_eq!(view.rows(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_row_lookups() {
        let view = FilteredView::new(3, vec![1, 4, 9]);
        assert_eq!(view.model_index(1), Some(4));
        assert_eq!(view.model_index(3), None);
        assert_eq!(view.row_of(9), Some(2));
        assert_eq!(view.row_of(5), None);
    }
}
