use crate::config::ReaderConfig;
use crate::parser::{LogRecord, ParseError};
use crate::search::{SearchError, SearchHit, SearchOptions, Searcher};
use crate::view::{ContextWindow, FilterRequest, FilteredView, ViewRefresher, context_window};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

/// One loaded dataset: the immutable records plus their live filtered view
///
/// Must be created inside a Tokio runtime.
pub struct LogSession {
    records: Arc<[LogRecord]>,
    refresher: ViewRefresher,
}

impl LogSession {
    pub fn from_records(records: Vec<LogRecord>, debounce: Duration) -> Self {
        let records: Arc<[LogRecord]> = records.into();
        let refresher = ViewRefresher::spawn(Arc::clone(&records), debounce);
        Self { records, refresher }
    }

    /// Parses an in-memory batch of lines with the configured grammar
    pub fn load_lines<I, S>(lines: I, config: &ReaderConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records = config.line_parser().parse_lines(lines);
        Self::from_records(records, config.debounce())
    }

    pub fn load_file(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<Self, ParseError> {
        let records = config.line_parser().parse_file(path)?;
        Ok(Self::from_records(records, config.debounce()))
    }

    /// Loads `path`, or the configured sample lines when there is no path or it cannot be read
    pub fn load_file_or_sample(path: Option<&Path>, config: &ReaderConfig) -> Self {
        if let Some(path) = path {
            match Self::load_file(path, config) {
                Ok(session) => return session,
                Err(err) => warn!(error = %err, "falling back to sample lines"),
            }
        }
        let session = Self::load_lines(&config.sample_lines, config);
        info!(records = session.records.len(), "loaded sample lines");
        session
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// The latest published view
    pub fn view(&self) -> Arc<FilteredView> {
        self.refresher.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<FilteredView>> {
        self.refresher.subscribe()
    }

    /// Asks for a new view; the result is published asynchronously
    pub fn submit(&self, request: FilterRequest) {
        self.refresher.submit(request);
    }

    pub async fn wait_for_version(&self, version: u64) -> Option<Arc<FilteredView>> {
        self.refresher.wait_for_version(version).await
    }

    /// Searches the current view from row `from`
    pub fn search(
        &self,
        from: usize,
        text: &str,
        options: SearchOptions,
    ) -> Result<Option<SearchHit>, SearchError> {
        let view = self.view();
        let searcher = Searcher::new(&self.records, view.rows(), text, options)?;
        Ok(searcher.find(from))
    }

    /// Find next/previous relative to the selected view row
    pub fn find_next(
        &self,
        current: Option<usize>,
        text: &str,
        options: SearchOptions,
    ) -> Result<Option<SearchHit>, SearchError> {
        let view = self.view();
        let searcher = Searcher::new(&self.records, view.rows(), text, options)?;
        Ok(searcher.find_next(current))
    }

    /// Unfiltered records around `model_index`
    pub fn context(&self, model_index: usize, radius: usize) -> Option<ContextWindow<'_>> {
        context_window(&self.records, model_index, radius)
    }

    pub async fn shutdown(self) {
        self.refresher.shutdown().await;
    }
}
