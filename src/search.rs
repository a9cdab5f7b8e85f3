use crate::parser::LogRecord;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub direction: SearchDirection,
    pub match_case: bool,
    pub regex: bool,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: SearchDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn match_case(mut self, match_case: bool) -> Self {
        self.match_case = match_case;
        self
    }

    pub fn regex(mut self, regex: bool) -> Self {
        self.regex = regex;
        self
    }
}

/// A search result: the view row found and whether the scan had to wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    pub position: usize,
    pub wrapped: bool,
}

enum Needle {
    Text(String),
    Pattern(Regex),
}

/// Linear text search over a filtered view of records
///
/// The searched text of a record is its common header followed by its
/// message; records whose text is blank are skipped.
pub struct Searcher<'a> {
    records: &'a [LogRecord],
    view: &'a [usize],
    needle: Option<Needle>,
    options: SearchOptions,
}

impl<'a> Searcher<'a> {
    /// Prepares a search. A blank `text` makes every search come back empty.
    pub fn new(
        records: &'a [LogRecord],
        view: &'a [usize],
        text: &str,
        options: SearchOptions,
    ) -> Result<Self, SearchError> {
        let needle = if text.trim().is_empty() {
            None
        } else if options.regex {
            let regex = RegexBuilder::new(text)
                .case_insensitive(!options.match_case)
                .build()?;
            Some(Needle::Pattern(regex))
        } else if options.match_case {
            Some(Needle::Text(text.to_string()))
        } else {
            Some(Needle::Text(text.to_lowercase()))
        };

        Ok(Self {
            records,
            view,
            needle,
            options,
        })
    }

    /// Scans from view row `from` (inclusive) towards the end or the start of
    /// the view, then wraps around to cover the rest.
    pub fn find(&self, from: usize) -> Option<SearchHit> {
        let bound = match self.options.direction {
            SearchDirection::Forward => from,
            SearchDirection::Backward => from.saturating_add(1),
        };
        self.scan(bound.min(self.view.len()))
    }

    /// Find next/previous relative to the current row. Without a current row
    /// the scan starts at the top (forward) or bottom (backward) of the view.
    pub fn find_next(&self, current: Option<usize>) -> Option<SearchHit> {
        let len = self.view.len();
        let bound = match (self.options.direction, current) {
            (SearchDirection::Forward, None) => 0,
            (SearchDirection::Backward, None) => len,
            (SearchDirection::Forward, Some(row)) => row.saturating_add(1),
            (SearchDirection::Backward, Some(row)) => row,
        };
        self.scan(bound.min(len))
    }

    /// `bound` splits the view: forward scans `bound..len` then `0..bound`,
    /// backward scans `0..bound` reversed then `bound..len` reversed.
    fn scan(&self, bound: usize) -> Option<SearchHit> {
        self.needle.as_ref()?;
        let len = self.view.len();

        let matching = |row: &usize| self.is_match(*row);
        let hit = match self.options.direction {
            SearchDirection::Forward => (bound..len)
                .find(matching)
                .map(|row| (row, false))
                .or_else(|| (0..bound).find(matching).map(|row| (row, true))),
            SearchDirection::Backward => (0..bound)
                .rev()
                .find(matching)
                .map(|row| (row, false))
                .or_else(|| (bound..len).rev().find(matching).map(|row| (row, true))),
        };

        hit.map(|(position, wrapped)| SearchHit { position, wrapped })
    }

    fn is_match(&self, row: usize) -> bool {
        let Some(record) = self.view.get(row).and_then(|&idx| self.records.get(idx)) else {
            return false;
        };
        let text = record.display_text();
        if text.trim().is_empty() {
            return false;
        }
        match &self.needle {
            Some(Needle::Pattern(regex)) => regex.is_match(&text),
            Some(Needle::Text(needle)) if self.options.match_case => text.contains(needle.as_str()),
            Some(Needle::Text(needle)) => text.to_lowercase().contains(needle.as_str()),
            None => false,
        }
    }
}

/// One-shot search over `view` starting at row `from`
pub fn find_in_view(
    records: &[LogRecord],
    view: &[usize],
    from: usize,
    text: &str,
    options: SearchOptions,
) -> Result<Option<SearchHit>, SearchError> {
    Ok(Searcher::new(records, view, text, options)?.find(from))
}
