use super::error::FilterError;
use super::parser::Query;
use super::predicate::Predicate;
use crate::level::LogLevel;
use crate::parser::LogRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the predicates of a [`FilterSet`] are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combine {
    /// Every predicate must match
    #[default]
    And,
    /// At least one predicate must match
    Or,
}

impl fmt::Display for Combine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combine::And => write!(f, "and"),
            Combine::Or => write!(f, "or"),
        }
    }
}

impl FromStr for Combine {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "and" | "&&" => Ok(Combine::And),
            "or" | "||" => Ok(Combine::Or),
            _ => Err(FilterError::UnknownCombine(s.to_string())),
        }
    }
}

/// A list of predicates plus the mode used to combine them
#[derive(Debug, Clone)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
    combine: Combine,
}

impl FilterSet {
    pub fn new(predicates: Vec<Predicate>, combine: Combine) -> Self {
        Self {
            predicates,
            combine,
        }
    }

    /// Decodes `query` into predicates at `min_level`
    pub fn from_query(query: &str, min_level: LogLevel, combine: Combine) -> Self {
        Self::new(Query::parse(query).predicates(min_level), combine)
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn combine(&self) -> Combine {
        self.combine
    }

    /// With no predicates, AND accepts every record and OR accepts none
    pub fn matches(&self, record: &LogRecord) -> bool {
        combined_match(&self.predicates, self.combine, record)
    }

    /// Positions of matching records, in record order
    pub fn evaluate(&self, records: &[LogRecord]) -> Vec<usize> {
        evaluate(records, &self.predicates, self.combine)
    }

    /// Patterns that failed to compile and were disabled
    pub fn invalid_patterns(&self) -> Vec<&str> {
        self.predicates
            .iter()
            .flat_map(Predicate::invalid_patterns)
            .collect()
    }
}

/// Positions of the records accepted by `predicates` combined with `combine`
pub fn evaluate(records: &[LogRecord], predicates: &[Predicate], combine: Combine) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| combined_match(predicates, combine, record).then_some(idx))
        .collect()
}

fn combined_match(predicates: &[Predicate], combine: Combine, record: &LogRecord) -> bool {
    match combine {
        Combine::And => predicates.iter().all(|p| p.matches(record)),
        Combine::Or => predicates.iter().any(|p| p.matches(record)),
    }
}

/// Print warnings for patterns that were disabled because they do not compile
///
/// The filter still runs; the offending constraint simply accepts everything.
pub fn print_filter_warnings(set: &FilterSet) {
    for pattern in set.invalid_patterns() {
        eprintln!(
            "Warning: invalid pattern '{}' ignored; the constraint matches every record",
            pattern
        );
    }
}
