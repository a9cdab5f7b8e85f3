use super::predicate::Predicate;
use crate::level::LogLevel;

/// Record fields a query token can be scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    /// Exact process id
    Pid,
    /// Exact (decimal) thread id
    Tid,
    /// Application name or uid, regex
    App,
    /// Thread name, regex
    Thread,
    /// Tag, regex
    Tag,
    /// Message body, regex
    Text,
}

impl QueryField {
    pub const ALL: [QueryField; 6] = [
        QueryField::Pid,
        QueryField::Tid,
        QueryField::App,
        QueryField::Thread,
        QueryField::Tag,
        QueryField::Text,
    ];

    /// Prefix that scopes a token to this field
    pub fn prefix(self) -> &'static str {
        match self {
            QueryField::Pid => "pid:",
            QueryField::Tid => "tid:",
            QueryField::App => "app:",
            QueryField::Thread => "thread:",
            QueryField::Tag => "tag:",
            QueryField::Text => "text:",
        }
    }

    /// Splits a token into its field and value when it starts with a known prefix
    pub fn split_token(token: &str) -> Option<(QueryField, &str)> {
        QueryField::ALL.into_iter().find_map(|field| {
            token
                .strip_prefix(field.prefix())
                .map(|value| (field, value))
        })
    }
}

/// One whitespace-separated token of a query (e.g. "tag:Activ" or "timeout")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerm {
    /// The token as typed, used as the predicate name
    pub raw: String,
    /// Field the token is scoped to; `None` for a mixed tag/text search
    pub field: Option<QueryField>,
    /// The constraint value with the prefix removed
    pub value: String,
}

impl QueryTerm {
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match QueryField::split_token(token) {
            Some((field, value)) => QueryTerm {
                raw: token.to_string(),
                field: Some(field),
                value: value.to_string(),
            },
            None => QueryTerm {
                raw: token.to_string(),
                field: None,
                value: token.to_string(),
            },
        }
    }

    pub fn is_mixed(&self) -> bool {
        self.field.is_none()
    }

    /// Builds the predicate for this term with every other field left empty
    pub fn to_predicate(&self, min_level: LogLevel) -> Predicate {
        let predicate = Predicate::new(&self.raw, min_level);
        match self.field {
            Some(QueryField::Pid) => predicate.with_pid(&self.value),
            Some(QueryField::Tid) => predicate.with_tid(&self.value),
            Some(QueryField::App) => predicate.with_app_name(&self.value),
            Some(QueryField::Thread) => predicate.with_thread_name(&self.value),
            Some(QueryField::Tag) => predicate.with_tag(&self.value),
            Some(QueryField::Text) => predicate.with_text(&self.value),
            None => Predicate::mixed(&self.value, min_level),
        }
    }
}

/// A parsed query string; each term becomes one predicate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub terms: Vec<QueryTerm>,
}

impl Query {
    /// Parses a query. Never fails: unknown prefixes simply become mixed terms.
    pub fn parse(s: &str) -> Self {
        Query {
            terms: s.split_whitespace().map(QueryTerm::parse).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// One predicate per term. An empty query still yields a level-only
    /// predicate so the minimum level keeps applying.
    pub fn predicates(&self, min_level: LogLevel) -> Vec<Predicate> {
        if self.terms.is_empty() {
            return vec![Predicate::new("", min_level)];
        }
        self.terms
            .iter()
            .map(|term| term.to_predicate(min_level))
            .collect()
    }
}
