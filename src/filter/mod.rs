//! Filter query parsing and matching
//!
//! A query is a whitespace-separated list of tokens. Every token becomes one
//! [`Predicate`]; the predicates are then combined with AND or OR.
//!
//! # Syntax
//!
//! ```text
//! field:pattern        Constrain one field of the record
//! word                 Mixed search: matches when the tag OR the message contains it
//! ```
//!
//! # Fields
//!
//! - `pid:` - exact process id
//! - `tid:` - exact thread id (decimal)
//! - `app:` - application name / uid (regex)
//! - `thread:` - thread name (regex)
//! - `tag:` - tag (regex)
//! - `text:` - message body (regex)
//!
//! Regex patterns written entirely in lower case ignore case; a single
//! upper-case letter makes the pattern case sensitive. A pattern that does not
//! compile is disabled instead of failing the query.
//!
//! # Examples
//!
//! ```text
//! pid:1024 tid:64 tag:Activ               # records of one thread tagged Activ...
//! app:robo thread:main text:Con           # ...or scoped by app, thread and message
//! timeout                                 # tag or message mentions "timeout"
//! ```

pub mod error;
pub mod matcher;
pub mod parser;
pub mod predicate;

pub use error::FilterError;
pub use matcher::{Combine, FilterSet, evaluate, print_filter_warnings};
pub use parser::{Query, QueryField, QueryTerm};
pub use predicate::{FieldPattern, Predicate, has_uppercase};
