use crate::level::LogLevel;
use crate::parser::LogRecord;
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Whether `pattern` contains an upper-case letter, which makes it case sensitive
pub fn has_uppercase(pattern: &str) -> bool {
    pattern.chars().any(char::is_uppercase)
}

fn build_regex(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(!has_uppercase(pattern))
        .build()
}

/// A regex constraint on one text field of a record
///
/// An empty or uncompilable pattern leaves the constraint inactive.
#[derive(Debug, Clone, Default)]
pub struct FieldPattern {
    pattern: String,
    regex: Option<Regex>,
}

impl FieldPattern {
    /// Compiles a trimmed pattern; lower-case-only patterns ignore case
    pub fn compile(pattern: &str) -> Self {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Self::default();
        }

        let regex = match build_regex(pattern) {
            Ok(regex) => Some(regex),
            Err(err) => {
                debug!(pattern, error = %err, "invalid filter pattern, constraint disabled");
                None
            }
        };

        Self {
            pattern: pattern.to_string(),
            regex,
        }
    }

    /// Like [`compile`](Self::compile), but an invalid pattern is matched literally
    pub fn compile_or_literal(pattern: &str) -> Self {
        let compiled = Self::compile(pattern);
        if !compiled.is_invalid() {
            return compiled;
        }

        let regex = build_regex(&regex::escape(&compiled.pattern)).ok();
        Self {
            pattern: compiled.pattern,
            regex,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_active(&self) -> bool {
        self.regex.is_some()
    }

    /// A non-empty pattern that failed to compile
    pub fn is_invalid(&self) -> bool {
        !self.pattern.is_empty() && self.regex.is_none()
    }

    pub fn is_case_sensitive(&self) -> bool {
        has_uppercase(&self.pattern)
    }

    /// Substring search; an inactive pattern accepts everything
    pub fn accepts(&self, text: &str) -> bool {
        self.regex.as_ref().is_none_or(|regex| regex.is_match(text))
    }

    /// Substring search; an inactive pattern matches nothing
    pub fn finds(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(text))
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// One named filter rule over log records
///
/// Build it field by field:
///
/// ```
/// use logcat_reader::{LogLevel, Predicate};
///
/// let predicate = Predicate::new("crashes", LogLevel::Error)
///     .with_pid("495")
///     .with_tag("AndroidRuntime");
/// assert_eq!(predicate.pid(), Some("495"));
/// ```
#[derive(Debug, Clone)]
pub struct Predicate {
    name: String,
    min_level: LogLevel,
    pid: Option<String>,
    tid: Option<String>,
    app_name: FieldPattern,
    thread_name: FieldPattern,
    tag: FieldPattern,
    text: FieldPattern,
    mixed: bool,
}

impl Predicate {
    /// A predicate that only enforces the minimum level until constraints are added
    pub fn new(name: &str, min_level: LogLevel) -> Self {
        Self {
            name: name.trim().to_string(),
            min_level,
            pid: None,
            tid: None,
            app_name: FieldPattern::default(),
            thread_name: FieldPattern::default(),
            tag: FieldPattern::default(),
            text: FieldPattern::default(),
            mixed: false,
        }
    }

    /// Relaxed search: matches when `token` is found in either the tag or the message
    pub fn mixed(token: &str, min_level: LogLevel) -> Self {
        Self {
            tag: FieldPattern::compile_or_literal(token),
            text: FieldPattern::compile_or_literal(token),
            mixed: true,
            ..Self::new(token, min_level)
        }
    }

    pub fn with_pid(mut self, pid: &str) -> Self {
        self.pid = non_empty(pid);
        self
    }

    pub fn with_tid(mut self, tid: &str) -> Self {
        self.tid = non_empty(tid);
        self
    }

    pub fn with_app_name(mut self, pattern: &str) -> Self {
        self.app_name = FieldPattern::compile(pattern);
        self
    }

    pub fn with_thread_name(mut self, pattern: &str) -> Self {
        self.thread_name = FieldPattern::compile(pattern);
        self
    }

    pub fn with_tag(mut self, pattern: &str) -> Self {
        self.tag = FieldPattern::compile(pattern);
        self
    }

    pub fn with_text(mut self, pattern: &str) -> Self {
        self.text = FieldPattern::compile(pattern);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn pid(&self) -> Option<&str> {
        self.pid.as_deref()
    }

    pub fn tid(&self) -> Option<&str> {
        self.tid.as_deref()
    }

    pub fn app_name(&self) -> &FieldPattern {
        &self.app_name
    }

    pub fn thread_name(&self) -> &FieldPattern {
        &self.thread_name
    }

    pub fn tag(&self) -> &FieldPattern {
        &self.tag
    }

    pub fn text(&self) -> &FieldPattern {
        &self.text
    }

    pub fn is_mixed(&self) -> bool {
        self.mixed
    }

    /// Patterns that were given but could not be compiled
    pub fn invalid_patterns(&self) -> Vec<&str> {
        [&self.app_name, &self.thread_name, &self.tag, &self.text]
            .into_iter()
            .filter(|field| field.is_invalid())
            .map(FieldPattern::pattern)
            .collect()
    }

    /// Check whether a record makes it through this predicate
    pub fn matches(&self, record: &LogRecord) -> bool {
        if record.level() < self.min_level {
            return false;
        }

        if self.mixed {
            if !self.tag.is_active() && !self.text.is_active() {
                return true;
            }
            return self.tag.finds(record.tag()) || self.text.finds(record.message());
        }

        if self.pid.as_deref().is_some_and(|pid| pid != record.pid()) {
            return false;
        }
        if self.tid.as_deref().is_some_and(|tid| tid != record.tid()) {
            return false;
        }

        self.app_name.accepts(record.app_name())
            && self.thread_name.accepts(record.thread_name())
            && self.tag.accepts(record.tag())
            && self.text.accepts(record.message())
    }
}
