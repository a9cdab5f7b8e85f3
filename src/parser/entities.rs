use crate::level::LogLevel;
use std::fmt;

/// Header fields shared by a record and all of its continuations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub level: LogLevel,
    pub pid: String,
    /// Decimal thread id, empty when the source value could not be decoded
    pub tid: String,
    pub app_name: String,
    pub thread_name: String,
    pub tag: String,
    pub time: String,
}

impl RecordHeader {
    /// Builds a header, trimming the tag and normalising the thread id to decimal
    pub fn new(
        level: LogLevel,
        pid: &str,
        tid: &str,
        app_name: &str,
        thread_name: &str,
        tag: &str,
        time: &str,
    ) -> Self {
        Self {
            level,
            pid: pid.to_string(),
            tid: normalize_tid(tid),
            app_name: app_name.to_string(),
            thread_name: thread_name.to_string(),
            tag: tag.trim().to_string(),
            time: time.to_string(),
        }
    }
}

/// One parsed log line (or one chunk of an overlong line)
///
/// Records are immutable once built; all accessors hand out borrowed views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    id: u64,
    header: RecordHeader,
    message: String,
    common_header: String,
    continuation: bool,
}

impl LogRecord {
    pub fn new(
        id: u64,
        header: RecordHeader,
        message: impl Into<String>,
        common_header: impl Into<String>,
        continuation: bool,
    ) -> Self {
        Self {
            id,
            header,
            message: message.into(),
            common_header: common_header.into(),
            continuation,
        }
    }

    /// Sequence id assigned at parse time
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn header(&self) -> &RecordHeader {
        &self.header
    }

    pub fn level(&self) -> LogLevel {
        self.header.level
    }

    pub fn pid(&self) -> &str {
        &self.header.pid
    }

    pub fn tid(&self) -> &str {
        &self.header.tid
    }

    pub fn app_name(&self) -> &str {
        &self.header.app_name
    }

    pub fn thread_name(&self) -> &str {
        &self.header.thread_name
    }

    pub fn tag(&self) -> &str {
        &self.header.tag
    }

    pub fn time(&self) -> &str {
        &self.header.time
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn common_header(&self) -> &str {
        &self.common_header
    }

    pub fn is_continuation(&self) -> bool {
        self.continuation
    }

    /// Text shown for the record: common header followed by the message
    pub fn display_text(&self) -> String {
        let mut text = String::with_capacity(self.common_header.len() + self.message.len());
        text.push_str(&self.common_header);
        text.push_str(&self.message);
        text
    }
}

impl fmt::Display for LogRecord {
    /// A record with a common header already carries its own prefix, so only
    /// records without one get a synthesized `time pid tid L tag:` prefix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.common_header.is_empty() {
            return write!(f, "{}{}", self.common_header, self.message);
        }
        write!(
            f,
            "{} {:>5} {:>5} {} {}: {}",
            self.header.time,
            self.header.pid,
            self.header.tid,
            self.header.level.letter(),
            self.header.tag,
            self.message
        )
    }
}

/// Decodes a thread id written in decimal or `0x`/`#` hexadecimal into decimal.
///
/// Anything else (including `?` placeholders) becomes an empty string.
pub fn normalize_tid(raw: &str) -> String {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let hex = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .or_else(|| unsigned.strip_prefix('#'));

    let parsed = match hex {
        Some(digits) if !digits.starts_with(['-', '+']) => i64::from_str_radix(digits, 16),
        Some(_) => return String::new(),
        None if unsigned.starts_with(['-', '+']) => return String::new(),
        None => unsigned.parse::<i64>(),
    };

    match parsed {
        Ok(value) if negative => (-value).to_string(),
        Ok(value) => value.to_string(),
        Err(_) => String::new(),
    }
}
