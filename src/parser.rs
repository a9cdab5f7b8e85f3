use crate::filter::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

mod entities;
mod formats;

pub use entities::{LogRecord, RecordHeader, normalize_tid};

/// Default number of characters per record before a line is split
pub const DEFAULT_CHUNK_LIMIT: usize = 160;

/// Canonical `logcat -v long` sample used when no log file can be loaded
pub const SAMPLE_LINES: [&str; 14] = [
    "[ 08-11 19:11:07.132   495:0x1ef D/dtag     ]",
    "debug message",
    "[ 08-11 19:11:07.132   495:  234 E/etag     ]",
    "error message",
    "[ 08-11 19:11:07.132   495:0x1ef I/itag     ]",
    "info message",
    "[ 08-11 19:11:07.132   495:0x1ef V/vtag     ]",
    "verbose message",
    "[ 08-11 19:11:07.132   495:0x1ef W/wtag     ]",
    "warning message",
    "[ 08-11 19:11:07.132   495:0x1ef F/wtftag   ]",
    "wtf message",
    "[ 08-11 21:15:35.7524  540:0x21c D/dtag     ]",
    "debug message",
];

/// Errors raised while loading raw log lines
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read log file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The line grammars understood by [`LineParser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogFormat {
    /// `logcat -v long`: bracketed header line followed by body lines
    #[default]
    #[serde(rename = "long")]
    Long,
    /// `logcat -v threadtime`: one self-contained line per record
    #[serde(rename = "threadtime")]
    ThreadTime,
    /// `threadtime` with unmatched lines attached to the previous record
    #[serde(rename = "threadtime-continued")]
    ThreadTimeContinued,
    /// `threadtime` with a `[uid][thread]` message prefix
    #[serde(rename = "javacustom")]
    JavaCustom,
    /// `[date time][thread][LEVEL]tag - message`
    #[serde(rename = "structured")]
    Structured,
}

impl LogFormat {
    pub const ALL: [LogFormat; 5] = [
        LogFormat::Long,
        LogFormat::ThreadTime,
        LogFormat::ThreadTimeContinued,
        LogFormat::JavaCustom,
        LogFormat::Structured,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LogFormat::Long => "long",
            LogFormat::ThreadTime => "threadtime",
            LogFormat::ThreadTimeContinued => "threadtime-continued",
            LogFormat::JavaCustom => "javacustom",
            LogFormat::Structured => "structured",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LogFormat {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        LogFormat::ALL
            .into_iter()
            .find(|format| format.name() == wanted)
            .ok_or_else(|| FilterError::UnknownFormat(s.to_string()))
    }
}

/// Header of the most recent record, reused by continuation lines
#[derive(Debug, Clone)]
struct LineContext {
    header: RecordHeader,
    common_header: String,
    started: bool,
}

/// State threaded from one line to the next
#[derive(Debug, Clone, Default)]
pub struct ParserState {
    context: Option<LineContext>,
    next_id: u64,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next emitted record will get
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Whether a header has been seen that continuation lines can attach to
    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    fn start(&mut self, header: RecordHeader, common_header: String) {
        self.context = Some(LineContext {
            header,
            common_header,
            started: false,
        });
    }

    /// Emits `message` against the current header. The first record after
    /// `start` carries the full header; every later one is a continuation
    /// with its common header blanked out.
    fn emit(&mut self, message: &str, chunk_limit: Option<usize>) -> Vec<LogRecord> {
        let Some(context) = self.context.as_mut() else {
            return Vec::new();
        };

        let chunks = match chunk_limit {
            Some(limit) => split_fixed_length(message, limit),
            None => vec![message],
        };

        let mut records = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let continuation = context.started;
            let common_header = if continuation {
                " ".repeat(context.common_header.chars().count())
            } else {
                context.common_header.clone()
            };
            records.push(LogRecord::new(
                self.next_id,
                context.header.clone(),
                chunk,
                common_header,
                continuation,
            ));
            self.next_id += 1;
            context.started = true;
        }
        records
    }
}

/// Turns raw lines of one [`LogFormat`] into [`LogRecord`]s
#[derive(Debug, Clone, Copy)]
pub struct LineParser {
    format: LogFormat,
    chunk_limit: usize,
}

impl LineParser {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            chunk_limit: DEFAULT_CHUNK_LIMIT,
        }
    }

    /// Overrides the chunk size; zero disables splitting
    pub fn with_chunk_limit(mut self, chunk_limit: usize) -> Self {
        self.chunk_limit = chunk_limit;
        self
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn chunk_limit(&self) -> usize {
        self.chunk_limit
    }

    /// Consumes one non-empty line, returning the next state and the records it produced
    pub fn parse_line(&self, state: ParserState, line: &str) -> (ParserState, Vec<LogRecord>) {
        let mut state = state;
        let records = match self.format {
            LogFormat::Long => formats::long(&mut state, line, self.chunk_limit),
            LogFormat::ThreadTime => formats::threadtime(&mut state, line),
            LogFormat::ThreadTimeContinued => formats::threadtime_continued(&mut state, line),
            LogFormat::JavaCustom => formats::javacustom(&mut state, line, self.chunk_limit),
            LogFormat::Structured => formats::structured(&mut state, line),
        };
        (state, records)
    }

    /// Parses an in-memory batch of lines, skipping empty ones
    pub fn parse_lines<I, S>(&self, lines: I) -> Vec<LogRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = ParserState::new();
        let mut records = Vec::new();
        for line in lines {
            state = self.feed(state, line.as_ref(), &mut records);
        }
        debug!(format = %self.format, records = records.len(), "parsed in-memory lines");
        records
    }

    /// Parses a log file line by line. Invalid UTF-8 is replaced rather than rejected.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<LogRecord>, ParseError> {
        let path = path.as_ref();
        let read_error = |source| ParseError::Read {
            path: path.display().to_string(),
            source,
        };

        let file = File::open(path).map_err(read_error)?;
        let mut reader = BufReader::new(file);
        let mut state = ParserState::new();
        let mut records = Vec::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).map_err(read_error)?;
            if read == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            state = self.feed(state, line.trim_end_matches('\n'), &mut records);
        }

        info!(
            path = %path.display(),
            format = %self.format,
            records = records.len(),
            "parsed log file"
        );
        Ok(records)
    }

    fn feed(&self, state: ParserState, line: &str, records: &mut Vec<LogRecord>) -> ParserState {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            return state;
        }
        let (state, mut produced) = self.parse_line(state, line);
        records.append(&mut produced);
        state
    }
}

/// Splits `text` into chunks of at most `limit` characters, preserving order.
///
/// Always yields at least one chunk, so an empty message still produces a record.
/// A `limit` of zero returns the text unsplit.
pub fn split_fixed_length(text: &str, limit: usize) -> Vec<&str> {
    if limit == 0 || text.is_empty() {
        return vec![text];
    }

    let mut chunks = Vec::with_capacity(text.len() / limit + 1);
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == limit {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    chunks.push(&text[start..]);
    chunks
}
