//! Header grammars for each [`LogFormat`](super::LogFormat)
//!
//! Every pattern is anchored at both ends of the line. Severity letters are
//! one of `V D I W E A F`; `F` comes from `Log.wtf()` and is read as assert.

use super::{LogRecord, ParserState, RecordHeader};
use crate::level::LogLevel;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::trace;

// [ 08-11 19:11:07.132   495:0x1ef D/dtag     ]
static LONG_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\s(\d\d-\d\d\s\d\d:\d\d:\d\d\.\d+)\s+(\d*):\s*(\S+)\s([VDIWEAF])/(.*)\]$")
        .expect("valid long header regex")
});

// 04-25 19:04:38.041  1190  1190 I MyTag: this is message body
static THREADTIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d\d-\d\d\s\d\d:\d\d:\d\d\.\d+)\s+(\d*)\s*(\S+)\s([VDIWEAF])\s(\w+):\s(.*)$")
        .expect("valid threadtime regex")
});

// 06-03 08:28:38.589 5451 5451 I BootReceiver: [10062][main] onReceive called
static JAVACUSTOM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d\d-\d\d\s\d\d:\d\d:\d\d\.\d+)\s+(\d+)\s+(\d+)\s+([VDIWEAF])\s+(.*?):\s+\[(\d+)\]\[(.*?)\](.*)$",
    )
    .expect("valid javacustom regex")
});

// [2016-05-01 10:00:00.123][main][INFO]Tag - message
static STRUCTURED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{4}-\d\d-\d\d\s\d\d:\d\d:\d\d\.\d+)\]\[(.*?)\]\[(\w+)\](.*?) - (.*)$")
        .expect("valid structured regex")
});

fn level_from_letter(letter: &str) -> LogLevel {
    letter
        .chars()
        .next()
        .and_then(LogLevel::by_letter)
        .unwrap_or(LogLevel::Assert)
}

fn level_from_word(word: &str) -> LogLevel {
    match word {
        "TRACE" => LogLevel::Verbose,
        "DEBUG" => LogLevel::Debug,
        "INFO" => LogLevel::Info,
        "WARN" => LogLevel::Warn,
        "ERROR" => LogLevel::Error,
        _ => LogLevel::Assert,
    }
}

/// Header lines only update the state; every other line is a body line of
/// the current header. Body lines before the first header are dropped.
pub(super) fn long(state: &mut ParserState, line: &str, chunk_limit: usize) -> Vec<LogRecord> {
    if let Some(caps) = LONG_HEADER_RE.captures(line) {
        let header = RecordHeader::new(
            level_from_letter(&caps[4]),
            &caps[2],
            &caps[3],
            "",
            "",
            &caps[5],
            &caps[1],
        );
        state.start(header, String::new());
        return Vec::new();
    }

    if !state.has_context() {
        trace!(%line, "dropping body line before first header");
    }
    state.emit(line, Some(chunk_limit))
}

fn threadtime_header(caps: &Captures<'_>) -> RecordHeader {
    RecordHeader::new(
        level_from_letter(&caps[4]),
        &caps[2],
        &caps[3],
        "",
        "",
        &caps[5],
        &caps[1],
    )
}

/// Self-contained lines; anything that does not match is dropped.
pub(super) fn threadtime(state: &mut ParserState, line: &str) -> Vec<LogRecord> {
    let Some(caps) = THREADTIME_RE.captures(line) else {
        trace!(%line, "dropping unmatched threadtime line");
        return Vec::new();
    };
    state.start(threadtime_header(&caps), String::new());
    state.emit(&caps[6], None)
}

/// Like [`threadtime`], but keeps the matched prefix as the common header and
/// attaches unmatched lines to the previous record.
pub(super) fn threadtime_continued(state: &mut ParserState, line: &str) -> Vec<LogRecord> {
    let Some(caps) = THREADTIME_RE.captures(line) else {
        return continue_previous(state, line, None);
    };
    let message = caps.get(6).map_or("", |m| m.as_str());
    let prefix_end = caps.get(6).map_or(line.len(), |m| m.start());
    state.start(threadtime_header(&caps), line[..prefix_end].to_string());
    state.emit(message, None)
}

/// `[uid][thread]` prefix: uid goes to the app name slot.
pub(super) fn javacustom(state: &mut ParserState, line: &str, chunk_limit: usize) -> Vec<LogRecord> {
    let Some(caps) = JAVACUSTOM_RE.captures(line) else {
        return continue_previous(state, line, Some(chunk_limit));
    };
    let header = RecordHeader::new(
        level_from_letter(&caps[4]),
        &caps[2],
        &caps[3],
        &caps[6],
        &caps[7],
        &caps[5],
        &caps[1],
    );
    state.start(header, String::new());
    state.emit(&caps[8], Some(chunk_limit))
}

/// Bracketed date, thread and level word, then `tag - message`.
pub(super) fn structured(state: &mut ParserState, line: &str) -> Vec<LogRecord> {
    let Some(caps) = STRUCTURED_RE.captures(line) else {
        return continue_previous(state, line, None);
    };
    let header = RecordHeader::new(
        level_from_word(&caps[3]),
        "",
        "",
        "",
        &caps[2],
        &caps[4],
        &caps[1],
    );
    state.start(header, String::new());
    state.emit(&caps[5], None)
}

fn continue_previous(
    state: &mut ParserState,
    line: &str,
    chunk_limit: Option<usize>,
) -> Vec<LogRecord> {
    if !state.has_context() {
        trace!(%line, "no previous record to continue, skipping");
        return Vec::new();
    }
    state.emit(line, chunk_limit)
}
