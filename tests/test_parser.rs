use logcat_reader::parser::{
    DEFAULT_CHUNK_LIMIT, LineParser, LogFormat, ParseError, ParserState, SAMPLE_LINES,
    split_fixed_length,
};
use logcat_reader::{LogLevel, LogRecord};
use std::io::Write;

fn parse(format: LogFormat, lines: &[&str]) -> Vec<LogRecord> {
    LineParser::new(format).parse_lines(lines)
}

#[test]
fn test_long_sample_round_trip() {
    let records = parse(LogFormat::Long, &SAMPLE_LINES);
    assert_eq!(records.len(), 7, "one record per header/body pair");

    let first = &records[0];
    assert_eq!(first.level(), LogLevel::Debug);
    assert_eq!(first.pid(), "495");
    assert_eq!(first.tid(), "495", "hex tid 0x1ef should be normalized to decimal");
    assert_eq!(first.tag(), "dtag");
    assert_eq!(first.time(), "08-11 19:11:07.132");
    assert_eq!(first.message(), "debug message");
    assert!(!first.is_continuation());

    assert_eq!(records[1].tid(), "234");
    assert_eq!(records[5].level(), LogLevel::Assert, "F maps to assert");
    assert_eq!(records[6].time(), "08-11 21:15:35.7524");
    assert_eq!(records[6].tid(), "540");
}

#[test]
fn test_long_multiple_body_lines_are_continuations() {
    let records = parse(
        LogFormat::Long,
        &[
            "[ 08-11 19:11:07.132   495:  234 E/AndroidRuntime ]",
            "FATAL EXCEPTION: main",
            "    at com.example.Main.run(Main.java:10)",
        ],
    );

    assert_eq!(records.len(), 2);
    assert!(!records[0].is_continuation());
    assert!(records[1].is_continuation());
    assert_eq!(records[1].tag(), "AndroidRuntime");
    assert_eq!(records[1].level(), LogLevel::Error);
    assert_eq!(records[1].message(), "    at com.example.Main.run(Main.java:10)");
}

#[test]
fn test_long_drops_body_before_first_header() {
    let records = parse(
        LogFormat::Long,
        &["--------- beginning of main", "[ 08-11 19:11:07.132   495:  234 I/tag ]", "hello"],
    );
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message(), "hello");
}

#[test]
fn test_long_splits_overlong_body() {
    let body = "x".repeat(325);
    let header = "[ 08-11 19:11:07.132   495:  234 W/split ]";
    let records = parse(LogFormat::Long, &[header, body.as_str()]);

    let sizes: Vec<usize> = records.iter().map(|r| r.message().chars().count()).collect();
    assert_eq!(sizes, vec![160, 160, 5]);
    assert!(!records[0].is_continuation());
    assert!(records[1].is_continuation());
    assert!(records[2].is_continuation());
    assert!(records.iter().all(|r| r.tag() == "split" && r.level() == LogLevel::Warn));
}

#[test]
fn test_chunk_limit_is_configurable() {
    let parser = LineParser::new(LogFormat::Long).with_chunk_limit(4);
    let records = parser.parse_lines(["[ 08-11 19:11:07.132   1:  2 I/t ]", "abcdefghij"]);
    let messages: Vec<&str> = records.iter().map(|r| r.message()).collect();
    assert_eq!(messages, vec!["abcd", "efgh", "ij"]);
}

#[test]
fn test_split_fixed_length_counts_chars() {
    assert_eq!(split_fixed_length("", 160), vec![""]);
    assert_eq!(split_fixed_length("äöüß", 3), vec!["äöü", "ß"]);
    assert_eq!(split_fixed_length("abc", 0), vec!["abc"]);
    assert_eq!(DEFAULT_CHUNK_LIMIT, 160);
}

#[test]
fn test_threadtime_drops_unmatched_lines() {
    let records = parse(
        LogFormat::ThreadTime,
        &[
            "08-11 19:11:07.132  495  507 I ActivityManager: Start proc com.example",
            "    not a header",
            "08-11 19:11:07.140  495  507 W PackageManager: slow",
        ],
    );

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].tag(), "ActivityManager");
    assert_eq!(records[0].pid(), "495");
    assert_eq!(records[0].tid(), "507");
    assert_eq!(records[0].message(), "Start proc com.example");
    assert_eq!(records[0].common_header(), "");
    assert_eq!(records[1].level(), LogLevel::Warn);
    assert!(records.iter().all(|r| !r.is_continuation()));
}

#[test]
fn test_threadtime_continued_blanks_common_header() {
    let header = "08-11 19:11:07.132  495  507 E Crash: ";
    let line = format!("{header}boom");
    let records = parse(
        LogFormat::ThreadTimeContinued,
        &[line.as_str(), "\tat Foo.bar(Foo.java:1)"],
    );

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].common_header(), header);
    assert_eq!(records[0].message(), "boom");
    assert!(records[1].is_continuation());
    assert_eq!(records[1].common_header(), " ".repeat(header.chars().count()));
    assert_eq!(records[1].tag(), "Crash");
    assert_eq!(records[1].message(), "\tat Foo.bar(Foo.java:1)");
}

#[test]
fn test_threadtime_continued_renders_prefix_once() {
    let header = "08-11 19:11:07.132  495  507 E Crash: ";
    let line = format!("{header}boom");
    let records = parse(LogFormat::ThreadTimeContinued, &[line.as_str(), "at Foo.bar"]);

    let first = records[0].to_string();
    assert_eq!(first, line);
    assert_eq!(first.matches("Crash:").count(), 1, "header must not be repeated");

    let continuation = records[1].to_string();
    assert_eq!(continuation, format!("{}at Foo.bar", " ".repeat(header.chars().count())));
    assert_eq!(
        continuation.find("at Foo.bar"),
        first.find("boom"),
        "continuation body aligns under the header's message"
    );
}

#[test]
fn test_records_without_common_header_get_synthesized_prefix() {
    let records = parse(LogFormat::Long, &SAMPLE_LINES[..2]);
    let rendered = records[0].to_string();
    assert!(rendered.starts_with("08-11 19:11:07.132"));
    assert!(rendered.contains(" D dtag: debug message"));
}

#[test]
fn test_javacustom_splits_overlong_body() {
    let line = format!(
        "08-11 19:11:07.132  495  507 I Uploader: [10045][worker-2]{}",
        "y".repeat(325)
    );
    let records = parse(LogFormat::JavaCustom, &[line.as_str()]);

    let sizes: Vec<usize> = records.iter().map(|r| r.message().chars().count()).collect();
    assert_eq!(sizes, vec![160, 160, 5]);
    let continuations: Vec<bool> = records.iter().map(|r| r.is_continuation()).collect();
    assert_eq!(continuations, vec![false, true, true]);
    assert!(
        records
            .iter()
            .all(|r| r.app_name() == "10045" && r.thread_name() == "worker-2"),
        "every chunk keeps the uid and thread"
    );
}

#[test]
fn test_continuation_formats_drop_lines_before_first_record() {
    for format in [
        LogFormat::ThreadTimeContinued,
        LogFormat::JavaCustom,
        LogFormat::Structured,
    ] {
        let records = parse(format, &["orphan", "  at x"]);
        assert!(records.is_empty(), "{format}: lines with nothing to continue are dropped");
    }
}

#[test]
fn test_javacustom_fills_app_and_thread() {
    let records = parse(
        LogFormat::JavaCustom,
        &[
            "08-11 19:11:07.132  495  507 D NetClient : [10045][OkHttp Dispatch]request sent",
            "continued body",
        ],
    );

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].tag(), "NetClient");
    assert_eq!(records[0].app_name(), "10045");
    assert_eq!(records[0].thread_name(), "OkHttp Dispatch");
    assert_eq!(records[0].message(), "request sent");
    assert!(records[1].is_continuation());
    assert_eq!(records[1].app_name(), "10045");
}

#[test]
fn test_structured_levels_and_continuation() {
    let records = parse(
        LogFormat::Structured,
        &[
            "[2024-03-01 10:11:12.345][main][TRACE]Boot - starting",
            "[2024-03-01 10:11:12.400][io-1][FATAL]Disk - gone",
            "  caused by: unplugged",
        ],
    );

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].level(), LogLevel::Verbose);
    assert_eq!(records[0].thread_name(), "main");
    assert_eq!(records[0].tag(), "Boot");
    assert_eq!(records[0].pid(), "");
    assert_eq!(records[1].level(), LogLevel::Assert, "unknown level words map to assert");
    assert!(records[2].is_continuation());
    assert_eq!(records[2].message(), "  caused by: unplugged");
    assert_eq!(records[2].common_header(), "", "structured continuations keep no prefix");
}

#[test]
fn test_parse_line_threads_state() {
    let parser = LineParser::new(LogFormat::Long);
    let state = ParserState::new();
    assert!(!state.has_context());

    let (state, records) = parser.parse_line(state, "[ 08-11 19:11:07.132   1:  2 I/t ]");
    assert!(records.is_empty());
    assert!(state.has_context());

    let (state, records) = parser.parse_line(state, "body");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id(), 0);
    assert_eq!(state.next_id(), 1);
}

#[test]
fn test_parse_file_handles_crlf() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    write!(
        file,
        "[ 08-11 19:11:07.132   495:0x1ef D/dtag     ]\r\ndebug message\r\n\r\n"
    )
    .expect("write temp file");

    let records = LineParser::new(LogFormat::Long)
        .parse_file(file.path())
        .expect("parse temp file");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message(), "debug message");
}

#[test]
fn test_parse_file_reports_missing_path() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let missing = dir.path().join("missing.log");

    let err = LineParser::new(LogFormat::Long)
        .parse_file(&missing)
        .expect_err("missing file should fail");
    assert!(matches!(err, ParseError::Read { .. }));
}

#[test]
fn test_format_names() {
    for format in LogFormat::ALL {
        assert_eq!(format.name().parse::<LogFormat>(), Ok(format));
    }
    assert!("syslog".parse::<LogFormat>().is_err());
}
