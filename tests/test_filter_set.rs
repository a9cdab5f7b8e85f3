use logcat_reader::filter::evaluate;
use logcat_reader::parser::{LineParser, LogFormat, RecordHeader, SAMPLE_LINES};
use logcat_reader::{Combine, FilterSet, LogLevel, LogRecord, Predicate};

fn record(id: u64, level: LogLevel, tag: &str) -> LogRecord {
    let header = RecordHeader::new(level, "1", "2", "", "", tag, "08-11 19:11:07.132");
    LogRecord::new(id, header, format!("{tag} message"), "", false)
}

fn and_or_records() -> Vec<LogRecord> {
    vec![record(0, LogLevel::Debug, "dtag"), record(1, LogLevel::Error, "xtag")]
}

fn and_or_predicates() -> Vec<Predicate> {
    vec![
        Predicate::new("tag", LogLevel::Verbose).with_tag("dtag"),
        Predicate::new("errors", LogLevel::Error),
    ]
}

#[test]
fn test_and_requires_every_predicate() {
    let rows = evaluate(&and_or_records(), &and_or_predicates(), Combine::And);
    assert!(rows.is_empty(), "no record is both dtag and at least error");
}

#[test]
fn test_or_requires_any_predicate() {
    let rows = evaluate(&and_or_records(), &and_or_predicates(), Combine::Or);
    assert_eq!(rows, vec![0, 1]);
}

#[test]
fn test_empty_predicate_list() {
    let records = and_or_records();
    assert_eq!(evaluate(&records, &[], Combine::And), vec![0, 1]);
    assert!(evaluate(&records, &[], Combine::Or).is_empty());
}

#[test]
fn test_view_preserves_record_order() {
    let records = LineParser::new(LogFormat::Long).parse_lines(SAMPLE_LINES);
    let set = FilterSet::from_query("tag:tag", LogLevel::Info, Combine::And);

    let rows = set.evaluate(&records);
    assert!(rows.windows(2).all(|pair| pair[0] < pair[1]));
    let levels: Vec<LogLevel> = rows.iter().map(|&i| records[i].level()).collect();
    assert!(levels.iter().all(|&level| level >= LogLevel::Info));
    assert_eq!(rows.len(), 4, "info, warn, error and assert records");
}

#[test]
fn test_evaluation_is_idempotent() {
    let records = LineParser::new(LogFormat::Long).parse_lines(SAMPLE_LINES);
    let set = FilterSet::from_query("dtag message", LogLevel::Verbose, Combine::Or);

    let first = set.evaluate(&records);
    let second = set.evaluate(&records);
    assert_eq!(first, second);
    assert_eq!(first.len(), records.len(), "every sample message contains 'message'");
}

#[test]
fn test_mixed_terms_with_and() {
    let records = LineParser::new(LogFormat::Long).parse_lines(SAMPLE_LINES);
    let set = FilterSet::from_query("dtag debug", LogLevel::Verbose, Combine::And);

    assert_eq!(set.evaluate(&records), vec![0, 6]);
    assert_eq!(set.predicates().len(), 2);
    assert_eq!(set.combine(), Combine::And);
}

#[test]
fn test_invalid_patterns_are_reported() {
    let set = FilterSet::from_query("tag:[ text:ok", LogLevel::Verbose, Combine::And);
    assert_eq!(set.invalid_patterns(), vec!["["]);
}
