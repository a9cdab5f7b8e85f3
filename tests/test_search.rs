use logcat_reader::parser::{LineParser, LogFormat, RecordHeader};
use logcat_reader::search::find_in_view;
use logcat_reader::{LogLevel, LogRecord, SearchDirection, SearchError, SearchHit, SearchOptions, Searcher};

fn records(messages: &[&str]) -> Vec<LogRecord> {
    messages
        .iter()
        .enumerate()
        .map(|(id, message)| {
            let header = RecordHeader::new(LogLevel::Info, "1", "2", "", "", "tag", "t");
            LogRecord::new(id as u64, header, *message, "", false)
        })
        .collect()
}

fn hit(position: usize, wrapped: bool) -> Option<SearchHit> {
    Some(SearchHit { position, wrapped })
}

#[test]
fn test_forward_search_starts_at_from() {
    let records = records(&["alpha", "beta", "alpha again", "gamma"]);
    let view: Vec<usize> = (0..records.len()).collect();
    let searcher = Searcher::new(&records, &view, "alpha", SearchOptions::new()).expect("valid search");

    assert_eq!(searcher.find(0), hit(0, false));
    assert_eq!(searcher.find(1), hit(2, false));
    assert_eq!(searcher.find(3), hit(0, true), "wraps to the top");
}

#[test]
fn test_backward_search_wraps_to_bottom() {
    let records = records(&["alpha", "beta", "alpha again", "gamma"]);
    let view: Vec<usize> = (0..records.len()).collect();
    let options = SearchOptions::new().direction(SearchDirection::Backward);
    let searcher = Searcher::new(&records, &view, "gamma", options).expect("valid search");

    assert_eq!(searcher.find(3), hit(3, false));
    assert_eq!(searcher.find(1), hit(3, true));
}

#[test]
fn test_find_next_moves_past_current_row() {
    let records = records(&["error one", "fine", "error two"]);
    let view: Vec<usize> = (0..records.len()).collect();
    let forward = Searcher::new(&records, &view, "error", SearchOptions::new()).expect("valid search");

    assert_eq!(forward.find_next(None), hit(0, false));
    assert_eq!(forward.find_next(Some(0)), hit(2, false));
    assert_eq!(forward.find_next(Some(2)), hit(0, true));

    let options = SearchOptions::new().direction(SearchDirection::Backward);
    let backward = Searcher::new(&records, &view, "error", options).expect("valid search");
    assert_eq!(backward.find_next(None), hit(2, false));
    assert_eq!(backward.find_next(Some(2)), hit(0, false));
    assert_eq!(backward.find_next(Some(0)), hit(2, true));
}

#[test]
fn test_search_positions_are_view_rows() {
    let records = records(&["needle", "hay", "needle", "hay"]);
    let view = vec![1, 2, 3];

    let found = find_in_view(&records, &view, 0, "needle", SearchOptions::new()).expect("valid search");
    assert_eq!(found, hit(1, false), "row 1 of the view is record 2");
}

#[test]
fn test_case_sensitivity() {
    let records = records(&["Connection Reset"]);
    let view = vec![0];

    let insensitive = find_in_view(&records, &view, 0, "connection", SearchOptions::new());
    assert_eq!(insensitive.expect("valid search"), hit(0, false));

    let sensitive = SearchOptions::new().match_case(true);
    let found = find_in_view(&records, &view, 0, "connection", sensitive).expect("valid search");
    assert_eq!(found, None);
}

#[test]
fn test_regex_search() {
    let records = records(&["took 15ms", "took 1500ms"]);
    let view = vec![0, 1];
    let options = SearchOptions::new().regex(true);

    let found = find_in_view(&records, &view, 0, r"\d{4}MS", options).expect("valid search");
    assert_eq!(found, hit(1, false), "regex search ignores case unless asked");

    let err = find_in_view(&records, &view, 0, "(", options);
    assert!(matches!(err, Err(SearchError::InvalidPattern(_))));
}

#[test]
fn test_search_covers_common_header() {
    let line = "08-11 19:11:07.132  495  507 E Crash: boom";
    let parsed = LineParser::new(LogFormat::ThreadTimeContinued).parse_lines([line, "  at Foo"]);
    let view = vec![0, 1];

    let found = find_in_view(&parsed, &view, 1, "Crash", SearchOptions::new()).expect("valid search");
    assert_eq!(found, hit(0, true), "blanked continuation header does not match");
}

#[test]
fn test_blank_text_and_blank_records() {
    let records = records(&["   ", "text"]);
    let view = vec![0, 1];

    let blank = find_in_view(&records, &view, 0, "  ", SearchOptions::new()).expect("valid search");
    assert_eq!(blank, None);

    let options = SearchOptions::new().regex(true);
    let any = find_in_view(&records, &view, 0, ".*", options).expect("valid search");
    assert_eq!(any, hit(1, false), "records with blank text are skipped");
}

#[test]
fn test_empty_view() {
    let records = records(&["text"]);
    let found = find_in_view(&records, &[], 0, "text", SearchOptions::new()).expect("valid search");
    assert_eq!(found, None);
}
