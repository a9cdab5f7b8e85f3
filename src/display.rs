use crate::level::LogLevel;
use crate::parser::LogRecord;
use crate::view::ContextWindow;
use colored::{ColoredString, Colorize};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use std::collections::{BTreeMap, HashMap};

pub fn level_color(level: LogLevel, text: &str) -> ColoredString {
    match level {
        LogLevel::Verbose => text.bright_black(),
        LogLevel::Debug => text.blue(),
        LogLevel::Info => text.green(),
        LogLevel::Warn => text.yellow(),
        LogLevel::Error => text.red(),
        LogLevel::Assert => text.magenta().bold(),
    }
}

/// One record as a single coloured line
pub fn render_record(record: &LogRecord) -> ColoredString {
    level_color(record.level(), &record.to_string())
}

/// Prints the records at `rows`, in order
pub fn print_records(records: &[LogRecord], rows: &[usize]) {
    for record in rows.iter().filter_map(|&row| records.get(row)) {
        println!("{}", render_record(record));
    }
}

/// Prints a context window, marking the focused record
pub fn print_context(window: &ContextWindow<'_>) {
    for (offset, record) in window.records.iter().enumerate() {
        let position = window.start + offset;
        if offset == window.focus {
            println!("{} {}", format!("{position:>7}>").as_str().bold(), render_record(record));
        } else {
            println!("{} {}", format!("{position:>7} ").as_str().bright_black(), render_record(record));
        }
    }
}

pub fn level_counts<'a>(records: impl IntoIterator<Item = &'a LogRecord>) -> BTreeMap<LogLevel, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.level()).or_insert(0) += 1;
    }
    counts
}

/// The `n` most frequent tags, busiest first; ties sorted by name
pub fn top_tags<'a>(records: impl IntoIterator<Item = &'a LogRecord>, n: usize) -> Vec<(&'a str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records.into_iter().filter(|record| !record.tag().is_empty()) {
        *counts.entry(record.tag()).or_insert(0) += 1;
    }
    let mut items: Vec<(&str, usize)> = counts.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    items.truncate(n);
    items
}

/// Records at `rows`, skipping positions outside `records`
fn visible<'a>(records: &'a [LogRecord], rows: &'a [usize]) -> impl Iterator<Item = &'a LogRecord> + 'a {
    rows.iter().filter_map(|&row| records.get(row))
}

fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|header| Cell::new(header)));
    table
}

fn percent(count: usize, total: usize) -> String {
    if total == 0 {
        return format!("{:>6.2}%", 0.0);
    }
    format!("{:>6.2}%", count as f64 / total as f64 * 100.0)
}

/// Level and tag tables for the records at `rows`
pub fn build_summary_table(records: &[LogRecord], rows: &[usize], max_tags: usize) -> (Table, Table) {
    let total = visible(records, rows).count();

    let mut levels = create_styled_table(&["Level", "Count", "Percent"]);
    for (level, count) in level_counts(visible(records, rows)) {
        levels.add_row(vec![
            Cell::new(format!("{} {}", level.letter(), level.name())),
            Cell::new(count),
            Cell::new(percent(count, total)),
        ]);
    }

    let mut tags = create_styled_table(&["Tag", "Count", "Percent"]);
    for (tag, count) in top_tags(visible(records, rows), max_tags) {
        tags.add_row(vec![
            Cell::new(tag),
            Cell::new(count),
            Cell::new(percent(count, total)),
        ]);
    }

    (levels, tags)
}

pub fn print_summary(records: &[LogRecord], rows: &[usize], max_tags: usize) {
    let total = visible(records, rows).count();
    let continuations = visible(records, rows).filter(|record| record.is_continuation()).count();
    println!("Total records: {}", total.to_string().green().bold());
    println!("Continuation records: {}", continuations);

    let (levels, tags) = build_summary_table(records, rows, max_tags);
    println!("\n{}", "LOG LEVELS".bold());
    println!("{levels}");
    if visible(records, rows).any(|record| !record.tag().is_empty()) {
        println!("\n{}", "BUSIEST TAGS".bold());
        println!("{tags}");
    }
}
