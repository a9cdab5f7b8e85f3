pub mod cli;
pub mod config;
pub mod display;
pub mod filter;
pub mod level;
pub mod parser;
pub mod search;
pub mod session;
pub mod view;

use anyhow::{Context, bail};
use tracing_subscriber::EnvFilter;

pub use cli::{ColorMode, Commands, FilterArgs, ParseArgs, cli_parse};
pub use config::{ConfigError, ReaderConfig, load_config};
pub use filter::{Combine, FilterError, FilterSet, Predicate, Query, print_filter_warnings};
pub use level::LogLevel;
pub use parser::{LineParser, LogFormat, LogRecord, ParseError, ParserState, split_fixed_length};
pub use search::{SearchDirection, SearchError, SearchHit, SearchOptions, Searcher};
pub use session::LogSession;
pub use view::{ContextWindow, FilterRequest, FilteredView, ViewRefresher, context_window};

/// Installs the stderr subscriber; `RUST_LOG` wins over the verbosity flag
pub fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line flags take precedence over the configuration file
fn apply_overrides(
    mut config: ReaderConfig,
    parse: &ParseArgs,
    filter: Option<&FilterArgs>,
) -> Result<ReaderConfig, ConfigError> {
    if let Some(format) = parse.format {
        config.format = format.into();
    }
    if let Some(chunk_limit) = parse.chunk_limit {
        config.chunk_limit = chunk_limit;
    }
    if let Some(level) = filter.and_then(|args| args.level) {
        config.min_level = level.into();
    }
    if let Some(combine) = filter.and_then(|args| args.combine) {
        config.combine = combine.into();
    }
    config.validate()?;
    Ok(config)
}

pub async fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_tracing(cli.verbose);

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let config = load_config(cli.config.as_deref()).context("Failed to load config")?;
    let mut config = apply_overrides(config, cli.command.parse_args(), cli.command.filter())?;
    // a one-shot command has nothing to coalesce
    config.debounce_ms = 0;

    let session = LogSession::load_file_or_sample(cli.command.file().map(|p| p.as_path()), &config);

    let view = match cli.command.filter() {
        Some(args) => {
            let request = FilterRequest::new(
                args.query.clone().unwrap_or_default(),
                config.min_level,
                config.combine,
            );
            print_filter_warnings(&request.filter_set());
            session.submit(request);
            session
                .wait_for_version(1)
                .await
                .context("Filter worker stopped before publishing a view")?
        }
        None => session.view(),
    };

    match &cli.command {
        Commands::View { .. } => {
            display::print_records(session.records(), view.rows());
            if cli.verbose > 0 {
                eprintln!("{} of {} records shown", view.len(), session.records().len());
            }
        }
        Commands::Search {
            text,
            from,
            backward,
            match_case,
            regex,
            ..
        } => {
            let direction = if *backward {
                SearchDirection::Backward
            } else {
                SearchDirection::Forward
            };
            let options = SearchOptions::new()
                .direction(direction)
                .match_case(*match_case)
                .regex(*regex);

            match session.search(*from, text, options)? {
                Some(hit) => {
                    let Some(model_index) = view.model_index(hit.position) else {
                        bail!("search returned row {} outside the view", hit.position);
                    };
                    let wrapped = if hit.wrapped { " (wrapped)" } else { "" };
                    println!("row {} (record {}){}", hit.position, model_index, wrapped);
                    if let Some(record) = session.records().get(model_index) {
                        println!("{}", display::render_record(record));
                    }
                }
                None => println!("no matches"),
            }
        }
        Commands::Info { tags, .. } => {
            display::print_summary(session.records(), view.rows(), *tags);
        }
        Commands::Context { row, radius, .. } => {
            let radius = radius.unwrap_or(config.context_radius);
            let Some(window) = session.context(*row, radius) else {
                bail!(
                    "record {} is outside the {} loaded records",
                    row,
                    session.records().len()
                );
            };
            display::print_context(&window);
        }
    }

    session.shutdown().await;
    Ok(())
}
