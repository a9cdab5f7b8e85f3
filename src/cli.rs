mod selector;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use selector::{ColorMode, CombineArg, FormatArg, LevelArg};

/// Read, filter and search Android logcat captures
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = "LOGCAT_READER_CONFIG")]
    pub config: Option<PathBuf>,

    /// When to colour output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase diagnostic output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// How the input file is parsed
#[derive(Args, Debug, Clone, Default)]
pub struct ParseArgs {
    /// Line grammar of the input
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Characters per record before a message is split
    #[arg(long)]
    pub chunk_limit: Option<usize>,
}

/// Options shared by every command that filters the records
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[command(flatten)]
    pub parse: ParseArgs,

    /// Filter query, e.g. "tag:Activ pid:1024 timeout"
    #[arg(short, long)]
    pub query: Option<String>,

    /// Minimum level shown
    #[arg(short, long, value_enum)]
    pub level: Option<LevelArg>,

    /// How the query terms are combined
    #[arg(long, value_enum)]
    pub combine: Option<CombineArg>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the records that pass the filter
    View {
        /// Log file; the built-in sample is used when missing or unreadable
        file: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Find text inside the filtered records
    Search {
        file: Option<PathBuf>,

        /// Text or pattern to find
        #[arg(short, long)]
        text: String,

        /// View row the search starts from
        #[arg(long, default_value_t = 0)]
        from: usize,

        /// Search towards the top
        #[arg(short, long)]
        backward: bool,

        /// Case-sensitive search
        #[arg(long)]
        match_case: bool,

        /// Treat the text as a regular expression
        #[arg(long)]
        regex: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Record counts per level and the busiest tags
    Info {
        file: Option<PathBuf>,

        /// Number of tags listed
        #[arg(long, default_value_t = 10)]
        tags: usize,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print the unfiltered records around one record position
    Context {
        file: Option<PathBuf>,

        /// Record position to centre on
        #[arg(short, long)]
        row: usize,

        /// Records on each side; defaults to the configured radius
        #[arg(long)]
        radius: Option<usize>,

        #[command(flatten)]
        parse: ParseArgs,
    },
}

impl Commands {
    pub fn file(&self) -> Option<&PathBuf> {
        match self {
            Commands::View { file, .. }
            | Commands::Search { file, .. }
            | Commands::Info { file, .. }
            | Commands::Context { file, .. } => file.as_ref(),
        }
    }

    pub fn parse_args(&self) -> &ParseArgs {
        match self {
            Commands::View { filter, .. }
            | Commands::Search { filter, .. }
            | Commands::Info { filter, .. } => &filter.parse,
            Commands::Context { parse, .. } => parse,
        }
    }

    /// `None` for commands that work on the unfiltered records
    pub fn filter(&self) -> Option<&FilterArgs> {
        match self {
            Commands::View { filter, .. }
            | Commands::Search { filter, .. }
            | Commands::Info { filter, .. } => Some(filter),
            Commands::Context { .. } => None,
        }
    }
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
