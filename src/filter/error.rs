use thiserror::Error;

/// Errors raised when user-supplied text names an unknown level, mode or format
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown log level: '{0}'. Valid levels are: verbose, debug, info, warn, error, assert")]
    UnknownLevel(String),

    #[error("Unknown combination mode: '{0}'. Valid modes are: and, or")]
    UnknownCombine(String),

    #[error(
        "Unknown log format: '{0}'. Valid formats are: long, threadtime, threadtime-continued, javacustom, structured"
    )]
    UnknownFormat(String),
}
