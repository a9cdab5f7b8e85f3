use crate::filter::Combine;
use crate::level::LogLevel;
use crate::parser::LogFormat;
use clap::ValueEnum;

/// Minimum level accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    #[value(alias = "v")]
    Verbose,
    #[value(alias = "d")]
    Debug,
    #[value(alias = "i")]
    Info,
    #[value(alias = "w")]
    Warn,
    #[value(alias = "e")]
    Error,
    #[value(aliases = ["a", "f"])]
    Assert,
}

impl From<LevelArg> for LogLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Verbose => LogLevel::Verbose,
            LevelArg::Debug => LogLevel::Debug,
            LevelArg::Info => LogLevel::Info,
            LevelArg::Warn => LogLevel::Warn,
            LevelArg::Error => LogLevel::Error,
            LevelArg::Assert => LogLevel::Assert,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CombineArg {
    And,
    Or,
}

impl From<CombineArg> for Combine {
    fn from(combine: CombineArg) -> Self {
        match combine {
            CombineArg::And => Combine::And,
            CombineArg::Or => Combine::Or,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Long,
    Threadtime,
    ThreadtimeContinued,
    Javacustom,
    Structured,
}

impl From<FormatArg> for LogFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Long => LogFormat::Long,
            FormatArg::Threadtime => LogFormat::ThreadTime,
            FormatArg::ThreadtimeContinued => LogFormat::ThreadTimeContinued,
            FormatArg::Javacustom => LogFormat::JavaCustom,
            FormatArg::Structured => LogFormat::Structured,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}
