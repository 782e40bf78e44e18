//! clap [Args](clap::Args) for logging configuration.

use clap::{ArgAction, Args, ValueEnum};
use eyre::eyre;
use std::{
    fmt::{self, Display},
    io::IsTerminal,
    str::FromStr,
};
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::{filter::Directive, EnvFilter};

/// The log configuration.
#[derive(Debug, Args)]
#[clap(next_help_heading = "LOGGING")]
pub(crate) struct LogArgs {
    /// The filter to use for logs written to stderr, e.g. `evmi_vm=debug`.
    #[clap(long = "log.stdout.filter", value_name = "FILTER", global = true, default_value = "")]
    pub(crate) log_stdout_filter: String,

    /// Sets whether or not the formatter emits ANSI terminal escape codes for colors and other
    /// text formatting.
    #[clap(
        long,
        value_name = "COLOR",
        global = true,
        default_value_t = ColorMode::Auto
    )]
    pub(crate) color: ColorMode,

    /// The verbosity settings for the tracer.
    #[clap(flatten)]
    pub(crate) verbosity: Verbosity,
}

impl LogArgs {
    /// Builds the filter from the verbosity level plus any extra directives.
    fn filter(&self) -> eyre::Result<EnvFilter> {
        let mut filter = EnvFilter::builder()
            .with_default_directive(self.verbosity.directive())
            .parse("")?;
        for directive in self.log_stdout_filter.split(',').filter(|d| !d.trim().is_empty()) {
            filter = filter.add_directive(directive.trim().parse()?);
        }
        Ok(filter)
    }

    /// Initializes tracing with the configured options from cli args.
    pub(crate) fn init_tracing(&self) -> eyre::Result<()> {
        let use_color = match self.color {
            ColorMode::Always => true,
            ColorMode::Auto => std::io::stderr().is_terminal(),
            ColorMode::Never => false,
        };

        tracing_subscriber::fmt()
            .with_env_filter(self.filter()?)
            .with_ansi(use_color)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| eyre!("failed to install tracing subscriber: {e}"))
    }
}

/// The color mode for the cli.
#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
pub(crate) enum ColorMode {
    /// Colors on
    Always,
    /// Colors on when writing to a terminal
    Auto,
    /// Colors off
    Never,
}

impl Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Always => write!(f, "always"),
            ColorMode::Auto => write!(f, "auto"),
            ColorMode::Never => write!(f, "never"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(ColorMode::Always),
            "auto" => Ok(ColorMode::Auto),
            "never" => Ok(ColorMode::Never),
            _ => Err(format!("Invalid color mode: {s}")),
        }
    }
}

/// The verbosity settings for the cli.
#[derive(Debug, Copy, Clone, Args)]
#[clap(next_help_heading = "DISPLAY")]
pub(crate) struct Verbosity {
    /// Set the minimum log level.
    ///
    /// -v     Warnings & Errors
    /// -vv    Info
    /// -vvv   Debug
    /// -vvvv  Traces (warning: very verbose!)
    #[clap(short, long, action = ArgAction::Count, global = true, default_value_t = 1, verbatim_doc_comment, help_heading = "DISPLAY")]
    verbosity: u8,

    /// Silence all log output.
    #[clap(long, alias = "silent", short = 'q', global = true, help_heading = "DISPLAY")]
    quiet: bool,
}

impl Verbosity {
    /// Get the corresponding [Level] for the given verbosity, or none if the verbosity
    /// corresponds to silent.
    pub(crate) fn level(&self) -> Option<Level> {
        if self.quiet {
            return None;
        }

        Some(match self.verbosity.saturating_sub(1) {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        })
    }

    /// Get the corresponding [Directive] for the given verbosity.
    pub(crate) fn directive(&self) -> Directive {
        match self.level() {
            Some(level) => level.into(),
            None => LevelFilter::OFF.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[clap(flatten)]
        logs: LogArgs,
    }

    fn parse(args: &[&str]) -> LogArgs {
        TestArgs::parse_from(std::iter::once("evmi").chain(args.iter().copied())).logs
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse(&[]).verbosity.level(), Some(Level::WARN));
        assert_eq!(parse(&["-vv"]).verbosity.level(), Some(Level::INFO));
        assert_eq!(parse(&["-vvv"]).verbosity.level(), Some(Level::DEBUG));
        assert_eq!(parse(&["-vvvvvv"]).verbosity.level(), Some(Level::TRACE));
        assert_eq!(parse(&["-q"]).verbosity.level(), None);
    }

    #[test]
    fn test_filter_directives() {
        assert!(parse(&["--log.stdout.filter", "evmi_vm=trace,evmi_common=debug"]).filter().is_ok());
        assert!(parse(&["--log.stdout.filter", "evmi_vm=bogus"]).filter().is_err());
    }

    #[test]
    fn test_color_mode_round_trip() {
        for mode in [ColorMode::Always, ColorMode::Auto, ColorMode::Never] {
            assert_eq!(mode.to_string().parse::<ColorMode>(), Ok(mode));
        }
    }
}
