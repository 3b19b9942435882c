use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Command-line options accepted by the interpreter.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "nook", version, about = "A small interactive command interpreter")]
pub struct Flags {
    /// Suppress diagnostics below error level
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug output
    #[arg(short, long, conflicts_with = "quiet")]
    pub debug: bool,

    /// Read startup commands from FILE instead of ~/.nook_profile and ~/.nookrc
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Flags {
    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Warn
        }
    }

    pub fn init_logging(&self) {
        env_logger::Builder::new()
            .filter_level(self.log_level())
            .parse_default_env()
            .format_timestamp(None)
            .init();
    }
}
