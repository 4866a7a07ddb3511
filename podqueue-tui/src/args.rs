use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;
use podqueue_core::ControllerConfig;

/// Command-line arguments for podqueue
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "podqueue")]
#[command(about = "Terminal episode player")]
#[command(version)]
pub struct CliArgs {
    /// Fixed seed for shuffle order
    #[arg(long, env = "PODQUEUE_SEED")]
    pub seed: Option<u64>,

    /// Log level shown in the log tab
    #[arg(long, default_value = "debug", value_parser = parse_level)]
    pub log_level: LevelFilter,

    /// Media files to queue; demo episodes are used when empty
    #[arg(value_name = "MEDIA_PATH")]
    pub media: Vec<PathBuf>,
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    LevelFilter::from_str(raw).map_err(|_| format!("unknown log level {:?}", raw))
}

impl CliArgs {
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig::default().with_optional_seed(self.seed)
    }
}
