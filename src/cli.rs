use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = env!("CARGO_PKG_NAME"), about, disable_version_flag = true)]
pub struct Cli {
    /// path to folder containing config file (config.yml)
    #[arg(short = 'c', long = "config_path", env = "CONFIG_PATH", default_value = ".")]
    pub config_path: PathBuf,

    /// print version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,
}

/// Name, version and build metadata, one item per line.
pub fn version_text() -> String {
    format!(
        "{}\nversion: {}\nbuild: {}\nbuild time: {}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_NUMBER"),
        env!("BUILD_TIME"),
    )
}
