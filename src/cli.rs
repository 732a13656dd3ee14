use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ghnav",
    version,
    about = "Browse open GitHub pull requests by owner and repository"
)]
pub struct Cli {
    /// Config file (default: ~/.config/ghnav/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rows per page, overriding the config file
    #[arg(short, long)]
    pub page_size: Option<usize>,

    /// Show the debug line on startup
    #[arg(short, long)]
    pub debug: bool,

    /// Write logs to this file (the terminal is in use by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
