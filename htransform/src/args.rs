use std::path::PathBuf;

use clap::Parser;

/// HTTP header transformation proxy
#[derive(Debug, Parser)]
#[command(name = "htransform", about = "Rename, set, and delete HTTP headers with configured rules")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "htransform.toml", env = "HTRANSFORM_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "HTRANSFORM_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Validate the configuration and exit
    #[arg(long)]
    pub check: bool,
}
