//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use soc_web::Overrides;

#[derive(Parser)]
#[command(name = "soc")]
#[command(about = "Serve the preclinical study browser", long_about = None)]
pub(crate) struct Cli {
    /// Settings file (defaults to ~/.config/soc/settings.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Study database file (defaults to soc_data/soc_data.db next to the executable)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Directory served under /static/ (defaults to static/ next to the executable)
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Port tried once if the primary port can't be bound (defaults to port + 1)
    #[arg(long, conflicts_with = "no_fallback")]
    pub fallback_port: Option<u16>,

    /// Fail instead of retrying on the fallback port
    #[arg(long)]
    pub no_fallback: bool,

    /// Only show warnings and errors
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            fallback_port: self.fallback_port,
            no_fallback: self.no_fallback,
            database: self.database.clone(),
            static_dir: self.static_dir.clone(),
        }
    }
}
