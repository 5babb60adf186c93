//! soc
//!
//! Web server for browsing preclinical study data.

mod cli_types;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::Cli;
use soc_web::{AppState, ServerConfig, WebError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format_timestamp(None);
    }
    // RUST_LOG wins over the flags
    builder.parse_default_env();
    builder.init();
}

async fn run(cli: Cli) -> Result<(), WebError> {
    let settings_file = cli.config.clone().unwrap_or_else(soc_web::settings_path);
    let settings = soc_web::load_settings(&settings_file)?;
    let config = ServerConfig::resolve(&cli.overrides(), &settings);

    log::info!("Study database: {}", config.database.display());
    log::debug!("Static assets: {}", config.static_dir.display());
    if !config.database.is_file() {
        log::warn!(
            "{} does not exist yet; pages will fail until it is created",
            config.database.display()
        );
    }

    let listener =
        soc_web::bind_with_fallback(&config.host, config.port, config.fallback_port).await?;
    let addr = listener.local_addr()?;
    print_startup_hint(&config, addr);

    let state = AppState::new(config.database).with_static_dir(config.static_dir);
    soc_web::serve(listener, state).await?;
    Ok(())
}

fn print_startup_hint(config: &ServerConfig, addr: std::net::SocketAddr) {
    let url = if addr.ip().is_unspecified() {
        format!("http://localhost:{}/index.html", addr.port())
    } else {
        format!("http://{addr}/index.html")
    };
    log::info!(
        "{} {}",
        "Serving studies at".if_supports_color(Stderr, |t| t.bold()),
        url.if_supports_color(Stderr, |t| t.cyan()),
    );
    if config.port != 0 && addr.port() != config.port {
        log::warn!(
            "Port {} was unavailable; listening on {} instead",
            config.port,
            addr.port()
        );
    }
}
