use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lazysettings::app::App;
use lazysettings::cli::Args;
use lazysettings::config::{self, KeyResolver};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting lazysettings");

    let args = Args::parse();

    let config = config::load()?;
    let paths = config
        .paths
        .clone()
        .merged(args.path_overrides())
        .resolve(&config::home_dir());
    info!("Using paths {:?}", paths);

    let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings.clone())));

    let mut app = App::new(
        paths,
        &config.theme.name,
        args.tab.unwrap_or_default(),
        config::config_path(),
        resolver,
    );
    app.run().await?;

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("lazysettings").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "lazysettings.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
