use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::directory::{Directory, HttpDirectory};
use crate::home::Preselect;

mod app;
mod cli;
mod config;
mod core;
mod directory;
mod home;
mod points;
mod search;
mod theme;
mod tui;
mod widget;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting coleta");

    let args = cli::Args::parse();

    let config = config::load()?;
    let theme = theme::theme_from_name(&config.theme.name);
    let directory: Arc<dyn Directory> = Arc::new(HttpDirectory::new(&config.directory)?);

    let preselect = Preselect {
        region: args.state,
        city: args.city,
    };

    let mut app = App::new(directory, theme, preselect);
    app.run().await?;

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("coleta").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "coleta.log");
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
