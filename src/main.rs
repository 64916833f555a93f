mod app;
mod cache;
mod catalog;
mod config;
mod connectivity;
mod dashboard;
mod debounce;
mod error;
mod event;
mod logging;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shopdash")]
#[command(about = "A terminal dashboard for browsing a remote product catalog")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/shopdash/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Product endpoint returning a JSON array of products
  #[arg(short, long)]
  url: Option<String>,

  /// Rows per page
  #[arg(short = 'n', long)]
  page_size: Option<usize>,

  /// Do not read or write the local product cache
  #[arg(long)]
  no_cache: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let mut config = config::Config::load(args.config.as_deref())?;

  // Command line overrides
  if let Some(url) = args.url {
    config.api.url = url;
  }
  if let Some(page_size) = args.page_size {
    config.page_size = page_size;
  }
  if args.no_cache {
    config.cache.enabled = false;
  }
  let config = config.validated()?;

  let _log_guard = logging::init(&config::data_dir()?)?;

  // Initialize and run the app
  let mut app = app::App::new(config)?;
  app.run().await?;

  Ok(())
}
