use anyhow::Context;
use clap::Parser;
use news_site::config::{Config, DEFAULT_DATABASE_URL};
use news_site::ingest::NewsLoader;
use news_site::manager::NewsManager;
use std::path::PathBuf;

/// Replace the news table with the contents of a CSV file.
#[derive(Parser, Debug)]
#[command(name = "ingest")]
struct Args {
    /// CSV with columns: id, headline, body, image, url
    #[arg(env = "NEWS_CSV")]
    dataset: PathBuf,

    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// The first line of the file is data, not a header row
    #[arg(long)]
    no_headers: bool,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let manager = NewsManager::new(Config::new(args.database_url.as_str()));

    let written = NewsLoader::new(&manager)
        .has_headers(!args.no_headers)
        .load_csv(&args.dataset)
        .with_context(|| {
            format!(
                "loading {} into {}",
                args.dataset.display(),
                args.database_url
            )
        })?;

    log::info!("{} news records in {}", written, args.database_url);
    Ok(())
}
