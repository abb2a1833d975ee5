//! Terminal back office for the storefront.
//!
//! Mounts a data grid for one administration resource, loads it from the
//! storefront API and drives it from a line prompt.

mod app;
mod commands;
mod error;
mod paths;
mod terminal;

use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;
use storefront_grid::resources::Resource;

#[derive(Parser, Debug)]
#[command(name = "storefront-admin")]
#[command(about = "Browse storefront administration data in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the storefront API
    #[arg(long, env = "STOREFRONT_API_URL")]
    pub api_url: String,

    /// Resource to browse: products, brands, categories, size-types, users
    #[arg(short, long, default_value = "products")]
    pub resource: Resource,

    /// Rows per page
    #[arg(long)]
    pub rows: Option<usize>,

    /// JSON file with grid settings
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Session token sent as cookie to credentialed endpoints
    #[arg(long, env = "STOREFRONT_SESSION", hide_env_values = true)]
    pub session: Option<String>,

    /// Base URL for images (defaults to the API URL)
    #[arg(long)]
    pub server_url: Option<String>,

    /// Use the French wording of the back office
    #[arg(long)]
    pub french: bool,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        eprintln!("Warning: no cache directory, logging disabled");
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("Warning: failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: cannot create {}: {}", path.display(), e),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match app::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
