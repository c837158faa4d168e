use category_filter::consts::{APP_NAME, FALLBACK_STORE_DIR};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "category-filter")]
#[command(about = "Compose a test-run category filter from a checklist", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory the category catalog is persisted in.
    #[arg(long)]
    pub store: Option<PathBuf>,
    /// Keep the catalog in memory only; nothing is read from or written to disk.
    #[arg(long, conflicts_with = "store")]
    pub memory: bool,
    /// Filter expression currently committed on the host page.
    #[arg(long, short, default_value = "")]
    pub expression: String,
}

impl Cli {
    pub fn store_dir(&self) -> PathBuf {
        self.store.clone().unwrap_or_else(|| {
            ProjectDirs::from("", "", APP_NAME)
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(FALLBACK_STORE_DIR))
        })
    }
}
