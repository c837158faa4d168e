/// Directory used when no per-user data directory can be determined.
pub const FALLBACK_STORE_DIR: &str = ".category-filter";
/// Application name for the per-user data directory.
pub const APP_NAME: &str = "category-filter";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const PROMPT: &str = "> ";
pub const EXIT_COMMAND: &str = "/bye";
