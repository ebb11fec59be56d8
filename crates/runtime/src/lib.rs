mod config;
pub mod history;
pub mod logging;

pub use config::{
    DEFAULT_PROJECT_IGNORE_PATTERNS, DEFAULT_SYSTEM_SKIP_PREFIXES, PROGRAM_NAME, cache_dir,
    index_cache_path,
};

pub use logging::init;
