mod config;
mod excludes;
mod record;
mod walker;

pub use config::BATCH_SIZE;
pub use excludes::{IgnoreEngine, IgnoreOptions, TrashConfig, UserExcludes};
pub use record::ScanRecord;
pub use walker::{ScanContext, walk_parallel};
