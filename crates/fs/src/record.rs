/// One filesystem entry produced by the walker, before it becomes a Path Index entry.
///
/// Only what the index actually needs survives here: a root-relative, `/`-separated
/// path and the flags the walker itself needs to decide whether to recurse or emit.
#[derive(Debug, Clone)]
pub struct ScanRecord {
    /// Path relative to the scan root, using `/` as separator regardless of platform.
    pub rel_path: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub is_special: bool,
}
