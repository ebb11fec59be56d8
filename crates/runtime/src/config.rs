use std::path::{Path, PathBuf};

pub const PROGRAM_NAME: &str = "sniff";
pub const PROGRAM_LOG_LEVEL: &str = "SNIFF_LOG_LEVEL";

/// Extension used for persisted index cache files.
pub const INDEX_CACHE_EXT: &str = "idx";

/// Seed used for the root-path hash that names a cache file (fixed, never changes
/// across versions: changing it would silently orphan every existing cache file).
pub const CACHE_PATH_HASH_SEED: u64 = 0;

pub fn xdg_or_home(xdg_var: &str, home_suffix: &str) -> PathBuf {
    if let Some(dir) = std::env::var_os(xdg_var) {
        PathBuf::from(dir)
    } else {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(home_suffix)
    }
}

/// Platform cache directory for this program, per the documented layout:
/// macOS uses `~/Library/Caches/<name>`, Windows uses `%LOCALAPPDATA%\<name>`,
/// everything else follows the XDG base-directory spec.
pub fn cache_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Library/Caches")
            .join(PROGRAM_NAME)
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var_os("LOCALAPPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(PROGRAM_NAME)
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_or_home("XDG_CACHE_HOME", ".cache").join(PROGRAM_NAME)
    }
}

/// Path of the on-disk cache file for a given scan root.
///
/// The file name is the lowercase hex of a 64-bit hash of the root's absolute
/// path, so the same root always resolves to the same cache file regardless of
/// the directory the caller is invoked from.
pub fn index_cache_path(root: &Path) -> PathBuf {
    let absolute = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let key = absolute.to_string_lossy();
    let hash = wyhash::wyhash(key.as_bytes(), CACHE_PATH_HASH_SEED);
    cache_dir().join(format!("{hash:016x}.{INDEX_CACHE_EXT}"))
}

/// Default project-relative ignore patterns for common build artifacts, VCS dirs, etc.
pub const DEFAULT_PROJECT_IGNORE_PATTERNS: &[&str] = &[
    "venv/",
    ".venv/",
    "build/",
    ".cache/",
    "dist/",
    ".DS_Store",
    ".git/",
    ".hg/",
    ".svn/",
    "node_modules/",
    "target/",
    "Thumbs.db",
    "vendor/",
    "lost+found/",
];

/// System-ish directories to skip when the scan root is `/`.
pub const DEFAULT_SYSTEM_SKIP_PREFIXES: &[&str] = &[
    "/proc",
    "/sys",
    "/dev",
    "/run",
    "/var/run",
    "/var/tmp",
    "/private/tmp",
];
