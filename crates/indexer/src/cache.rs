//! On-disk cache of a previously built Index, keyed by the scan root.
//!
//! Binary format (little-endian), exactly as specified: `magic`, `version`,
//! a length-prefixed root path, a timestamp, an entry count, then each entry
//! as a length-prefixed path. Any integrity failure — bad magic, a version
//! or root mismatch, or a truncated read — is treated as a cache miss, never
//! a hard error; the caller falls back to a full scan.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use sniff_engine::PathIndex;
use sniff_runtime::index_cache_path;

pub const MAGIC: u32 = 0x534E_4946;
pub const VERSION: u16 = 1;

#[derive(Debug)]
pub enum CacheError {
    Missing,
    BadMagic,
    VersionMismatch { found: u16 },
    RootMismatch,
    Truncated,
    Io(io::Error),
}

impl From<io::Error> for CacheError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            CacheError::Truncated
        } else if e.kind() == io::ErrorKind::NotFound {
            CacheError::Missing
        } else {
            CacheError::Io(e)
        }
    }
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::Missing => write!(f, "cache file not found"),
            CacheError::BadMagic => write!(f, "cache file has an unrecognized magic number"),
            CacheError::VersionMismatch { found } => {
                write!(f, "cache file version {found} is not supported")
            }
            CacheError::RootMismatch => write!(f, "cache file was built for a different root"),
            CacheError::Truncated => write!(f, "cache file is truncated or corrupt"),
            CacheError::Io(e) => write!(f, "cache I/O error: {e}"),
        }
    }
}

impl std::error::Error for CacheError {}

/// Loaded cache contents, ready to replace an Index wholesale.
pub struct CacheLoad {
    pub paths: Vec<String>,
    pub timestamp: i64,
}

fn root_key(root: &Path) -> String {
    root.canonicalize()
        .unwrap_or_else(|_| root.to_path_buf())
        .to_string_lossy()
        .into_owned()
}

fn read_u16(r: &mut impl Read) -> Result<u16, CacheError> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32(r: &mut impl Read) -> Result<u32, CacheError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_i64(r: &mut impl Read) -> Result<i64, CacheError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(i64::from_le_bytes(buf))
}

fn read_lenstr(r: &mut impl Read) -> Result<String, CacheError> {
    let len = read_u16(r)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|_| CacheError::Truncated)
}

/// Loads the cache for `root`, validating the header before trusting any
/// entry. Returns `Err` for any integrity problem; callers treat every
/// variant except I/O surprises as a plain cache miss.
pub fn load(root: &Path) -> Result<CacheLoad, CacheError> {
    let path = index_cache_path(root);
    let file = File::open(&path)?;
    let mut reader = BufReader::new(file);

    let magic = read_u32(&mut reader)?;
    if magic != MAGIC {
        return Err(CacheError::BadMagic);
    }

    let version = read_u16(&mut reader)?;
    if version != VERSION {
        return Err(CacheError::VersionMismatch { found: version });
    }

    let stored_root = read_lenstr(&mut reader)?;
    if stored_root != root_key(root) {
        return Err(CacheError::RootMismatch);
    }

    let timestamp = read_i64(&mut reader)?;
    let entry_count = read_u32(&mut reader)?;

    let mut paths = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        paths.push(read_lenstr(&mut reader)?);
    }

    Ok(CacheLoad { paths, timestamp })
}

/// Clears `index` and repopulates it from a successful cache load.
pub fn apply(index: &mut PathIndex, load: &CacheLoad) {
    index.clear();
    for path in &load.paths {
        index.add(path);
    }
}

fn write_lenstr(w: &mut impl Write, s: &str) -> io::Result<()> {
    let len: u16 = s
        .len()
        .try_into()
        .expect("path exceeds u16::MAX bytes; caller must truncate before caching");
    w.write_all(&len.to_le_bytes())?;
    w.write_all(s.as_bytes())
}

/// Writes the current contents of `index` to the cache file for `root`,
/// via a temp file in the same directory renamed into place, so a reader
/// never observes a half-written cache.
pub fn store(root: &Path, index: &PathIndex, timestamp: i64) -> io::Result<()> {
    let path = index_cache_path(root);
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        writer.write_all(&MAGIC.to_le_bytes())?;
        writer.write_all(&VERSION.to_le_bytes())?;
        write_lenstr(&mut writer, &root_key(root))?;
        writer.write_all(&timestamp.to_le_bytes())?;
        writer.write_all(&(index.count() as u32).to_le_bytes())?;
        for (_, entry) in index.iter_entries() {
            write_lenstr(&mut writer, &entry.path)?;
        }
        writer.flush()?;
    }
    tmp.persist(&path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
