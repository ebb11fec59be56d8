//! Per-search query normalization.

/// A normalized search string, built once per `search()` call.
pub struct Query<'a> {
    pub raw: &'a str,
    pub lower: String,
    pub uses_full_path: bool,
}

impl<'a> Query<'a> {
    pub fn new(raw: &'a str) -> Self {
        let uses_full_path = raw.bytes().any(|b| b == b'/' || b == b'\\');
        let bytes: Vec<u8> = raw.bytes().map(|b| b.to_ascii_lowercase()).collect();
        let lower = String::from_utf8(bytes).expect("ASCII-folding preserves UTF-8 validity");

        Query {
            raw,
            lower,
            uses_full_path,
        }
    }
}
