//! VSCode-inspired fuzzy scorer: an ordered-subsequence pre-filter followed by
//! a bounded dynamic program over (query position, text position) cells.
//!
//! Grounded on the two-matrix Needleman-Wunsch-style matcher used by
//! fuzzy-matching crates in the wild (score matrix + backtrace matrix), but
//! bounded to a fixed `MAX_LEN` so the matrices can be allocated once and
//! reused across every call instead of per query.

/// Upper bound on both dimensions of the scoring matrix. Longer inputs are
/// truncated to their first `MAX_LEN` bytes for scoring purposes only.
pub const MAX_LEN: usize = 128;

const NEG_INFINITY: i32 = i32::MIN / 2;

const BASE_MATCH: i32 = 1;
const EXACT_CASE: i32 = 1;
const START_OF_STRING: i32 = 8;
const AFTER_SEPARATOR: i32 = 5;
const AFTER_DOT: i32 = 4;
const CAMEL_BOUNDARY: i32 = 2;
const CONSECUTIVE_FIRST_THREE: i32 = 6;
const CONSECUTIVE_FOURTH_PLUS: i32 = 3;

/// Per-character upper bound used by both threshold short-circuits: the
/// largest total contribution a single matched character can ever receive.
const MAX_PER_CHAR: i32 = BASE_MATCH + EXACT_CASE + START_OF_STRING + CONSECUTIVE_FIRST_THREE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub score: i32,
    /// Strictly increasing byte offsets into the matched text, one per query
    /// character (after truncation to `MAX_LEN`).
    pub positions: Vec<usize>,
}

/// Returns true iff every byte of `pattern` appears in `text` in the same
/// order, not necessarily contiguously. Linear, branchy only on byte
/// equality, no allocation.
pub fn is_subsequence(pattern: &[u8], text: &[u8]) -> bool {
    if pattern.is_empty() {
        return true;
    }
    if pattern.len() > text.len() {
        return false;
    }
    let mut p = 0;
    for &b in text {
        if b == pattern[p] {
            p += 1;
            if p == pattern.len() {
                return true;
            }
        }
    }
    false
}

/// Owns the DP matrices so repeated calls never allocate.
pub struct Scorer {
    m: Vec<i32>,
    from: Vec<i32>,
    run: Vec<u16>,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer {
    pub fn new() -> Self {
        let cells = MAX_LEN * MAX_LEN;
        Scorer {
            m: vec![NEG_INFINITY; cells],
            from: vec![-1; cells],
            run: vec![0; cells],
        }
    }

    #[inline]
    fn idx(i: usize, j: usize) -> usize {
        i * MAX_LEN + j
    }

    /// Scores a (query, text) pair with no early exit.
    pub fn score(
        &mut self,
        query: &str,
        query_lower: &str,
        text: &str,
        text_lower: &str,
    ) -> Option<MatchResult> {
        self.run_dp(
            query.as_bytes(),
            query_lower.as_bytes(),
            text.as_bytes(),
            text_lower.as_bytes(),
            None,
        )
    }

    /// Scores a (query, text) pair, allowed to bail out early once it is
    /// certain the result cannot reach `threshold`. Never changes the
    /// outcome for pairs that do reach `threshold`.
    pub fn score_with_threshold(
        &mut self,
        query: &str,
        query_lower: &str,
        text: &str,
        text_lower: &str,
        threshold: i32,
    ) -> Option<MatchResult> {
        self.run_dp(
            query.as_bytes(),
            query_lower.as_bytes(),
            text.as_bytes(),
            text_lower.as_bytes(),
            Some(threshold),
        )
    }

    fn run_dp(
        &mut self,
        query: &[u8],
        query_lower: &[u8],
        text: &[u8],
        text_lower: &[u8],
        threshold: Option<i32>,
    ) -> Option<MatchResult> {
        let qn = query.len().min(MAX_LEN);
        let tn = text.len().min(MAX_LEN);

        if qn == 0 || qn > tn {
            return None;
        }

        let query = &query[..qn];
        let query_lower = &query_lower[..qn];
        let text = &text[..tn];
        let text_lower = &text_lower[..tn];

        if !is_subsequence(query_lower, text_lower) {
            return None;
        }

        if let Some(threshold) = threshold {
            let upper = qn as i32 * MAX_PER_CHAR;
            if upper < threshold {
                return None;
            }
        }

        for i in 0..qn {
            for j in 0..tn {
                let k = Self::idx(i, j);
                self.m[k] = NEG_INFINITY;
                self.from[k] = -1;
                self.run[k] = 0;
            }
        }

        // Row 0.
        for j in 0..tn {
            if query_lower[0] == text_lower[j] {
                let k = Self::idx(0, j);
                self.m[k] = BASE_MATCH + exact_case(query[0], text[j]) + position_bonus(text, j);
                self.run[k] = 1;
            }
        }

        if let Some(threshold) = threshold
            && !row_can_still_reach(&self.m[Self::idx(0, 0)..Self::idx(0, tn)], qn - 1, threshold)
        {
            return None;
        }

        for i in 1..qn {
            for j in i..tn {
                if query_lower[i] != text_lower[j] {
                    continue;
                }

                let mut best_score = NEG_INFINITY;
                let mut best_k: i32 = -1;
                let mut best_run: u16 = 1;

                for k in 0..j {
                    let prev = self.m[Self::idx(i - 1, k)];
                    if prev <= NEG_INFINITY {
                        continue;
                    }

                    let (bonus, run_len) = if k + 1 == j {
                        let candidate_run = self.run[Self::idx(i - 1, k)] + 1;
                        let bonus = if candidate_run <= 3 {
                            CONSECUTIVE_FIRST_THREE
                        } else {
                            CONSECUTIVE_FOURTH_PLUS
                        };
                        (bonus, candidate_run)
                    } else {
                        (0, 1)
                    };

                    let candidate = prev + bonus;
                    if candidate > best_score {
                        best_score = candidate;
                        best_k = k as i32;
                        best_run = run_len;
                    }
                }

                if best_k >= 0 {
                    let cell = Self::idx(i, j);
                    self.m[cell] =
                        best_score + BASE_MATCH + exact_case(query[i], text[j]) + position_bonus(text, j);
                    self.from[cell] = best_k;
                    self.run[cell] = best_run;
                }
            }

            if let Some(threshold) = threshold {
                let remaining_rows = qn - 1 - i;
                if !row_can_still_reach(
                    &self.m[Self::idx(i, 0)..Self::idx(i, tn)],
                    remaining_rows,
                    threshold,
                ) {
                    return None;
                }
            }
        }

        let last = qn - 1;
        let mut best_score = NEG_INFINITY;
        let mut best_j: Option<usize> = None;
        for j in 0..tn {
            let s = self.m[Self::idx(last, j)];
            if s > best_score {
                best_score = s;
                best_j = Some(j);
            }
        }

        let best_j = best_j?;
        if best_score <= NEG_INFINITY {
            return None;
        }
        if let Some(threshold) = threshold
            && best_score < threshold
        {
            return None;
        }

        let mut positions = Vec::with_capacity(qn);
        let mut i = last as i32;
        let mut j = best_j as i32;
        while i >= 0 {
            positions.push(j as usize);
            let next_j = self.from[Self::idx(i as usize, j as usize)];
            i -= 1;
            j = next_j;
        }
        positions.reverse();

        Some(MatchResult {
            score: best_score,
            positions,
        })
    }
}

/// Upper bound on what `remaining_rows` more matched characters could still
/// contribute, used to prune a row once no further row can close the gap to
/// `threshold`.
fn row_can_still_reach(row: &[i32], remaining_rows: usize, threshold: i32) -> bool {
    let row_max = row.iter().copied().max().unwrap_or(NEG_INFINITY);
    if row_max <= NEG_INFINITY {
        return false;
    }
    row_max + remaining_rows as i32 * MAX_PER_CHAR >= threshold
}

#[inline]
fn exact_case(query_byte: u8, text_byte: u8) -> i32 {
    if query_byte == text_byte { EXACT_CASE } else { 0 }
}

/// Position bonuses are mutually exclusive, applied in this precedence:
/// start-of-string, then separator, then dot, then camel boundary.
#[inline]
fn position_bonus(text: &[u8], j: usize) -> i32 {
    if j == 0 {
        return START_OF_STRING;
    }

    let prev = text[j - 1];
    if matches!(prev, b'/' | b'\\' | b'-' | b'_') {
        return AFTER_SEPARATOR;
    }
    if prev == b'.' {
        return AFTER_DOT;
    }
    if prev.is_ascii_lowercase() && text[j].is_ascii_uppercase() {
        return CAMEL_BOUNDARY;
    }
    0
}
