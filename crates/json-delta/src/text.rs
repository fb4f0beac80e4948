//! Text diffs: diff-match-patch patch text embedded in `[unidiff, 0, 2]`.
//!
//! A patch text is a list of hunks:
//!
//! ```text
//! @@ -1,5 +1,6 @@
//!  hel
//! -lo
//! +p me
//! ```
//!
//! Each body line starts with ` ` (equal), `-` (delete) or `+` (insert); the
//! rest of the line is URI-encoded.
//!
//! Header positions and lengths count **UTF-16 code units**, as
//! diff-match-patch does. Text is edited as Rust `char`s; offsets are
//! converted before matching.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::PatchError;

// ── Types ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOpType {
    Del = -1,
    Eql = 0,
    Ins = 1,
}

pub type PatchOperation = (PatchOpType, String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub length1: usize,
    pub start2: usize,
    pub length2: usize,
    pub ops: Vec<PatchOperation>,
}

fn header() -> Result<&'static Regex, PatchError> {
    static RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^@@ -(\d+),?(\d*) \+(\d+),?(\d*) @@$"))
        .as_ref()
        .map_err(|e| PatchError::InvalidHunk(e.to_string()))
}

// ── Parsing ───────────────────────────────────────────────────────────────

/// Parse a diff-match-patch patch text into hunks.
pub fn parse_patch(text: &str) -> Result<Vec<Hunk>, PatchError> {
    let header = header()?;
    let mut hunks: Vec<Hunk> = Vec::new();

    for line in text.split('\n') {
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = header.captures(line) {
            let (_, length1) = coords(&caps[1], &caps[2])?;
            let (start2, length2) = coords(&caps[3], &caps[4])?;
            hunks.push(Hunk { length1, start2, length2, ops: Vec::new() });
            continue;
        }
        let hunk = hunks
            .last_mut()
            .ok_or_else(|| PatchError::InvalidHunk(format!("line outside hunk: {line:?}")))?;
        let mut chars = line.chars();
        let op_type = match chars.next() {
            Some(' ') => PatchOpType::Eql,
            Some('-') => PatchOpType::Del,
            Some('+') => PatchOpType::Ins,
            _ => return Err(PatchError::InvalidHunk(format!("invalid line: {line:?}"))),
        };
        let body = urlencoding::decode(chars.as_str())
            .map_err(|e| PatchError::InvalidHunk(e.to_string()))?;
        push_op(&mut hunk.ops, op_type, &body);
    }
    Ok(hunks)
}

/// Convert a `start[,length]` header pair into a 0-based start and a length.
///
/// The header is 1-based except for empty ranges, which name the position
/// just before the range.
fn coords(start: &str, length: &str) -> Result<(usize, usize), PatchError> {
    let start: usize = start
        .parse()
        .map_err(|_| PatchError::InvalidHunk(format!("invalid start {start:?}")))?;
    let length: usize = if length.is_empty() {
        1
    } else {
        length
            .parse()
            .map_err(|_| PatchError::InvalidHunk(format!("invalid length {length:?}")))?
    };
    if length == 0 {
        Ok((start, 0))
    } else {
        Ok((start.saturating_sub(1), length))
    }
}

/// Merge consecutive operations of the same type; discard empty operations.
fn push_op(ops: &mut Vec<PatchOperation>, op_type: PatchOpType, text: &str) {
    if text.is_empty() {
        return;
    }
    match ops.last_mut() {
        Some(last) if last.0 == op_type => last.1.push_str(text),
        _ => ops.push((op_type, text.to_string())),
    }
}

// ── Applying ──────────────────────────────────────────────────────────────

/// Reconstruct the text a hunk expects to find.
pub fn hunk_src(ops: &[PatchOperation]) -> String {
    let mut txt = String::new();
    for (op_type, str_val) in ops {
        if *op_type != PatchOpType::Ins {
            txt.push_str(str_val);
        }
    }
    txt
}

/// Reconstruct the text a hunk leaves behind.
pub fn hunk_dst(ops: &[PatchOperation]) -> String {
    let mut txt = String::new();
    for (op_type, str_val) in ops {
        if *op_type != PatchOpType::Del {
            txt.push_str(str_val);
        }
    }
    txt
}

/// Apply hunks to `text`.
///
/// Each hunk is applied where it expects to be, shifted by how far earlier
/// hunks drifted. If the expected text is not there, the hunk source must
/// occur exactly once elsewhere; an ambiguous or missing source is a
/// [`PatchError::TextMismatch`]. No fuzzy matching is attempted.
pub fn apply_patch(text: &str, hunks: &[Hunk]) -> Result<String, PatchError> {
    let mut chars: Vec<char> = text.chars().collect();
    let mut drift: isize = 0;

    for hunk in hunks {
        let src: Vec<char> = hunk_src(&hunk.ops).chars().collect();
        let dst: Vec<char> = hunk_dst(&hunk.ops).chars().collect();
        if utf16_len(&src) != hunk.length1 || utf16_len(&dst) != hunk.length2 {
            return Err(PatchError::InvalidHunk(format!(
                "lengths do not match header -{} +{}",
                hunk.length1, hunk.length2
            )));
        }

        let expected = (hunk.start2 as isize + drift).max(0) as usize;
        let at = match char_index(&chars, expected) {
            Some(at) if matches_at(&chars, &src, at) => at,
            _ => find_unique(&chars, &src)?,
        };

        let found = utf16_len(&chars[..at]);
        chars.splice(at..at + src.len(), dst);
        drift = found as isize - hunk.start2 as isize;
    }
    Ok(chars.into_iter().collect())
}

fn matches_at(chars: &[char], src: &[char], at: usize) -> bool {
    at + src.len() <= chars.len() && chars[at..at + src.len()] == *src
}

/// The only position of `src` in `chars`.
fn find_unique(chars: &[char], src: &[char]) -> Result<usize, PatchError> {
    if src.is_empty() {
        return Err(PatchError::TextMismatch);
    }
    let mut hits = chars
        .windows(src.len())
        .enumerate()
        .filter(|(_, w)| *w == src)
        .map(|(i, _)| i);
    match (hits.next(), hits.next()) {
        (Some(at), None) => Ok(at),
        _ => Err(PatchError::TextMismatch),
    }
}

fn utf16_len(chars: &[char]) -> usize {
    chars.iter().map(|c| c.len_utf16()).sum()
}

/// Char index at a UTF-16 offset. `None` past the end or inside a surrogate pair.
fn char_index(chars: &[char], offset: usize) -> Option<usize> {
    let mut units = 0;
    for (i, c) in chars.iter().enumerate() {
        if units == offset {
            return Some(i);
        }
        if units > offset {
            return None;
        }
        units += c.len_utf16();
    }
    (units == offset).then_some(chars.len())
}

/// Parse and apply a patch text in one step.
pub fn apply_text_diff(text: &str, patch_text: &str) -> Result<String, PatchError> {
    apply_patch(text, &parse_patch(patch_text)?)
}
