//! Splitting a chat message that carries several notifications
//!
//! People often paste a run of notifications into one message, sometimes
//! without line breaks between them. Each notification opens with
//! `<TOKEN> Confirmed`, which is used as the boundary between candidates.
//! Annotation lines (`c:`, `r:` ...) typed after a notification stay with it;
//! any other trailing lines (promotional footers) are dropped.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::metadata::is_metadata_line;
use crate::models::BatchCandidate;

// ASCII word and space classes, same as the parser
static BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)\b[0-9a-z_]+\s+confirmed\b").expect("valid regex"));

static LEADING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)^([0-9a-z_]+)\s+confirmed").expect("valid regex"));

/// True when the text holds more than one notification boundary
pub fn is_batch(text: &str) -> bool {
    BOUNDARY.find_iter(text).nth(1).is_some()
}

/// Split text into candidates, one per boundary, in original order
///
/// Text before the first boundary is not part of any candidate.
pub fn segment(text: &str) -> Vec<BatchCandidate> {
    let starts: Vec<usize> = BOUNDARY.find_iter(text).map(|m| m.start()).collect();
    let ends = starts.iter().skip(1).copied().chain(std::iter::once(text.len()));

    let candidates: Vec<BatchCandidate> = starts
        .iter()
        .zip(ends)
        .filter_map(|(&start, end)| split_segment(&text[start..end]))
        .collect();

    debug!(
        boundaries = starts.len(),
        candidates = candidates.len(),
        "Segmented message"
    );
    candidates
}

fn split_segment(segment: &str) -> Option<BatchCandidate> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }

    let mut lines = segment.lines();
    let message = lines.next()?.trim().to_string();
    let metadata = lines
        .map(str::trim)
        .filter(|line| !line.is_empty() && is_metadata_line(line))
        .map(String::from)
        .collect();

    Some(BatchCandidate { message, metadata })
}

/// Best-effort identifier for a notification that failed to parse
///
/// The token before "Confirmed" if the text starts that way, else the first
/// word, else `?`.
pub fn extract_transaction_id(text: &str) -> String {
    let text = text.trim();
    if let Some(caps) = LEADING_ID.captures(text) {
        return caps[1].to_string();
    }
    text.split_whitespace()
        .next()
        .unwrap_or("?")
        .to_string()
}
