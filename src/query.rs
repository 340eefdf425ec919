//! Pure primitives of the job query engine: membership merging, filtering,
//! the documented id total order, pagination slicing and page hydration.
//! Everything store-facing lives in `explorer_internal`.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Local, TimeZone};

use crate::job::{Job, JobState};

/// Maximum characters of payload shown in a listing row.
pub(crate) const PREVIEW_MAX_CHARS: usize = 140;

/// Fallback shown when a job hash carries no timestamp.
const TIMESTAMP_PLACEHOLDER: &str = "-";

/// Merged membership view: job id to the set of state collections it was
/// found in. `BTreeMap` keeps the pre-sort id order deterministic.
pub(crate) type Membership = BTreeMap<String, BTreeSet<JobState>>;

/// Folds one state collection's raw id read into the merged view.
pub(crate) fn merge_state_ids(membership: &mut Membership, state: JobState, ids: &[String]) {
    for id in ids {
        membership.entry(id.clone()).or_default().insert(state);
    }
}

/// Ids surviving the status filter, in merged-view order. An empty filter
/// keeps the whole universe.
pub(crate) fn filter_by_status(membership: &Membership, status: Option<JobState>) -> Vec<String> {
    membership
        .iter()
        .filter(|(_, states)| status.is_none_or(|wanted| states.contains(&wanted)))
        .map(|(id, _)| id.clone())
        .collect()
}

/// Case-insensitive substring match against the id and the raw payload.
/// `needle` must already be lowercased; a job with no `data` field never
/// matches on data but may still match on id.
pub(crate) fn matches_search(id: &str, data: Option<&str>, needle: &str) -> bool {
    if id.to_lowercase().contains(needle) {
        return true;
    }
    data.is_some_and(|data| data.to_lowercase().contains(needle))
}

/// Total order over job ids: all-digit ids compare numerically among
/// themselves and sort before non-numeric ids, which compare
/// lexicographically. Numerically equal digit ids (leading zeros) tie-break
/// lexicographically so the order stays total.
pub(crate) fn cmp_job_ids(a: &str, b: &str) -> Ordering {
    let a_digits = !a.is_empty() && a.bytes().all(|b| b.is_ascii_digit());
    let b_digits = !b.is_empty() && b.bytes().all(|b| b.is_ascii_digit());
    match (a_digits, b_digits) {
        (true, true) => cmp_digit_strings(a, b).then_with(|| a.cmp(b)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

/// Numeric comparison of arbitrary-length digit strings without parsing:
/// strip leading zeros, then longer means larger, then byte order decides.
fn cmp_digit_strings(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Timestamp sort key: epoch milliseconds, with malformed or absent values
/// pinned to 0.
pub(crate) fn timestamp_sort_key(raw: Option<&str>) -> i64 {
    raw.and_then(|raw| raw.parse::<i64>().ok()).unwrap_or(0)
}

/// 1-based page slice; pages past the end yield an empty slice, not an
/// error.
pub(crate) fn page_slice(ids: &[String], page: usize, page_size: usize) -> &[String] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= ids.len() {
        return &[];
    }
    let end = (start + page_size).min(ids.len());
    &ids[start..end]
}

/// Renders the merged membership set as the job's state label: sorted
/// alphabetically, comma-joined, no spaces.
pub(crate) fn state_label(states: &BTreeSet<JobState>) -> String {
    let mut names: Vec<&str> = states.iter().map(JobState::as_str).collect();
    names.sort_unstable();
    names.join(",")
}

/// Human-readable local date-time for an epoch-millisecond string. Falls
/// back to the raw stored string when it does not parse, and to `-` when
/// the field is absent or empty.
pub(crate) fn format_timestamp(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return TIMESTAMP_PLACEHOLDER.to_string(),
    };
    match raw
        .parse::<i64>()
        .ok()
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
    {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => raw.to_string(),
    }
}

/// Compact payload preview: re-serialized JSON when the payload parses,
/// raw text otherwise, truncated to `PREVIEW_MAX_CHARS` characters.
pub(crate) fn data_preview(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(parsed) => {
            let compact = serde_json::to_string(&parsed).unwrap_or_else(|_| raw.to_string());
            truncate_chars(&compact, PREVIEW_MAX_CHARS)
        }
        Err(_) => truncate_chars(raw, PREVIEW_MAX_CHARS),
    }
}

/// Pretty-printed payload for the detail view; unparseable payloads pass
/// through unchanged.
pub(crate) fn pretty_data(raw: &str) -> String {
    if raw.is_empty() {
        return raw.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(parsed) => serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

/// Character-boundary-safe truncation.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Builds one listing row from a page id, its hash record and its merged
/// membership set.
pub(crate) fn hydrate_job(
    id: &str,
    record: &HashMap<String, String>,
    states: Option<&BTreeSet<JobState>>,
) -> Job {
    Job {
        id: id.to_string(),
        name: record.get("name").cloned().unwrap_or_default(),
        state: states.map(state_label).unwrap_or_default(),
        data_preview: data_preview(record.get("data").map_or("", String::as_str)),
        timestamp: format_timestamp(record.get("timestamp").map(String::as_str)),
    }
}
