//! Curation filter, curation score, and popularity score.
//!
//! Curation score (lower is better):
//!
//! ```text
//! score = distance - thumbnail_boost - min(extract_len, extract_char_cap) * extract_weight
//! ```
//!
//! With the default [`CurationPolicy`] a thumbnail is worth 200 m and every
//! extract character up to 1200 is worth 0.1 m, so close, illustrated,
//! well-written articles rank first.

use std::cmp::Ordering;

use crate::config::CurationPolicy;
use crate::types::Candidate;

/// Popularity credit for having a thumbnail when page views are unknown.
pub const POPULARITY_THUMBNAIL_BONUS: u64 = 200;

/// Curation score for a candidate; lower ranks first.
///
/// A candidate with no distance is scored at
/// [`CurationPolicy::missing_distance_sentinel`] so it never ranks well.
pub fn curation_score(candidate: &Candidate, policy: &CurationPolicy) -> f64 {
    let distance = candidate
        .distance_meters
        .unwrap_or(policy.missing_distance_sentinel);
    let thumbnail_boost = if candidate.has_thumbnail() {
        policy.thumbnail_boost
    } else {
        0.0
    };
    let credited_chars = candidate.extract_len().min(policy.extract_char_cap);
    let extract_boost = credited_chars as f64 * policy.extract_weight;

    distance - thumbnail_boost - extract_boost
}

/// Popularity score; higher is more popular.
///
/// Page views when known, otherwise extract length plus a thumbnail bonus.
pub fn popularity_score(candidate: &Candidate) -> u64 {
    if let Some(views) = candidate.pageviews {
        return views;
    }
    let bonus = if candidate.has_thumbnail() {
        POPULARITY_THUMBNAIL_BONUS
    } else {
        0
    };
    candidate.extract_len() as u64 + bonus
}

/// Whether a candidate is worth showing: a long enough extract and a title
/// without the excluded marker.
pub fn meets_curation_criteria(candidate: &Candidate, policy: &CurationPolicy) -> bool {
    let Some(extract) = candidate.extract.as_deref() else {
        return false;
    };
    if extract.chars().count() < policy.min_extract_chars {
        return false;
    }
    !candidate.title.contains(policy.excluded_title_marker.as_str())
}

/// Filter, sort ascending by curation score, and truncate to
/// [`CurationPolicy::max_results`].
///
/// The sort is stable, so equal scores keep their input order.
pub fn curate(candidates: Vec<Candidate>, policy: &CurationPolicy) -> Vec<Candidate> {
    let mut scored: Vec<(f64, Candidate)> = candidates
        .into_iter()
        .filter(|c| meets_curation_criteria(c, policy))
        .map(|c| (curation_score(&c, policy), c))
        .collect();

    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    scored.truncate(policy.max_results);

    scored.into_iter().map(|(_, c)| c).collect()
}

/// Sort candidates by descending popularity score.
///
/// The alternate ordering offered to callers; the default curation order is
/// produced by [`curate`].
pub fn sort_by_popularity(candidates: &mut [Candidate]) {
    candidates.sort_by_key(|c| std::cmp::Reverse(popularity_score(c)));
}
