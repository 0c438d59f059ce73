//! Identity-keyed merge of source results.
//!
//! Batches are merged in the order given and the first record seen for an
//! id wins. Passing the authoritative geo search batch first therefore makes
//! its located records beat identity-only duplicates from later sources.

use std::collections::HashSet;

use crate::types::Candidate;

/// Merge candidate batches by `id`, keeping the first record for each id.
///
/// Output keeps first-seen order: all surviving records of the first batch,
/// then new ids from the second, and so on.
pub fn merge_by_id<I>(batches: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = Vec<Candidate>>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<Candidate> = Vec::new();

    for batch in batches {
        for candidate in batch {
            if seen.insert(candidate.id.clone()) {
                merged.push(candidate);
            }
        }
    }

    merged
}
