use crate::dataset::CompanyRecord;
use std::collections::HashSet;

/// Companies whose name contains `query` (ignoring case), minus those already guessed.
///
/// Results keep dataset order. A blank query matches nothing; otherwise the query
/// is matched as typed, spaces included.
pub fn filter_candidates<'a>(
    query: &str,
    dataset: &'a [CompanyRecord],
    already_guessed: &HashSet<&str>,
) -> Vec<&'a CompanyRecord> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let query = query.to_lowercase();
    dataset
        .iter()
        .filter(|company| company.name.to_lowercase().contains(&query))
        .filter(|company| !already_guessed.contains(company.name.as_str()))
        .collect()
}

/// The candidate a submit should pick: an exact name match if typed in full, else the first one.
pub fn best_candidate<'a>(query: &str, candidates: &[&'a CompanyRecord]) -> Option<&'a CompanyRecord> {
    let query = query.trim();
    candidates
        .iter()
        .find(|company| company.name.eq_ignore_ascii_case(query))
        .or_else(|| candidates.first())
        .copied()
}
