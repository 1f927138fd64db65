use crate::error::AppResult;
use crate::models::clash::{ClashRecord, LocalityGroups};
use crate::services::priority;

/// Fixed message returned when no locality produced a rework sequence.
/// Callers never receive an empty suggestion list on a successful check.
pub const NO_CLASH_SUGGESTION: &str = "No priority clashes detected. No suggestions necessary.";

/// Builds one rework suggestion per locality that has at least one
/// priority-violating clash.
///
/// Within a locality the violating records are ordered by department rank,
/// subject first, then counterpart, so higher-priority departments surface
/// earlier in the sequence. The visitation sequence appends subject then
/// counterpart per record, skipping ids already placed.
pub fn synthesize(groups: &LocalityGroups) -> AppResult<Vec<String>> {
    let mut suggestions = Vec::new();

    for (local_area, clashes) in groups.iter() {
        let sequence = rework_sequence(clashes)?;
        if sequence.is_empty() {
            continue;
        }
        suggestions.push(format!(
            "In {local_area}, reorder work as follows: {}.",
            sequence.join(" -> ")
        ));
    }

    if suggestions.is_empty() {
        suggestions.push(NO_CLASH_SUGGESTION.to_string());
    }
    Ok(suggestions)
}

fn rework_sequence(clashes: &[ClashRecord]) -> AppResult<Vec<&str>> {
    let mut ranked: Vec<((usize, usize), &ClashRecord)> = Vec::new();
    for clash in clashes.iter().filter(|clash| clash.priority_issue) {
        let key = (
            priority::rank(&clash.department)?,
            priority::rank(&clash.clashing_department)?,
        );
        ranked.push((key, clash));
    }
    // Stable sort: ties keep detection order.
    ranked.sort_by_key(|(key, _)| *key);

    let mut sequence: Vec<&str> = Vec::new();
    for (_, clash) in &ranked {
        for id in [clash.tender_id.as_str(), clash.clashing_tender_id.as_str()] {
            if !sequence.contains(&id) {
                sequence.push(id);
            }
        }
    }
    Ok(sequence)
}
