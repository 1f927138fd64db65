use crate::models::clash::{ClashRecord, LocalityGroups};

/// Partitions clash records by `local_area_name`. Relative record order is
/// preserved within each group and group keys keep first-encounter order.
pub fn group_by_local_area(records: Vec<ClashRecord>) -> LocalityGroups {
    let mut groups = LocalityGroups::new();
    for record in records {
        groups.push(record);
    }
    groups
}
