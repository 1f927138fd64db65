use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One directional clash between two tenders sharing a locality. A clash
/// between A and B is recorded twice, once per subject, since the priority
/// direction differs. Field names are the external wire contract.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClashRecord {
    pub tender_id: String,
    pub clashing_tender_id: String,
    pub area_name: String,
    pub local_area_name: String,
    pub overlap_days: i64,
    pub priority_issue: bool,
    pub department: String,
    pub clashing_department: String,
    pub tender_start_date: String,
    pub tender_end_date: String,
    pub clashing_tender_start_date: String,
    pub clashing_tender_end_date: String,
}

/// Clash records partitioned by `local_area_name`, in first-encounter order.
/// Serializes as a JSON object whose keys keep that order, so a fixed input
/// always produces byte-identical output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalityGroups {
    entries: Vec<(String, Vec<ClashRecord>)>,
}

impl LocalityGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to its locality's group, creating the group at the
    /// end of the key order on first sight.
    pub fn push(&mut self, record: ClashRecord) {
        match self
            .entries
            .iter()
            .position(|(local_area, _)| *local_area == record.local_area_name)
        {
            Some(position) => self.entries[position].1.push(record),
            None => {
                let local_area = record.local_area_name.clone();
                self.entries.push((local_area, vec![record]));
            }
        }
    }

    pub fn get(&self, local_area: &str) -> Option<&[ClashRecord]> {
        self.entries
            .iter()
            .find(|(key, _)| key == local_area)
            .map(|(_, group)| group.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ClashRecord])> {
        self.entries
            .iter()
            .map(|(key, group)| (key.as_str(), group.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.entries.iter().map(|(_, group)| group.len()).sum()
    }
}

impl Serialize for LocalityGroups {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (local_area, group) in &self.entries {
            map.serialize_entry(local_area, group)?;
        }
        map.end()
    }
}

/// The result of one clash check: every detected clash grouped by locality,
/// plus the rework suggestions. Never partially populated; a failed check
/// surfaces as an error instead.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClashReport {
    pub clashes_by_local_area: LocalityGroups,
    pub suggestions: Vec<String>,
}
