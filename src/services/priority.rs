use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{AppError, AppResult};

/// The closed department set, highest priority first. Rank is the position
/// in this list; a lower rank wins a clash.
const DEPARTMENT_PRIORITY_ORDER: &[&str] = &[
    "Department of Water Pipeline",
    "Department of Roadways",
    "Department of Street Lighting",
];

/// Process-wide department ranking. Built once, read-only afterwards, shared
/// by every request without locking.
pub static DEPARTMENT_PRIORITIES: Lazy<PriorityTable> =
    Lazy::new(|| PriorityTable::from_ordered(DEPARTMENT_PRIORITY_ORDER));

#[derive(Debug, Clone)]
pub struct PriorityTable {
    ranks: HashMap<String, usize>,
}

impl PriorityTable {
    pub fn from_ordered(departments: &[&str]) -> Self {
        let ranks = departments
            .iter()
            .enumerate()
            .map(|(rank, name)| (name.to_string(), rank))
            .collect();
        Self { ranks }
    }

    /// Rank of a department, lower = higher priority. An unrecognized name
    /// is a data-integrity error, never silently ranked.
    pub fn rank(&self, department: &str) -> AppResult<usize> {
        self.ranks
            .get(department)
            .copied()
            .ok_or_else(|| AppError::unknown_department(department))
    }

    /// True iff the subject department is strictly lower priority than the
    /// department it clashes with, i.e. the subject should yield.
    pub fn is_priority_issue(
        &self,
        department: &str,
        clashing_department: &str,
    ) -> AppResult<bool> {
        Ok(self.rank(department)? > self.rank(clashing_department)?)
    }
}

pub fn rank(department: &str) -> AppResult<usize> {
    DEPARTMENT_PRIORITIES.rank(department)
}

pub fn is_priority_issue(department: &str, clashing_department: &str) -> AppResult<bool> {
    DEPARTMENT_PRIORITIES.is_priority_issue(department, clashing_department)
}
