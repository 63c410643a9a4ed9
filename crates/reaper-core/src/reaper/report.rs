use crate::policy::GroupReport;

/// How one group was handled in a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    /// Exempt; instances were not listed.
    Exempt { group: String },
    /// Instance listing failed; skipped until the next cycle.
    ListFailed { group: String, reason: String },
    /// Instances were evaluated.
    Processed(GroupReport),
}

impl GroupOutcome {
    pub fn group(&self) -> &str {
        match self {
            GroupOutcome::Exempt { group } | GroupOutcome::ListFailed { group, .. } => group,
            GroupOutcome::Processed(r) => &r.group,
        }
    }

    pub fn report(&self) -> Option<&GroupReport> {
        match self {
            GroupOutcome::Processed(r) => Some(r),
            _ => None,
        }
    }
}

/// Per-group outcomes of one cycle, in group listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub groups: Vec<GroupOutcome>,
}

impl CycleReport {
    /// Outcome for a group by name.
    pub fn group(&self, name: &str) -> Option<&GroupOutcome> {
        self.groups.iter().find(|o| o.group() == name)
    }

    /// Successful terminations across all groups.
    pub fn terminated(&self) -> u32 {
        self.groups
            .iter()
            .filter_map(GroupOutcome::report)
            .map(|r| r.terminated)
            .sum()
    }

    /// Failed terminations across all groups.
    pub fn failed(&self) -> u32 {
        self.groups
            .iter()
            .filter_map(GroupOutcome::report)
            .map(|r| r.failed)
            .sum()
    }
}
