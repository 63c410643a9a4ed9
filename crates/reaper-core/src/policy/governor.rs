/// Per-group termination budget state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernorState {
    /// Fewer successful terminations than the cap.
    Active,
    /// Cap reached; terminal for the rest of the group's cycle.
    Capped,
}

/// Counts successful terminations for one group in one cycle.
///
/// A fresh governor is created for every group in every cycle. Failed terminations are never
/// counted, so they do not consume budget. A cap of zero or less starts out capped.
#[derive(Debug, Clone)]
pub struct Governor {
    cap: i64,
    terminated: u32,
}

impl Governor {
    pub fn new(cap: i64) -> Self {
        Self { cap, terminated: 0 }
    }

    pub fn cap(&self) -> i64 {
        self.cap
    }

    pub fn terminated(&self) -> u32 {
        self.terminated
    }

    pub fn state(&self) -> GovernorState {
        if i64::from(self.terminated) >= self.cap {
            GovernorState::Capped
        } else {
            GovernorState::Active
        }
    }

    /// Count one successful termination.
    pub fn record_success(&mut self) {
        self.terminated = self.terminated.saturating_add(1);
    }
}

/// What happened to one group's instances during a cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupReport {
    pub group: String,
    /// Instances looked at before the group finished or was capped.
    pub evaluated: usize,
    /// Overdue instances encountered, including the one that tripped the cap.
    pub overdue: usize,
    pub terminated: u32,
    pub failed: u32,
    pub malformed: u32,
    /// The cap stopped processing of the remaining instances.
    pub skipped_due_to_cap: bool,
}

impl GroupReport {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            ..Default::default()
        }
    }
}
