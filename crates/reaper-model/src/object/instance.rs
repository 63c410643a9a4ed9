use std::{fmt, str::FromStr};

use time::OffsetDateTime;

use crate::{
    ObjectMeta,
    error::{ModelError, ModelResult},
};

/// Lifecycle phase reported for an instance.
///
/// Only [`InstancePhase::Running`] instances have an age the reaper can judge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InstancePhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    #[default]
    Unknown,
}

impl FromStr for InstancePhase {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(InstancePhase::Pending),
            "running" => Ok(InstancePhase::Running),
            "succeeded" => Ok(InstancePhase::Succeeded),
            "failed" => Ok(InstancePhase::Failed),
            "unknown" => Ok(InstancePhase::Unknown),
            _ => Err(ModelError::UnknownPhase(s.to_string())),
        }
    }
}

impl fmt::Display for InstancePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InstancePhase::Pending => "Pending",
            InstancePhase::Running => "Running",
            InstancePhase::Succeeded => "Succeeded",
            InstancePhase::Failed => "Failed",
            InstancePhase::Unknown => "Unknown",
        })
    }
}

/// A unit of work running inside a group.
///
/// `start_time` is expected only while running; a running instance without it is treated as not running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instance {
    pub meta: ObjectMeta,
    pub phase: InstancePhase,
    pub start_time: Option<OffsetDateTime>,
}

impl Instance {
    /// Create an instance in the given phase with no start time.
    pub fn new(name: impl Into<String>, phase: InstancePhase) -> Self {
        Self {
            meta: ObjectMeta::named(name),
            phase,
            start_time: None,
        }
    }

    /// Create a running instance started at `started`.
    pub fn running(name: impl Into<String>, started: OffsetDateTime) -> Self {
        Self {
            meta: ObjectMeta::named(name),
            phase: InstancePhase::Running,
            start_time: Some(started),
        }
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Start time of a running instance.
    ///
    /// Returns `None` when the instance is not running or the start time is missing.
    pub fn running_since(&self) -> Option<OffsetDateTime> {
        match self.phase {
            InstancePhase::Running => self.start_time,
            _ => None,
        }
    }

    /// Builder-style helper adding a label.
    pub fn with_label(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
        self.meta.labels.insert(key, val);
        self
    }

    /// Builder-style helper adding an annotation.
    pub fn with_annotation(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
        self.meta.annotations.insert(key, val);
        self
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn phase_parses_kubernetes_spelling() {
        assert_eq!("Running".parse::<InstancePhase>().unwrap(), InstancePhase::Running);
        assert_eq!("succeeded".parse::<InstancePhase>().unwrap(), InstancePhase::Succeeded);
        assert!("Terminating".parse::<InstancePhase>().is_err());
    }

    #[test]
    fn phase_display_roundtrips() {
        for phase in [
            InstancePhase::Pending,
            InstancePhase::Running,
            InstancePhase::Succeeded,
            InstancePhase::Failed,
            InstancePhase::Unknown,
        ] {
            assert_eq!(phase.to_string().parse::<InstancePhase>().unwrap(), phase);
        }
    }

    #[test]
    fn running_since_requires_running_phase() {
        let started = datetime!(2024-05-01 10:00 UTC);

        let running = Instance::running("job-1", started);
        assert_eq!(running.running_since(), Some(started));

        let mut finished = running.clone();
        finished.phase = InstancePhase::Succeeded;
        assert_eq!(finished.running_since(), None);
    }

    #[test]
    fn running_without_start_time_has_no_age() {
        let inst = Instance::new("job-2", InstancePhase::Running);
        assert_eq!(inst.running_since(), None);
    }
}
