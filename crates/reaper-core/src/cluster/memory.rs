//! In-process cluster backed by a scripted snapshot.
//!
//! Records every call so tests can assert what the reaper asked for, and lets callers inject
//! failures per group or per instance. Successful terminations remove the instance, so the next
//! cycle no longer sees it.
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use reaper_model::{Group, Instance};

use super::{Cluster, ClusterError};

#[derive(Default)]
struct MemoryState {
    groups: Vec<Group>,
    instances: BTreeMap<String, Vec<Instance>>,

    fail_list_groups: bool,
    fail_list_instances: BTreeSet<String>,
    fail_terminate: BTreeSet<(String, String)>,

    listed: Vec<String>,
    attempts: Vec<(String, String)>,
    terminated: Vec<(String, String)>,
}

#[derive(Default)]
pub struct MemoryCluster {
    state: Mutex<MemoryState>,
}

impl MemoryCluster {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a group with its instances, in listing order.
    pub fn insert_group(&self, group: Group, instances: Vec<Instance>) {
        let mut st = self.state();
        st.instances.insert(group.name().to_string(), instances);
        st.groups.push(group);
    }

    pub fn fail_list_groups(&self, fail: bool) {
        self.state().fail_list_groups = fail;
    }

    pub fn fail_list_instances(&self, group: &str) {
        self.state().fail_list_instances.insert(group.to_string());
    }

    pub fn fail_terminate(&self, group: &str, instance: &str) {
        self.state()
            .fail_terminate
            .insert((group.to_string(), instance.to_string()));
    }

    /// Groups whose instances were listed, in call order.
    pub fn listed(&self) -> Vec<String> {
        self.state().listed.clone()
    }

    /// Every termination attempt, successful or not, in call order.
    pub fn attempts(&self) -> Vec<(String, String)> {
        self.state().attempts.clone()
    }

    /// Successful terminations, in call order.
    pub fn terminated(&self) -> Vec<(String, String)> {
        self.state().terminated.clone()
    }

    /// Names of the instances currently present in a group.
    pub fn instance_names(&self, group: &str) -> Vec<String> {
        self.state()
            .instances
            .get(group)
            .map(|v| v.iter().map(|i| i.name().to_string()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Cluster for MemoryCluster {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list_groups(&self) -> Result<Vec<Group>, ClusterError> {
        let st = self.state();
        if st.fail_list_groups {
            return Err(ClusterError::Unavailable("group listing disabled".into()));
        }
        Ok(st.groups.clone())
    }

    async fn list_instances(&self, group: &str) -> Result<Vec<Instance>, ClusterError> {
        let mut st = self.state();
        st.listed.push(group.to_string());
        if st.fail_list_instances.contains(group) {
            return Err(ClusterError::Unavailable(format!(
                "instance listing disabled for {group}"
            )));
        }
        Ok(st.instances.get(group).cloned().unwrap_or_default())
    }

    async fn terminate(&self, group: &str, instance: &str) -> Result<(), ClusterError> {
        let mut st = self.state();
        let key = (group.to_string(), instance.to_string());
        st.attempts.push(key.clone());
        if st.fail_terminate.contains(&key) {
            return Err(ClusterError::Api {
                status: 500,
                message: format!("refusing to terminate {group}/{instance}"),
            });
        }

        let Some(list) = st.instances.get_mut(group) else {
            return Err(ClusterError::NotFound(format!("group {group}")));
        };
        let before = list.len();
        list.retain(|i| i.name() != instance);
        if list.len() == before {
            return Err(ClusterError::NotFound(format!("{group}/{instance}")));
        }
        st.terminated.push(key);
        Ok(())
    }
}
