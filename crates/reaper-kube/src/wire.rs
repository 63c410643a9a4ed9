//! Subset of the core/v1 JSON objects the reaper reads.
use std::collections::BTreeMap;

use reaper_model::{Group, Instance, InstancePhase, MetaMap, ObjectMeta};
use serde::Deserialize;
use time::OffsetDateTime;

/// List envelope; `items` may be absent for empty lists.
#[derive(Debug, Deserialize)]
pub(crate) struct List<T> {
    // a plain `default` would require `T: Default`
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub annotations: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Namespace {
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Pod {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub status: PodStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PodStatus {
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
}

/// `Status` object returned with API errors.
#[derive(Debug, Deserialize)]
pub(crate) struct Status {
    #[serde(default)]
    pub message: String,
}

impl From<Metadata> for ObjectMeta {
    fn from(m: Metadata) -> Self {
        ObjectMeta {
            name: m.name,
            labels: MetaMap(m.labels.unwrap_or_default()),
            annotations: MetaMap(m.annotations.unwrap_or_default()),
        }
    }
}

impl From<Namespace> for Group {
    fn from(ns: Namespace) -> Self {
        Group {
            meta: ns.metadata.into(),
        }
    }
}

impl From<Pod> for Instance {
    fn from(pod: Pod) -> Self {
        let phase = pod
            .status
            .phase
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(InstancePhase::Unknown);
        Instance {
            meta: pod.metadata.into(),
            phase,
            start_time: pod.status.start_time,
        }
    }
}
