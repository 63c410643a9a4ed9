//! Kubernetes implementation of [`reaper_core::Cluster`].
//!
//! Namespaces are groups and pods are instances. Talks to the API server over plain REST:
//!
//! | port operation   | request                                        |
//! |------------------|------------------------------------------------|
//! | `list_groups`    | `GET /api/v1/namespaces`                       |
//! | `list_instances` | `GET /api/v1/namespaces/{ns}/pods`             |
//! | `terminate`      | `DELETE /api/v1/namespaces/{ns}/pods/{name}`   |
mod client;
mod config;
mod error;
mod wire;

pub use client::KubeCluster;
pub use config::{DEFAULT_TIMEOUT, KubeConfig, SERVICE_ACCOUNT_DIR};
pub use error::KubeError;
