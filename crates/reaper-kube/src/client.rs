use async_trait::async_trait;
use reaper_core::{Cluster, ClusterError};
use reaper_model::{Group, Instance};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{
    config::KubeConfig,
    error::KubeError,
    wire::{List, Namespace, Pod, Status},
};

/// [`Cluster`] backed by the Kubernetes REST API.
#[derive(Clone)]
pub struct KubeCluster {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl KubeCluster {
    pub fn new(config: KubeConfig) -> Result<Self, KubeError> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if let Some(pem) = &config.ca_pem {
            builder = builder.add_root_certificate(reqwest::Certificate::from_pem(pem)?);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url,
            token: config.token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, KubeError> {
        let resp = check(self.request(Method::GET, path).send().await?).await?;
        let list: List<T> = resp
            .json()
            .await
            .map_err(|e| KubeError::Decode(e.to_string()))?;
        Ok(list.items)
    }

    pub async fn namespaces(&self) -> Result<Vec<Group>, KubeError> {
        let items: Vec<Namespace> = self.get_list("/api/v1/namespaces").await?;
        Ok(items.into_iter().map(Group::from).collect())
    }

    pub async fn pods(&self, namespace: &str) -> Result<Vec<Instance>, KubeError> {
        let items: Vec<Pod> = self
            .get_list(&format!("/api/v1/namespaces/{}/pods", segment(namespace)))
            .await?;
        Ok(items.into_iter().map(Instance::from).collect())
    }

    pub async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), KubeError> {
        let path = format!(
            "/api/v1/namespaces/{}/pods/{}",
            segment(namespace),
            segment(name)
        );
        check(self.request(Method::DELETE, &path).send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl Cluster for KubeCluster {
    fn name(&self) -> &'static str {
        "kubernetes"
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_groups(&self) -> Result<Vec<Group>, ClusterError> {
        let groups = self.namespaces().await?;
        debug!(count = groups.len(), "namespaces listed");
        Ok(groups)
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_instances(&self, group: &str) -> Result<Vec<Instance>, ClusterError> {
        let pods = self.pods(group).await?;
        debug!(count = pods.len(), "pods listed");
        Ok(pods)
    }

    #[instrument(level = "debug", skip(self))]
    async fn terminate(&self, group: &str, instance: &str) -> Result<(), ClusterError> {
        Ok(self.delete_pod(group, instance).await?)
    }
}

/// Turn a non-success response into [`KubeError::Status`], preferring the API's own message.
async fn check(resp: Response) -> Result<Response, KubeError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<Status>(&body) {
        Ok(s) if !s.message.is_empty() => s.message,
        _ if body.is_empty() => status.canonical_reason().unwrap_or("unknown").to_string(),
        _ => body,
    };
    Err(KubeError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Object names are DNS labels; anything else is rejected by the API server, but keep the path
/// well formed regardless.
fn segment(name: &str) -> String {
    name.bytes()
        .map(|b| match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use reaper_model::{InstancePhase, LABEL_IGNORE_LIFETIME};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn cluster(server: &MockServer) -> KubeCluster {
        KubeCluster::new(KubeConfig::from_url(server.uri()).with_token("t0k3n")).unwrap()
    }

    #[tokio::test]
    async fn lists_namespaces_with_labels() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/namespaces"))
            .and(header("Authorization", "Bearer t0k3n"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "NamespaceList",
                "items": [
                    {"metadata": {"name": "kube-system", "labels": {LABEL_IGNORE_LIFETIME: "true"}}},
                    {"metadata": {"name": "team-a"}}
                ]
            })))
            .mount(&server)
            .await;

        let groups = cluster(&server).list_groups().await.unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name(), "kube-system");
        assert_eq!(groups[0].meta.labels.get(LABEL_IGNORE_LIFETIME), Some("true"));
        assert_eq!(groups[1].name(), "team-a");
    }

    #[tokio::test]
    async fn lists_pods_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/namespaces/team-a/pods"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "PodList",
                "items": [
                    {"metadata": {"name": "b"}, "status": {"phase": "Running", "startTime": "2024-05-01T10:00:00Z"}},
                    {"metadata": {"name": "a"}, "status": {"phase": "Pending"}}
                ]
            })))
            .mount(&server)
            .await;

        let pods = cluster(&server).list_instances("team-a").await.unwrap();

        assert_eq!(pods.iter().map(Instance::name).collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(pods[0].phase, InstancePhase::Running);
        assert!(pods[0].start_time.is_some());
        assert_eq!(pods[1].phase, InstancePhase::Pending);
    }

    #[tokio::test]
    async fn deletes_pod() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/namespaces/team-a/pods/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "Pod"})))
            .expect(1)
            .mount(&server)
            .await;

        cluster(&server).terminate("team-a", "job-1").await.unwrap();
    }

    #[tokio::test]
    async fn missing_pod_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/namespaces/team-a/pods/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "kind": "Status",
                "status": "Failure",
                "message": "pods \"gone\" not found",
                "reason": "NotFound",
                "code": 404
            })))
            .mount(&server)
            .await;

        let err = cluster(&server).terminate("team-a", "gone").await.unwrap_err();
        assert_eq!(err, ClusterError::NotFound("pods \"gone\" not found".into()));
    }

    #[tokio::test]
    async fn forbidden_listing_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/namespaces/locked/pods"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = cluster(&server).list_instances("locked").await.unwrap_err();
        assert_eq!(
            err,
            ClusterError::Api {
                status: 403,
                message: "forbidden".into()
            }
        );
    }

    #[tokio::test]
    async fn garbage_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/namespaces"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = cluster(&server).list_groups().await.unwrap_err();
        assert!(matches!(err, ClusterError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();

        let cluster = KubeCluster::new(KubeConfig::from_url(format!("http://{addr}"))).unwrap();
        let err = cluster.list_groups().await.unwrap_err();
        assert!(matches!(err, ClusterError::Unavailable(_)));
    }

    #[test]
    fn path_segments_are_escaped() {
        assert_eq!(segment("job-1.a_b"), "job-1.a_b");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
