//! Typed resource collections, each bound to one REST path prefix.

use std::fmt::Display;

use crate::api::client::ResourceClient;
use crate::api::job::Job;
use crate::config::JobSchema;
use crate::error::Result;
use crate::record::Record;

pub const USERS_ENDPOINT: &str = "/users/";
pub const PHENOTYPES_ENDPOINT: &str = "/phenotypes/";
pub const CONCEPTS_ENDPOINT: &str = "/concepts/";
pub const JOBS_ENDPOINT: &str = "/jobs/";

/// User accounts.
#[derive(Debug, Clone)]
pub struct Users {
    client: ResourceClient,
}

impl Users {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: impl Display) -> Result<Record> {
        self.client.get(id).await
    }

    pub async fn all(&self) -> Result<Record> {
        self.client.all().await
    }

    /// The account the session is logged in as.
    pub async fn me(&self) -> Result<Record> {
        self.client.get("me").await
    }
}

/// Phenotype definitions.
#[derive(Debug, Clone)]
pub struct Phenotypes {
    client: ResourceClient,
}

impl Phenotypes {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: impl Display) -> Result<Record> {
        self.client.get(id).await
    }

    pub async fn all(&self) -> Result<Record> {
        self.client.all().await
    }
}

/// System concepts, addressed by key rather than numeric id.
#[derive(Debug, Clone)]
pub struct Concepts {
    client: ResourceClient,
}

impl Concepts {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Fetch one concept. The key is sent as a single encoded path segment.
    pub async fn get(&self, key: &str, summarize: bool) -> Result<Record> {
        let mut url = self.client.item_url(key)?;
        url.query_pairs_mut()
            .append_pair("summarize", if summarize { "true" } else { "false" });
        self.client.fetch(url).await
    }

    pub async fn all(&self) -> Result<Record> {
        self.client.all().await
    }
}

/// Job submissions and status.
#[derive(Debug, Clone)]
pub struct Jobs {
    client: ResourceClient,
    schema: JobSchema,
}

impl Jobs {
    pub fn new(client: ResourceClient, schema: JobSchema) -> Self {
        Self { client, schema }
    }

    pub fn schema(&self) -> JobSchema {
        self.schema
    }

    pub async fn get(&self, id: impl Display) -> Result<Record> {
        self.client.get(id).await
    }

    pub async fn all(&self) -> Result<Record> {
        self.client.all().await
    }

    /// Submit `job` and return the id the server assigned.
    pub async fn submit(&self, job: &Job) -> Result<u64> {
        self.client.submit(&job.to_record(self.schema)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::ScriptedTransport;
    use crate::transport::{HttpResponse, RequestBody};
    use reqwest::header::LOCATION;
    use std::sync::Arc;

    const API: &str = "https://api.example/eureka-webapp";

    fn echo() -> Arc<ScriptedTransport> {
        ScriptedTransport::new(|_| Ok(HttpResponse::new(200, "{}")))
    }

    #[tokio::test]
    async fn test_users_me() {
        let transport = echo();
        let users = Users::new(ResourceClient::new(transport.clone(), API, USERS_ENDPOINT));
        users.me().await.unwrap();
        users.get(3).await.unwrap();
        assert_eq!(
            transport.calls(),
            vec![
                "GET https://api.example/eureka-webapp/proxy-resource/users/me",
                "GET https://api.example/eureka-webapp/proxy-resource/users/3",
            ]
        );
    }

    #[tokio::test]
    async fn test_concepts_summarize_flag() {
        let transport = echo();
        let concepts = Concepts::new(ResourceClient::new(transport.clone(), API, CONCEPTS_ENDPOINT));
        concepts.get("ICD9:250", true).await.unwrap();
        concepts.get("ICD9:250", false).await.unwrap();
        assert_eq!(
            transport.calls(),
            vec![
                "GET https://api.example/eureka-webapp/proxy-resource/concepts/ICD9:250?summarize=true",
                "GET https://api.example/eureka-webapp/proxy-resource/concepts/ICD9:250?summarize=false",
            ]
        );
    }

    #[tokio::test]
    async fn test_concept_keys_stay_one_segment() {
        let transport = echo();
        let concepts = Concepts::new(ResourceClient::new(transport.clone(), API, CONCEPTS_ENDPOINT));
        concepts.get("a#b", true).await.unwrap();
        concepts.get(r"\\ACT\Dx", true).await.unwrap();
        concepts.get("x/y", false).await.unwrap();
        assert_eq!(
            transport.calls(),
            vec![
                "GET https://api.example/eureka-webapp/proxy-resource/concepts/a%23b?summarize=true",
                "GET https://api.example/eureka-webapp/proxy-resource/concepts/%5C%5CACT%5CDx?summarize=true",
                "GET https://api.example/eureka-webapp/proxy-resource/concepts/x%2Fy?summarize=false",
            ]
        );
    }

    #[tokio::test]
    async fn test_phenotypes_all() {
        let transport = ScriptedTransport::new(|_| {
            Ok(HttpResponse::new(200, r#"[{"key": "USER:a"}, {"key": "USER:b"}]"#))
        });
        let phenotypes =
            Phenotypes::new(ResourceClient::new(transport.clone(), API, PHENOTYPES_ENDPOINT));
        let all = phenotypes.all().await.unwrap();
        assert_eq!(all.as_list().unwrap().len(), 2);
        assert_eq!(all.path("1.key").unwrap().as_str().unwrap(), "USER:b");
    }

    #[tokio::test]
    async fn test_jobs_submit_uses_schema() {
        let transport = ScriptedTransport::new(|_| {
            Ok(HttpResponse::new(201, "").with_header(LOCATION, &format!("{}/jobs/42", API)))
        });
        let jobs = Jobs::new(
            ResourceClient::new(transport.clone(), API, JOBS_ENDPOINT),
            JobSchema::UpdateData,
        );

        let id = jobs.submit(&Job::new()).await.unwrap();
        assert_eq!(id, 42);

        let sent = transport.sent();
        assert_eq!(
            sent[0].url,
            "https://api.example/eureka-webapp/proxy-resource/jobs/"
        );
        let body = match &sent[0].body {
            RequestBody::Json(json) => Record::parse(json).unwrap(),
            other => panic!("unexpected body: {:?}", other),
        };
        assert!(!body.get("updateData").unwrap().as_bool().unwrap());
        assert!(body.field("jobMode").is_none());
        assert_eq!(body.get("earliestDateSide").unwrap().as_str().unwrap(), "START");
    }
}
