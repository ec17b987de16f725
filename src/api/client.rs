//! Generic client for resources proxied under `{api}/proxy-resource`.

use std::fmt::Display;
use std::sync::Arc;
use url::Url;

use crate::error::{ClientError, Result};
use crate::record::Record;
use crate::transport::{trailing_segment, HttpRequest, HttpResponse, Transport};

const PROXY_PREFIX: &str = "/proxy-resource";

/// GET/POST access to one REST path prefix behind the proxy.
///
/// Cheap to clone; clones share the transport (and its session cookies).
#[derive(Clone)]
pub struct ResourceClient {
    transport: Arc<dyn Transport>,
    api_url: Arc<str>,
    rest_endpoint: Arc<str>,
}

impl ResourceClient {
    /// `rest_endpoint` is the path prefix including slashes, e.g. `/jobs/`.
    pub fn new(transport: Arc<dyn Transport>, api_url: &str, rest_endpoint: &str) -> Self {
        Self {
            transport,
            api_url: Arc::from(api_url.trim_end_matches('/')),
            rest_endpoint: Arc::from(rest_endpoint),
        }
    }

    pub fn rest_endpoint(&self) -> &str {
        &self.rest_endpoint
    }

    /// URL of the collection itself, `{api}/proxy-resource{endpoint}`.
    pub fn collection_url(&self) -> Result<Url> {
        let raw = format!("{}{}{}", self.api_url, PROXY_PREFIX, self.rest_endpoint);
        Url::parse(&raw).map_err(|e| ClientError::Transport {
            url: raw.clone(),
            reason: format!("invalid API URL: {}", e),
        })
    }

    /// URL of one member. `segment` is percent-encoded as a single path
    /// segment, so `/`, `\`, `?` and `#` stay part of the key.
    pub fn item_url(&self, segment: &str) -> Result<Url> {
        let mut url = self.collection_url()?;
        let raw = url.to_string();
        url.path_segments_mut()
            .map_err(|_| ClientError::Transport {
                url: raw,
                reason: "API URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Fetch one resource by id.
    pub async fn get(&self, id: impl Display) -> Result<Record> {
        self.fetch(self.item_url(&id.to_string())?).await
    }

    /// Fetch the whole collection.
    pub async fn all(&self) -> Result<Record> {
        self.fetch(self.collection_url()?).await
    }

    /// GET `url` and decode the JSON body.
    pub async fn fetch(&self, url: Url) -> Result<Record> {
        let response = self.transport.send(HttpRequest::get(url.as_str())).await?;
        let response = check_status(response)?;

        tracing::debug!(url = %url, bytes = response.body.len(), "Fetched resource");
        Ok(Record::parse(&response.body)?)
    }

    /// POST `record` as JSON and return the id of the created resource.
    pub async fn submit(&self, record: &Record) -> Result<u64> {
        let url = self.collection_url()?;
        let response = self
            .transport
            .send(HttpRequest::post_json(url.as_str(), record.to_json()))
            .await?;
        let response = check_status(response)?;

        let location = response.location().ok_or_else(|| {
            ClientError::Protocol(format!("POST {} succeeded without a Location header", url))
        })?;
        let id = parse_location_id(location)?;

        tracing::info!(endpoint = %self.rest_endpoint, id, "Resource created");
        Ok(id)
    }
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("api_url", &self.api_url)
            .field("rest_endpoint", &self.rest_endpoint)
            .finish()
    }
}

fn check_status(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Api {
            status: response.status,
            body: response.body,
        })
    }
}

/// Numeric id at the end of a `Location` header value.
pub fn parse_location_id(location: &str) -> Result<u64> {
    let segment = trailing_segment(location);
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientError::Protocol(format!(
            "Location '{}' does not end in a numeric id",
            location
        )));
    }
    segment.parse().map_err(|_| {
        ClientError::Protocol(format!("id in Location '{}' is out of range", location))
    })
}
