//! Repository backed by a remote record service.
//!
//! The service exposes each collection as a plain record API:
//!
//! ```text
//! GET    {base}/{collection}?fields=a,b,c
//! GET    {base}/{collection}/{id}?fields=a,b,c
//! POST   {base}/{collection}
//! PATCH  {base}/{collection}/{id}
//! DELETE {base}/{collection}/{id}
//! ```
//!
//! Bodies use the snake_case wire schema; see [`crate::db::wire`]. A 404 maps to `NotFound`,
//! transport failures, timeouts and other non-success statuses map to `BackingStoreUnavailable`.
//! Nothing is retried.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::{marker::PhantomData, time::Duration};
use tracing::{debug, instrument};
use url::Url;

use crate::db::{
    errors::{Result, StoreError},
    handlers::repository::{Repository, UpdateContext},
    models::housekeeping::CompletionPolicy,
    wire::{self, WireSchema},
};
use crate::types::abbrev_id;

/// Connection settings for the remote record service
#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub base_url: Url,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    pub completion_policy: CompletionPolicy,
}

impl RemoteSettings {
    /// Default timeout for record requests
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            completion_policy: CompletionPolicy::default(),
        }
    }
}

/// A shared HTTP client for one record service; hands out per-collection repositories
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    completion_policy: CompletionPolicy,
}

impl RemoteClient {
    pub fn new(settings: RemoteSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| StoreError::Other(anyhow::anyhow!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: ensure_slash(&settings.base_url),
            api_key: settings.api_key,
            completion_policy: settings.completion_policy,
        })
    }

    pub fn repository<E: WireSchema>(&self) -> RemoteRepository<E> {
        RemoteRepository {
            remote: self.clone(),
            _entity: PhantomData,
        }
    }
}

/// Makes sure a url has a trailing slash, so that joining a collection name appends to the path
/// instead of replacing its last segment.
fn ensure_slash(url: &Url) -> Url {
    if url.path().ends_with('/') {
        url.clone()
    } else {
        let mut new_url = url.clone();
        let mut path = new_url.path().to_string();
        path.push('/');
        new_url.set_path(&path);
        new_url
    }
}

/// Repository over one collection of the remote record service
pub struct RemoteRepository<E> {
    remote: RemoteClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E: WireSchema> RemoteRepository<E> {
    fn collection_url(&self) -> Result<Url> {
        self.remote
            .base_url
            .join(E::COLLECTION)
            .map_err(|e| StoreError::Other(anyhow::anyhow!("Failed to construct {} URL: {e}", E::COLLECTION)))
    }

    fn record_url(&self, id: &str) -> Result<Url> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Other(anyhow::anyhow!("Base URL {} cannot hold a path", self.remote.base_url)))?
            .push(id);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.remote.client.request(method, url);
        match &self.remote.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    fn with_fields(request: RequestBuilder) -> RequestBuilder {
        request.query(&[("fields", E::FIELDS.join(","))])
    }

    /// Send a request and return its JSON body, classifying failures
    async fn send(&self, request: RequestBuilder, id: Option<&str>) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();
        debug!(entity = E::KIND, %status, "Record service responded");
        match status {
            s if s.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(StoreError::not_found(E::KIND, id.unwrap_or_default())),
            _ => Err(StoreError::unavailable(format!(
                "{} {} returned {status}: {}",
                E::KIND,
                E::COLLECTION,
                error_body(response).await
            ))),
        }
    }
}

async fn error_body(response: Response) -> String {
    response.text().await.unwrap_or_default().chars().take(200).collect()
}

#[async_trait::async_trait]
impl<E: WireSchema> Repository<E> for RemoteRepository<E> {
    #[instrument(skip(self), fields(entity = E::KIND), err)]
    async fn list(&self) -> Result<Vec<E>> {
        let request = Self::with_fields(self.request(Method::GET, self.collection_url()?));
        wire::decode_list(self.send(request, None).await?)
    }

    #[instrument(skip(self, id), fields(entity = E::KIND, id = %abbrev_id(id)), err)]
    async fn get_by_id(&self, id: &str) -> Result<E> {
        let request = Self::with_fields(self.request(Method::GET, self.record_url(id)?));
        wire::decode(self.send(request, Some(id)).await?)
    }

    #[instrument(skip(self, request), fields(entity = E::KIND), err)]
    async fn create(&self, request: &E::CreateRequest) -> Result<E> {
        let body = wire::to_wire(request)?;
        let request = self.request(Method::POST, self.collection_url()?).json(&body);
        wire::decode(self.send(request, None).await?)
    }

    #[instrument(skip(self, id, patch), fields(entity = E::KIND, id = %abbrev_id(id)), err)]
    async fn update(&self, id: &str, patch: &E::UpdateRequest) -> Result<E> {
        let mut patch = patch.clone();
        E::prepare_update(&mut patch, &UpdateContext::now(self.remote.completion_policy));
        let body = wire::to_wire(&patch)?;
        let request = self.request(Method::PATCH, self.record_url(id)?).json(&body);
        wire::decode(self.send(request, Some(id)).await?)
    }

    #[instrument(skip(self, id), fields(entity = E::KIND, id = %abbrev_id(id)), err)]
    async fn delete(&self, id: &str) -> Result<E> {
        let request = self.request(Method::DELETE, self.record_url(id)?);
        wire::decode(self.send(request, Some(id)).await?)
    }
}
