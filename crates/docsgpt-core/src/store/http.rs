use std::time::Duration;

use async_trait::async_trait;
use docsgpt_config::NavConfig;
use docsgpt_protocol::routes::{Method, Route};
use docsgpt_protocol::{
    ConversationId, ConversationSummary, DocumentDescriptor, DocumentLocation, RenameRequest,
    Transcript,
};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::errors::StoreError;
use super::traits::{ConversationStore, DocumentStore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for a DocsGPT API host.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base: Url,
}

/// Outcome of a rename request that reached the server.
#[derive(Debug)]
enum RenameReply {
    Accepted(Option<ConversationSummary>),
    Declined,
}

impl HttpStore {
    pub fn new(host: &str) -> Result<Self, StoreError> {
        let base = Url::parse(host).map_err(|e| StoreError::InvalidHost {
            host: host.to_string(),
            message: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(StoreError::InvalidHost {
                host: host.to_string(),
                message: "URL cannot carry a path".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| StoreError::ClientInit { source })?;

        debug!(event = "core.store.http_created", host = %base);
        Ok(Self { client, base })
    }

    pub fn from_config(config: &NavConfig) -> Result<Self, StoreError> {
        Self::new(config.api.host())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL of `route`, with each segment percent-encoded.
    pub fn url_for(&self, route: &Route<'_>) -> Result<Url, StoreError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::InvalidHost {
                host: self.base.to_string(),
                message: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(route.segments());
        Ok(url)
    }

    async fn send(
        &self,
        route: Route<'_>,
        body: Option<&RenameRequest>,
    ) -> Result<Response, StoreError> {
        let path = route.path();
        let url = self.url_for(&route)?;

        let request = match route.method() {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };

        debug!(
            event = "core.store.request_started",
            method = route.method().as_str(),
            path = %path
        );

        let response = request
            .send()
            .await
            .map_err(|source| StoreError::Transport {
                path: path.clone(),
                source,
            })?;

        debug!(
            event = "core.store.request_completed",
            path = %path,
            status = response.status().as_u16()
        );
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(
        path: &str,
        response: Response,
    ) -> Result<T, StoreError> {
        let response = check_status(path, response).await?;
        let body = response.text().await.map_err(|source| StoreError::Transport {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|e| StoreError::InvalidResponse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    async fn expect_success(path: &str, response: Response) -> Result<(), StoreError> {
        check_status(path, response).await.map(|_| ())
    }
}

/// Map non-2xx responses to `NotFound` or `Status`.
async fn check_status(path: &str, response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(StoreError::NotFound {
            path: path.to_string(),
        });
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        path: path.to_string(),
        status: status.as_u16(),
        message,
    })
}

/// Interpret a 2xx rename body: a summary or `true` is acceptance,
/// `false` or `null` is a decline. An empty body counts as acceptance.
fn parse_rename_reply(path: &str, body: &str) -> Result<RenameReply, StoreError> {
    if body.trim().is_empty() {
        return Ok(RenameReply::Accepted(None));
    }
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| StoreError::InvalidResponse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
    match value {
        serde_json::Value::Null | serde_json::Value::Bool(false) => Ok(RenameReply::Declined),
        serde_json::Value::Object(_) => Ok(RenameReply::Accepted(
            serde_json::from_value(value).ok(),
        )),
        _ => Ok(RenameReply::Accepted(None)),
    }
}

#[async_trait]
impl ConversationStore for HttpStore {
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, StoreError> {
        let route = Route::ListConversations;
        let response = self.send(route, None).await?;
        Self::read_json(&route.path(), response).await
    }

    async fn get_conversation(&self, id: &ConversationId) -> Result<Transcript, StoreError> {
        let route = Route::GetConversation(id);
        let response = self.send(route, None).await?;
        Self::read_json(&route.path(), response).await
    }

    async fn rename_conversation(
        &self,
        id: &ConversationId,
        name: &str,
    ) -> Result<Option<ConversationSummary>, StoreError> {
        let route = Route::RenameConversation(id);
        let path = route.path();
        let body = RenameRequest {
            name: name.to_string(),
        };
        let response = self.send(route, Some(&body)).await?;

        let status = response.status();
        if status.is_client_error() && status != StatusCode::NOT_FOUND {
            let message = response.text().await.unwrap_or_default();
            warn!(
                event = "core.store.rename_declined",
                id = %id,
                status = status.as_u16()
            );
            return Err(StoreError::Rejected { path, message });
        }

        let response = check_status(&path, response).await?;
        let text = response.text().await.map_err(|source| StoreError::Transport {
            path: path.clone(),
            source,
        })?;

        match parse_rename_reply(&path, &text)? {
            RenameReply::Accepted(summary) => Ok(summary),
            RenameReply::Declined => {
                warn!(event = "core.store.rename_declined", id = %id, status = status.as_u16());
                Err(StoreError::Rejected {
                    path,
                    message: "server declined the new name".to_string(),
                })
            }
        }
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), StoreError> {
        let route = Route::DeleteConversation(id);
        let response = self.send(route, None).await?;
        Self::expect_success(&route.path(), response).await
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn list_documents(&self) -> Result<Vec<DocumentDescriptor>, StoreError> {
        let route = Route::ListDocuments;
        let response = self.send(route, None).await?;
        Self::read_json(&route.path(), response).await
    }

    async fn delete_document(
        &self,
        location: DocumentLocation,
        name: &str,
    ) -> Result<(), StoreError> {
        let route = Route::DeleteDocument { location, name };
        let response = self.send(route, None).await?;
        Self::expect_success(&route.path(), response).await
    }
}
