//! reqwest-backed client for the platform REST API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::ApiError;
use super::events::{EventRecord, EventsApi, CREATE_EVENT_PATH, LIST_EVENTS_PATH};
use super::guests::{
    participants_path, GuestRecord, GuestsApi, InviteGuestPayload, CREATE_GUEST_PATH,
};
use super::Envelope;
use crate::config::ApiConfig;
use crate::types::{EventDraft, Guest, InvitationEvent, NewGuest};

/// HTTP client implementing every collaborator the workflow talks to
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base_url: String,
    auth_token: Option<String>,
    client: Client,
}

impl HttpApiClient {
    pub fn new(
        base_url: impl Into<String>,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::network(base_url.as_str(), e.to_string()))?;
        Ok(Self {
            base_url,
            auth_token: auth_token.filter(|t| !t.is_empty()),
            client,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(
            config.base_url.clone(),
            config.auth_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/json");
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "API GET");
        let request = self.authorize(self.client.get(self.url(path)));
        Self::send(request, path).await
    }

    async fn post<B: Serialize + Sync + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(path, "API POST");
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        Self::send(request, path).await
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder, path: &str) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(path, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(path, status.as_u16(), body, retry_after);
            warn!(error = %err, "API request failed");
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::parse(path, e.to_string()))
    }
}

#[async_trait]
impl EventsApi for HttpApiClient {
    async fn create_event(&self, draft: &EventDraft) -> Result<InvitationEvent, ApiError> {
        let created: Envelope<EventRecord> = self.post(CREATE_EVENT_PATH, draft).await?;
        Ok(created.into_inner().into_event())
    }

    async fn list_events(&self) -> Result<Vec<InvitationEvent>, ApiError> {
        let records: Envelope<Vec<EventRecord>> = self.get(LIST_EVENTS_PATH).await?;
        Ok(records
            .into_inner()
            .into_iter()
            .map(EventRecord::into_event)
            .collect())
    }
}

#[async_trait]
impl GuestsApi for HttpApiClient {
    async fn list_guests(&self, event_id: &str) -> Result<Vec<Guest>, ApiError> {
        let records: Envelope<Vec<GuestRecord>> = self.get(&participants_path(event_id)).await?;
        Ok(records
            .into_inner()
            .into_iter()
            .map(GuestRecord::into_guest)
            .collect())
    }

    async fn invite_guest(&self, event_id: &str, guest: &NewGuest) -> Result<Guest, ApiError> {
        let payload = InviteGuestPayload::new(event_id, guest);
        let created: Envelope<GuestRecord> = self.post(CREATE_GUEST_PATH, &payload).await?;
        let mut created = created.into_inner().into_guest();
        // The create endpoint may echo only the id; keep what the user typed.
        if created.email.is_empty() {
            created.email = payload.email;
        }
        if created.name == created.email || created.name.is_empty() {
            created.name = payload.name;
        }
        if created.phone.is_none() {
            created.phone = payload.mobileno;
        }
        Ok(created)
    }
}
