//! Fire-and-forget device notifications through a Pushy-compatible API

use futures::future::join_all;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::database::models::{Member, Message};

/// Data block delivered to the client app; `type` selects the handler there
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PushPayload {
    #[serde(rename = "msg")]
    Message { chatid: i32, message: Message },

    #[serde(rename = "in-con")]
    IncomingContact {
        sender: String,
        contactid: i32,
        contact: Member,
    },

    #[serde(rename = "out-con")]
    OutgoingContact {
        sender: String,
        contactid: i32,
        contact: Member,
    },

    #[serde(rename = "update-con")]
    UpdateContact { contactid: i32, contact: Member },

    #[serde(rename = "delete-con")]
    DeleteContact { contactid: i32, contact: Member },
}

impl PushPayload {
    pub fn message(message: Message) -> Self {
        PushPayload::Message {
            chatid: message.chatid,
            message,
        }
    }

    pub fn incoming_contact(sender: impl Into<String>, contact: Member) -> Self {
        PushPayload::IncomingContact {
            sender: sender.into(),
            contactid: contact.memberid,
            contact,
        }
    }

    pub fn outgoing_contact(sender: impl Into<String>, contact: Member) -> Self {
        PushPayload::OutgoingContact {
            sender: sender.into(),
            contactid: contact.memberid,
            contact,
        }
    }

    pub fn update_contact(contact: Member) -> Self {
        PushPayload::UpdateContact {
            contactid: contact.memberid,
            contact,
        }
    }

    pub fn delete_contact(contact: Member) -> Self {
        PushPayload::DeleteContact {
            contactid: contact.memberid,
            contact,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PushPayload::Message { .. } => "msg",
            PushPayload::IncomingContact { .. } => "in-con",
            PushPayload::OutgoingContact { .. } => "out-con",
            PushPayload::UpdateContact { .. } => "update-con",
            PushPayload::DeleteContact { .. } => "delete-con",
        }
    }
}

#[derive(Debug, Error)]
pub enum PushError {
    #[error("push API key not configured")]
    NotConfigured,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("push service rejected notification ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[derive(Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    data: &'a PushPayload,
}

#[derive(Deserialize)]
struct PushResponse {
    id: Option<String>,
    error: Option<String>,
}

pub struct PushClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

static CLIENT: Lazy<PushClient> = Lazy::new(|| {
    let settings = &config::config().push;
    PushClient::new(settings.endpoint.clone(), settings.api_key.clone())
});

/// Process-wide notifier built from config
pub fn client() -> &'static PushClient {
    &CLIENT
}

impl PushClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Deliver one payload to one device, returning the provider's push id
    pub async fn send(&self, token: &str, payload: &PushPayload) -> Result<String, PushError> {
        let api_key = self.api_key.as_deref().ok_or(PushError::NotConfigured)?;

        let response = self
            .http
            .post(format!("{}/push", self.endpoint))
            .query(&[("api_key", api_key)])
            .json(&PushRequest { to: token, data: payload })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies are JSON `{error}` from the provider but plain text from proxies
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<PushResponse>(&text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or(text);
            return Err(PushError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: PushResponse = response.json().await?;
        Ok(body.id.unwrap_or_default())
    }

    /// Send to every token concurrently, logging each outcome
    pub async fn send_all(&self, tokens: &[String], payload: &PushPayload) -> usize {
        let results = join_all(tokens.iter().map(|token| self.send(token, payload))).await;

        let mut delivered = 0;
        for result in results {
            match result {
                Ok(id) => {
                    delivered += 1;
                    tracing::info!("push sent successfully ({}, id: {})", payload.kind(), id);
                }
                Err(e) => tracing::warn!("push failed ({}): {}", payload.kind(), e),
            }
        }
        delivered
    }

    /// Spawn delivery and return immediately; callers never wait on the provider
    pub fn dispatch(&'static self, tokens: Vec<String>, payload: PushPayload) {
        if tokens.is_empty() {
            return;
        }
        if self.api_key.is_none() {
            tracing::debug!("PUSHY_API not set, dropping {} notification for {} device(s)", payload.kind(), tokens.len());
            return;
        }

        tokio::spawn(async move {
            self.send_all(&tokens, &payload).await;
        });
    }
}
