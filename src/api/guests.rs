//! Guest-management collaborator

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::IdValue;
use crate::types::{Guest, NewGuest, RsvpStatus};

/// Path for inviting a guest
pub const CREATE_GUEST_PATH: &str = "/api/master/guest/create";

/// Path listing the guests of an event
pub fn participants_path(event_id: &str) -> String {
    format!("/api/events/{}/participants", event_id)
}

/// Guest list CRUD owned by the platform
#[async_trait]
pub trait GuestsApi: Send + Sync {
    /// Current guest list for an event
    async fn list_guests(&self, event_id: &str) -> Result<Vec<Guest>, ApiError>;

    /// Invite a guest to an event, returning the created record
    async fn invite_guest(&self, event_id: &str, guest: &NewGuest) -> Result<Guest, ApiError>;
}

/// Request body for `CREATE_GUEST_PATH`
#[derive(Debug, Clone, Serialize)]
pub struct InviteGuestPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobileno: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialnote: Option<String>,
    pub event_id: String,
    pub status: bool,
}

impl InviteGuestPayload {
    pub fn new(event_id: &str, guest: &NewGuest) -> Self {
        Self {
            name: guest.name.trim().to_string(),
            email: guest.email.trim().to_string(),
            mobileno: guest.phone.clone(),
            specialnote: guest.note.clone(),
            event_id: event_id.to_string(),
            status: true,
        }
    }
}

/// Guest record in the platform's own shape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuestRecord {
    #[serde(default, alias = "_id", alias = "id")]
    pub guest_id: Option<IdValue>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "phone")]
    pub mobileno: Option<String>,
    #[serde(default, alias = "avatar")]
    pub img: Option<String>,
    #[serde(default, alias = "rsvpStatus")]
    pub invite_status: Option<String>,
    #[serde(default, alias = "plusOnes")]
    pub plus_ones: Option<u32>,
}

impl GuestRecord {
    /// Adapt the platform record into the workflow's guest type
    pub fn into_guest(self) -> Guest {
        let email = self.email.unwrap_or_default();
        let id = self
            .guest_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("guest-{}", uuid::Uuid::new_v4()));
        Guest {
            id,
            name: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| email.clone()),
            email,
            phone: self.mobileno.filter(|p| !p.is_empty()),
            avatar: self.img.filter(|i| !i.is_empty()),
            plus_ones: self.plus_ones.unwrap_or(0),
            rsvp_status: parse_rsvp(self.invite_status.as_deref()),
            ..Default::default()
        }
    }
}

fn parse_rsvp(raw: Option<&str>) -> RsvpStatus {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("accepted" | "confirmed") => RsvpStatus::Accepted,
        Some("declined") => RsvpStatus::Declined,
        Some("maybe") => RsvpStatus::Maybe,
        _ => RsvpStatus::Pending,
    }
}
