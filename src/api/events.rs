//! Events collaborator: create an event, list the user's events

use async_trait::async_trait;
use serde::Deserialize;

use super::error::ApiError;
use super::IdValue;
use crate::types::{EventDraft, InvitationEvent};

/// Path for event creation
pub const CREATE_EVENT_PATH: &str = "/api/events";
/// Path for events the authenticated user can manage
pub const LIST_EVENTS_PATH: &str = "/api/events/getByAuth";

/// Event-creation and event-listing collaborator
#[async_trait]
pub trait EventsApi: Send + Sync {
    /// Create an event; the server assigns the id
    async fn create_event(&self, draft: &EventDraft) -> Result<InvitationEvent, ApiError>;

    /// Events the current user may build an invitation for
    async fn list_events(&self) -> Result<Vec<InvitationEvent>, ApiError>;
}

/// Event as the platform API returns it.
///
/// Both the platform's storage shape (`_id`, `name_title`, `venue_name`...)
/// and the camelCase invitation shape are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<IdValue>,
    #[serde(default)]
    pub event_id: Option<IdValue>,
    #[serde(default, alias = "title")]
    pub name_title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, alias = "venue")]
    pub venue_name: Option<String>,
    #[serde(default, alias = "address")]
    pub street_address: Option<String>,
    #[serde(default, alias = "hostName")]
    pub created_by: Option<IdValue>,
    #[serde(default, alias = "coverImage")]
    pub event_image: Option<String>,
    #[serde(default, alias = "capacity")]
    pub max_capacity: Option<u32>,
    #[serde(default, alias = "ticketPrice")]
    pub ticket_price: Option<f64>,
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default, alias = "amenities")]
    pub live_vibes_invite_vip_perks: Option<Vec<String>>,
    #[serde(default, alias = "vibesTags")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl EventRecord {
    /// Adapt the API record into the workflow's event type
    pub fn into_event(self) -> InvitationEvent {
        let id = self
            .id
            .or(self.event_id)
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("event-{}", uuid::Uuid::new_v4()));

        let date = match self.date.filter(|d| !d.is_empty()) {
            Some(date) => date,
            None => self
                .created_at
                .as_deref()
                .and_then(|ts| ts.split('T').next())
                .unwrap_or_default()
                .to_string(),
        };

        let image = self.event_image.unwrap_or_default();

        InvitationEvent {
            id,
            title: self
                .name_title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled Event".to_string()),
            description: self.description.unwrap_or_default(),
            date,
            time: self.time.unwrap_or_default(),
            venue: self.venue_name.unwrap_or_default(),
            address: self.street_address.unwrap_or_default(),
            host_name: self.created_by.map(|h| h.to_string()).unwrap_or_default(),
            host_avatar: image.clone(),
            cover_image: image,
            capacity: self.max_capacity.unwrap_or(0),
            ticket_price: self.ticket_price,
            is_private: self.status == Some(false),
            amenities: self.live_vibes_invite_vip_perks.unwrap_or_default(),
            vibes_tags: self.tags.unwrap_or_default(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventCategory;

    #[test]
    fn test_platform_shape_adapts() {
        let record: EventRecord = serde_json::from_str(
            r#"{
                "_id": "665f1c",
                "name_title": "Rooftop Launch",
                "event_type_id": 1,
                "ticketed_events": true,
                "venue_name": "Sky Bar",
                "street_address": "123 Downtown Plaza",
                "date": "2025-07-15",
                "time": "20:00",
                "max_capacity": 100,
                "event_image": "https://img/1.jpg",
                "live_vibes_invite_vip_perks": ["Open Bar"],
                "tags": ["upbeat"],
                "status": false,
                "created_by": 42
            }"#,
        )
        .unwrap();
        let event = record.into_event();
        assert_eq!(event.id, "665f1c");
        assert_eq!(event.title, "Rooftop Launch");
        assert_eq!(event.venue, "Sky Bar");
        assert_eq!(event.address, "123 Downtown Plaza");
        assert_eq!(event.capacity, 100);
        assert_eq!(event.host_name, "42");
        assert_eq!(event.cover_image, "https://img/1.jpg");
        assert_eq!(event.amenities, vec!["Open Bar".to_string()]);
        assert_eq!(event.vibes_tags, vec!["upbeat".to_string()]);
        assert!(event.is_private);
        assert_eq!(event.category, EventCategory::Party);
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let record: EventRecord = serde_json::from_str(
            r#"{"event_id": 17, "created_at": "2025-01-02T10:00:00Z"}"#,
        )
        .unwrap();
        let event = record.into_event();
        assert_eq!(event.id, "17");
        assert_eq!(event.title, "Untitled Event");
        assert_eq!(event.date, "2025-01-02");
        assert!(!event.is_private);
    }

    #[test]
    fn test_generated_id_when_absent() {
        let event = EventRecord::default().into_event();
        assert!(event.id.starts_with("event-"));
    }

    #[test]
    fn test_camel_case_shape_adapts() {
        let record: EventRecord = serde_json::from_str(
            r#"{"id":"e1","title":"Test Party","venue":"Hall","capacity":20,"ticketPrice":12.5}"#,
        )
        .unwrap();
        let event = record.into_event();
        assert_eq!(event.id, "e1");
        assert_eq!(event.title, "Test Party");
        assert_eq!(event.venue, "Hall");
        assert_eq!(event.capacity, 20);
        assert_eq!(event.ticket_price, Some(12.5));
    }
}
