//! Invitation event - the event an invitation is created for
//!
//! Events are either created through the events API from an `EventDraft`
//! or picked from the list of events the current user can manage.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Event category tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Birthday,
    Wedding,
    Corporate,
    #[default]
    Party,
    Cultural,
    Nightclub,
}

impl EventCategory {
    pub fn all() -> &'static [EventCategory] {
        &[
            EventCategory::Birthday,
            EventCategory::Wedding,
            EventCategory::Corporate,
            EventCategory::Party,
            EventCategory::Cultural,
            EventCategory::Nightclub,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Birthday => "birthday",
            EventCategory::Wedding => "wedding",
            EventCategory::Corporate => "corporate",
            EventCategory::Party => "party",
            EventCategory::Cultural => "cultural",
            EventCategory::Nightclub => "nightclub",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCategory::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownCategory(s.trim().to_string()))
    }
}

/// An event selected (or newly created) in the first workflow step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InvitationEvent {
    /// Server-assigned identifier
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Event date (YYYY-MM-DD)
    pub date: String,
    /// Start time (HH:MM)
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub host_name: String,
    #[serde(default)]
    pub host_avatar: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<f64>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dresscode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_restriction: Option<u32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_theme: Option<String>,
    #[serde(default)]
    pub vibes_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_score: Option<u8>,
}

impl InvitationEvent {
    /// One-line "date time @ venue" summary used in lists
    pub fn schedule_line(&self) -> String {
        let mut line = self.date.clone();
        if !self.time.is_empty() {
            line.push(' ');
            line.push_str(&self.time);
        }
        if !self.venue.is_empty() {
            line.push_str(" @ ");
            line.push_str(&self.venue);
        }
        line
    }
}

/// Form validation failures for a new event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("date must be YYYY-MM-DD, got '{0}'")]
    InvalidDate(String),
    #[error("time must be HH:MM, got '{0}'")]
    InvalidTime(String),
    #[error("capacity must be a whole number of at least 1")]
    InvalidCapacity,
    #[error("ticket price must be a number of at least 0")]
    InvalidTicketPrice,
    #[error("unknown event category '{0}'")]
    UnknownCategory(String),
}

/// Payload sent to the events API to create an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: String,
    pub time: String,
    pub venue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<f64>,
}

impl EventDraft {
    /// Check required fields and formats before the draft is submitted
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Required("title"));
        }
        if self.date.trim().is_empty() {
            return Err(ValidationError::Required("date"));
        }
        if NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").is_err() {
            return Err(ValidationError::InvalidDate(self.date.clone()));
        }
        if self.time.trim().is_empty() {
            return Err(ValidationError::Required("time"));
        }
        if NaiveTime::parse_from_str(self.time.trim(), "%H:%M").is_err() {
            return Err(ValidationError::InvalidTime(self.time.clone()));
        }
        if self.venue.trim().is_empty() {
            return Err(ValidationError::Required("venue"));
        }
        if self.capacity == Some(0) {
            return Err(ValidationError::InvalidCapacity);
        }
        if let Some(price) = self.ticket_price {
            if !price.is_finite() || price < 0.0 {
                return Err(ValidationError::InvalidTicketPrice);
            }
        }
        Ok(())
    }

    /// Parse an optional capacity field from form text
    pub fn parse_capacity(raw: &str) -> Result<Option<u32>, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(Some(n)),
            _ => Err(ValidationError::InvalidCapacity),
        }
    }

    /// Parse an optional ticket price field from form text
    pub fn parse_ticket_price(raw: &str) -> Result<Option<f64>, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.parse::<f64>() {
            Ok(p) if p.is_finite() && p >= 0.0 => Ok(Some(p)),
            _ => Err(ValidationError::InvalidTicketPrice),
        }
    }
}
