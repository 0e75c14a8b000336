//! Guests on the invitation list

use serde::{Deserialize, Serialize};

/// Guest tier used for access perks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestTier {
    Vip,
    Premium,
    General,
}

/// RSVP state of a guest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Maybe,
}

impl RsvpStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Accepted => "accepted",
            RsvpStatus::Declined => "declined",
            RsvpStatus::Maybe => "maybe",
        }
    }
}

/// How much of the event a guest can see before the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Full,
    Limited,
    Preview,
}

/// A guest as the workflow stores it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<GuestTier>,
    #[serde(default)]
    pub dietary: Vec<String>,
    #[serde(default)]
    pub plus_ones: u32,
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nft_pass_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_points: Option<u32>,
}

/// A guest entered in the add-guest form, before the API assigns an id
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewGuest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub note: Option<String>,
}

impl NewGuest {
    /// Name and a plausible email are required
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Guest name is required".to_string());
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(format!("'{}' is not a valid email address", email)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_defaults_to_pending() {
        let guest: Guest =
            serde_json::from_str(r#"{"id":"g1","name":"Ana","email":"ana@example.com"}"#)
                .unwrap();
        assert_eq!(guest.rsvp_status, RsvpStatus::Pending);
        assert_eq!(guest.plus_ones, 0);
        assert!(guest.tier.is_none());
    }

    #[test]
    fn test_new_guest_validation() {
        let ok = NewGuest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let no_name = NewGuest {
            name: " ".to_string(),
            ..ok.clone()
        };
        assert!(no_name.validate().is_err());

        let bad_email = NewGuest {
            email: "ana.example.com".to_string(),
            ..ok
        };
        assert!(bad_email.validate().is_err());
    }
}
