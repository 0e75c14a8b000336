//! Selection state accumulated across the workflow steps

use crate::types::{CustomizationPatch, Customizations, Guest, InvitationEvent, InvitationTemplate};

/// The event, template, customizations and guest list chosen so far.
///
/// Slices are replaced wholesale, except customizations which are
/// shallow-merged. Sequencer side effects live in `WorkflowController`.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    event: Option<InvitationEvent>,
    template: Option<InvitationTemplate>,
    customizations: Customizations,
    guests: Vec<Guest>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(&self) -> Option<&InvitationEvent> {
        self.event.as_ref()
    }

    pub fn template(&self) -> Option<&InvitationTemplate> {
        self.template.as_ref()
    }

    pub fn customizations(&self) -> &Customizations {
        &self.customizations
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn set_event(&mut self, event: InvitationEvent) {
        self.event = Some(event);
    }

    pub fn set_template(&mut self, template: InvitationTemplate) {
        self.template = Some(template);
    }

    pub fn update_customizations(&mut self, patch: CustomizationPatch) {
        self.customizations.merge(patch);
    }

    pub fn set_guests(&mut self, guests: Vec<Guest>) {
        self.guests = guests;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::template_catalog;

    fn guest(id: &str) -> Guest {
        Guest {
            id: id.to_string(),
            name: format!("Guest {}", id),
            email: format!("{}@example.com", id),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = SelectionStore::new();
        assert!(store.event().is_none());
        assert!(store.template().is_none());
        assert!(store.guests().is_empty());
        assert_eq!(store.customizations(), &Customizations::default());
    }

    #[test]
    fn test_set_event_replaces_wholesale() {
        let mut store = SelectionStore::new();
        let first = InvitationEvent {
            id: "e1".to_string(),
            title: "First".to_string(),
            capacity: 50,
            ..Default::default()
        };
        let second = InvitationEvent {
            id: "e2".to_string(),
            title: "Second".to_string(),
            ..Default::default()
        };
        store.set_event(first);
        store.set_event(second.clone());
        assert_eq!(store.event(), Some(&second));
    }

    #[test]
    fn test_set_template() {
        let mut store = SelectionStore::new();
        let template = template_catalog()[1].clone();
        store.set_template(template.clone());
        assert_eq!(store.template(), Some(&template));
    }

    #[test]
    fn test_set_guests_replaces_list() {
        let mut store = SelectionStore::new();
        store.set_guests(vec![guest("a"), guest("b")]);
        store.set_guests(vec![guest("c")]);
        let ids: Vec<&str> = store.guests().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn test_update_customizations_merges() {
        let mut store = SelectionStore::new();
        store.update_customizations(CustomizationPatch::fonts(["Montserrat", "Lora"]));
        store.update_customizations(CustomizationPatch::animations(false));
        let c = store.customizations();
        assert_eq!(c.fonts, ["Montserrat".to_string(), "Lora".to_string()]);
        assert!(!c.animations);
        assert_eq!(c.colors, Customizations::default().colors);
    }
}
