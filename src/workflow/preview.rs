//! Derived invitation preview

use serde::Serialize;

use crate::types::{Customizations, InvitationEvent, InvitationTemplate};

/// Read-only composite of the current selections, borrowed from the store
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvitationPreview<'a> {
    pub template: &'a InvitationTemplate,
    pub event: &'a InvitationEvent,
    pub customizations: &'a Customizations,
}

/// Build the preview, or `None` until both an event and a template are chosen
pub fn build_preview<'a>(
    event: Option<&'a InvitationEvent>,
    template: Option<&'a InvitationTemplate>,
    customizations: &'a Customizations,
) -> Option<InvitationPreview<'a>> {
    Some(InvitationPreview {
        template: template?,
        event: event?,
        customizations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::template_catalog;

    fn event() -> InvitationEvent {
        InvitationEvent {
            id: "e1".to_string(),
            title: "Test Party".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_event_gives_none() {
        let custom = Customizations::default();
        assert!(build_preview(None, Some(&template_catalog()[0]), &custom).is_none());
    }

    #[test]
    fn test_missing_template_gives_none() {
        let custom = Customizations::default();
        let event = event();
        assert!(build_preview(Some(&event), None, &custom).is_none());
    }

    #[test]
    fn test_preview_borrows_selections() {
        let custom = Customizations::default();
        let event = event();
        let template = &template_catalog()[0];
        let preview = build_preview(Some(&event), Some(template), &custom).unwrap();
        assert!(std::ptr::eq(preview.event, &event));
        assert!(std::ptr::eq(preview.template, template));
        assert!(std::ptr::eq(preview.customizations, &custom));
    }

    #[test]
    fn test_preview_serializes_composite() {
        let custom = Customizations::default();
        let event = event();
        let template = &template_catalog()[0];
        let preview = build_preview(Some(&event), Some(template), &custom).unwrap();
        let json = serde_json::to_value(preview).unwrap();
        assert_eq!(json["event"]["id"], "e1");
        assert_eq!(json["template"]["id"], template.id.as_str());
        assert_eq!(json["customizations"]["animations"], true);
    }
}
