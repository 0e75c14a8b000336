//! Domain types shared by the workflow, the API client and the terminal UI.

mod customizations;
mod event;
mod guest;
mod template;

pub use customizations::{
    pair, CustomizationPatch, Customizations, CULTURAL_ELEMENTS, FONT_PRESETS, PALETTE_PRESETS,
};
pub use event::{EventCategory, EventDraft, InvitationEvent, ValidationError};
pub use guest::{AccessLevel, Guest, GuestTier, NewGuest, RsvpStatus};
pub use template::{
    find_template, template_catalog, GamificationLevel, InvitationTemplate, TemplateCategory,
};
