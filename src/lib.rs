//! Vibes invite - terminal workflow for building and sending event invitations
//!
//! The workflow core (`workflow`) is UI-agnostic; `ui` and `app` drive it from
//! a ratatui terminal front end and `api` talks to the platform.

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod types;
pub mod ui;
pub mod workflow;
