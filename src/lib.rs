//! chatdock library.
//!
//! This module re-exports the core components for testing and extension.

pub mod app;
pub mod chat;
pub mod chatcore;
pub mod config;
pub mod events;
pub mod logging;
pub mod protocol;
pub mod registry;
pub mod timing;
pub mod tray;
pub mod trim;
pub mod ui;
pub mod viewport;
pub mod window;
