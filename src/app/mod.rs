//! Application module structure for DockApp
//!
//! This module organizes the main application into focused submodules:
//! - `core`: DockApp struct, initialization, and window lifecycle helpers
//! - `events`: Event processing from the chat core and the shell bus
//! - `update`: Main update loop, resize handling, and UI action dispatch

pub mod core;
pub mod events;
pub mod update;

// Re-export DockApp for public API
pub use core::DockApp;
