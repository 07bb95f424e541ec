//! Domain models for Navguard Core

pub mod claims;
pub mod menu;
pub mod permission;

pub use claims::*;
pub use menu::*;
pub use permission::{PermissionCode, ADMIN_LEVEL_ACTIONS, ADMIN_PANEL_VIEW};
