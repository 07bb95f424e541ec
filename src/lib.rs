//! Navguard Core - Navigation Authorization Engine
//!
//! This crate decides, from the claims of an (unverified) session token,
//! whether the session counts as administrator and which navigation entries
//! it may see. It is a display-layer convenience: the backend still enforces
//! every request.

pub mod config;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod navigation;
pub mod policy;
pub mod session;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use domain::{ClaimsRecord, FilteredMenuNode, MenuNode};
pub use error::{AppError, Result};
pub use jwt::{decode, DecodeError, DecodedClaims};
pub use navigation::MenuVisibilityFilter;
pub use policy::{AdminGrant, AdminStatusResolver, AuthorizationVerdict};
pub use session::{SessionAuthorizer, SessionView, TokenSource};
