//! Session claims as carried by the bearer token payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Singular role claim
pub const ROLE_CLAIM: &str = "role";
/// Plural role claim
pub const ROLES_CLAIM: &str = "roles";
/// Namespaced role claim emitted by older backend versions
pub const LEGACY_ROLE_CLAIM: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";
/// Permission list claim (`Domain:Action` entries)
pub const PERMISSION_CLAIM: &str = "Permission";

/// Role claim sources, in the order they are consulted.
pub const ROLE_SOURCES: [&str; 3] = [ROLE_CLAIM, ROLES_CLAIM, LEGACY_ROLE_CLAIM];

const DISPLAY_NAME_CLAIMS: [&str; 5] =
    ["name", "unique_name", "preferred_username", "email", "sub"];

/// Decoded token payload.
///
/// The payload is kept as a loose JSON object: no claim is guaranteed to be
/// present or to have a particular shape. Every accessor normalizes instead of
/// failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimsRecord(Map<String, Value>);

impl ClaimsRecord {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Raw claim value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Normalize a claim to a list of strings.
    ///
    /// Absent claims and unexpected shapes yield an empty list, a bare string
    /// yields a single entry, and arrays keep only their string elements.
    /// String values are kept verbatim, blank ones included.
    pub fn values(&self, key: &str) -> Vec<&str> {
        match self.0.get(key) {
            Some(Value::String(value)) => vec![value.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Normalized `Permission` claim
    pub fn permissions(&self) -> Vec<&str> {
        self.values(PERMISSION_CLAIM)
    }

    /// Check if the session carries a specific permission
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions().iter().any(|p| *p == permission)
    }

    /// Check if the session carries any of the specified permissions
    pub fn has_any_permission<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        let held = self.permissions();
        permissions
            .iter()
            .any(|required| held.iter().any(|p| *p == required.as_ref()))
    }

    /// Roles from the first role source that has any value.
    ///
    /// Sources are never merged: a non-empty `role` hides `roles` and the
    /// legacy claim entirely. A blank string still makes its source non-empty.
    pub fn roles_by_precedence(&self) -> Vec<&str> {
        ROLE_SOURCES
            .iter()
            .map(|source| self.values(source))
            .find(|values| !values.is_empty())
            .unwrap_or_default()
    }

    /// Subject (user ID)
    pub fn subject(&self) -> Option<&str> {
        self.0
            .get("sub")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Human readable name for the session, falling back to email and subject
    pub fn display_name(&self) -> Option<&str> {
        DISPLAY_NAME_CLAIMS.iter().find_map(|claim| {
            self.0
                .get(*claim)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
    }

    /// Expiration time from the `exp` claim (Unix seconds)
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.0.get("exp")?;
        let secs = exp
            .as_i64()
            .or_else(|| exp.as_f64().map(|f| f.trunc() as i64))?;
        DateTime::<Utc>::from_timestamp(secs, 0)
    }

    /// A token without a readable `exp` never counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}

impl From<Map<String, Value>> for ClaimsRecord {
    fn from(claims: Map<String, Value>) -> Self {
        Self::new(claims)
    }
}
