//! Permission code parsing (`Domain:Action`)

/// Permission that opens the administration area
pub const ADMIN_PANEL_VIEW: &str = "AdminPanel:View";

/// Actions that count as administrative (write-level) access
pub const ADMIN_LEVEL_ACTIONS: [&str; 3] = ["Create", "Edit", "Delete"];

/// A permission string split into its domain and action.
///
/// `"Users:Create"` parses to domain `Users`, action `Create`. Only the first
/// colon separates the two parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionCode<'a> {
    pub domain: &'a str,
    pub action: &'a str,
}

impl<'a> PermissionCode<'a> {
    /// Parse a permission string. Entries without a colon, or with an empty
    /// domain or action, are not permission codes.
    ///
    /// The action is everything after the first colon, so a scoped entry such
    /// as `"Users:Create:Own"` has action `Create:Own` and is not admin level.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let (domain, action) = raw.split_once(':')?;
        if domain.is_empty() || action.is_empty() {
            return None;
        }
        Some(Self { domain, action })
    }

    /// Create, Edit or Delete
    pub fn is_admin_level(&self) -> bool {
        ADMIN_LEVEL_ACTIONS.contains(&self.action)
    }
}

/// Parse every well-formed entry, skipping the rest
pub fn parse_all<'a>(permissions: &[&'a str]) -> Vec<PermissionCode<'a>> {
    permissions
        .iter()
        .copied()
        .filter_map(PermissionCode::parse)
        .collect()
}

/// Check if any permission grants write-level access
pub fn has_admin_level_permission(permissions: &[&str]) -> bool {
    parse_all(permissions).iter().any(PermissionCode::is_admin_level)
}
