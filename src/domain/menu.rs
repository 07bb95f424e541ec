//! Navigation menu models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Static navigation entry, authored once by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    /// Display text; identifies the node among its siblings
    #[validate(length(min = 1, max = 100))]
    pub label: String,
    /// Route target, absent for pure grouping nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub admin_only: bool,
    /// Any one of these grants access (OR semantics)
    #[serde(default)]
    #[validate(custom(function = "validate_permission_codes"))]
    pub required_permissions: Vec<String>,
    #[serde(default)]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Grouping node without a route
    pub fn group(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: None,
            admin_only: false,
            required_permissions: vec![],
            children: vec![],
        }
    }

    /// Routed node
    pub fn link(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::group(label)
        }
    }

    pub fn admin_only(mut self) -> Self {
        self.admin_only = true;
        self
    }

    pub fn requires<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether any visibility rule beyond the cascade applies to this node
    pub fn is_gated(&self) -> bool {
        self.admin_only || !self.required_permissions.is_empty()
    }
}

/// Menu entry that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredMenuNode {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub admin_only: bool,
    pub required_permissions: Vec<String>,
    pub children: Vec<FilteredMenuNode>,
}

impl FilteredMenuNode {
    /// Copy a source node, replacing its children with the filtered ones
    pub fn from_node(node: &MenuNode, children: Vec<FilteredMenuNode>) -> Self {
        Self {
            label: node.label.clone(),
            path: node.path.clone(),
            admin_only: node.admin_only,
            required_permissions: node.required_permissions.clone(),
            children,
        }
    }
}

/// Validate permission code format (e.g., "Users:Create", "AdminPanel:View")
fn validate_permission_codes(codes: &[String]) -> Result<(), validator::ValidationError> {
    if codes.iter().all(|code| PERMISSION_CODE_REGEX.is_match(code)) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_permission_code"))
    }
}

// Regex for permission code validation
lazy_static::lazy_static! {
    pub static ref PERMISSION_CODE_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z][A-Za-z0-9]*:[A-Za-z][A-Za-z0-9]*$").unwrap();
}
