//! Navigation menu filtering
//!
//! Produces the subset of a static menu tree that the current session may
//! see. The source tree is never modified; every call builds a new tree.

use crate::config::NavigationConfig;
use crate::domain::permission::{self, ADMIN_PANEL_VIEW};
use crate::domain::{ClaimsRecord, FilteredMenuNode, MenuNode};
use crate::error::{AppError, Result};
use crate::jwt::DecodedClaims;
use std::collections::HashSet;
use std::path::Path;
use validator::Validate;

/// Session facts the per-node rules look at, computed once per filter call.
struct VisibilityContext<'a> {
    has_session: bool,
    is_admin: bool,
    permissions: HashSet<&'a str>,
    has_admin_level: bool,
}

impl<'a> VisibilityContext<'a> {
    fn new(claims: &'a DecodedClaims, is_admin: bool) -> Self {
        let held = claims
            .as_ref()
            .map(ClaimsRecord::permissions)
            .unwrap_or_default();
        Self {
            has_session: claims.is_ok(),
            is_admin,
            has_admin_level: permission::has_admin_level_permission(&held),
            permissions: held.into_iter().collect(),
        }
    }

    fn holds(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Filters a menu tree down to the nodes a session is entitled to see.
#[derive(Debug, Clone)]
pub struct MenuVisibilityFilter {
    admin_panel_label: String,
}

impl Default for MenuVisibilityFilter {
    fn default() -> Self {
        Self::new(&NavigationConfig::default())
    }
}

impl MenuVisibilityFilter {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            admin_panel_label: config.admin_panel_label.clone(),
        }
    }

    /// Filter `tree` for the given session.
    ///
    /// Sibling order is preserved. A grouping node whose children all
    /// disappear disappears too, unless it has its own `path`.
    pub fn filter(
        &self,
        tree: &[MenuNode],
        claims: &DecodedClaims,
        is_admin: bool,
    ) -> Vec<FilteredMenuNode> {
        let ctx = VisibilityContext::new(claims, is_admin);
        self.filter_nodes(tree, &ctx)
    }

    fn filter_nodes(
        &self,
        nodes: &[MenuNode],
        ctx: &VisibilityContext<'_>,
    ) -> Vec<FilteredMenuNode> {
        nodes
            .iter()
            .filter_map(|node| self.visible_node(node, ctx))
            .collect()
    }

    fn visible_node(
        &self,
        node: &MenuNode,
        ctx: &VisibilityContext<'_>,
    ) -> Option<FilteredMenuNode> {
        // A failing own gate hides the subtree no matter what the children would show.
        if !self.passes_own_gate(node, ctx) {
            tracing::trace!(label = %node.label, "menu node hidden by its permission gate");
            return None;
        }

        let children = self.filter_nodes(&node.children, ctx);
        if !node.children.is_empty() && children.is_empty() && node.path.is_none() {
            tracing::trace!(label = %node.label, "menu group hidden: no visible children");
            return None;
        }

        Some(FilteredMenuNode::from_node(node, children))
    }

    fn passes_own_gate(&self, node: &MenuNode, ctx: &VisibilityContext<'_>) -> bool {
        if self.is_admin_panel(node) {
            return ctx.is_admin || ctx.holds(ADMIN_PANEL_VIEW);
        }
        if !node.is_gated() {
            return true;
        }
        if !ctx.has_session {
            return false;
        }
        // Gated with no permissions listed means adminOnly alone.
        if node.required_permissions.is_empty() {
            return ctx.is_admin;
        }

        let has_any_required_permission = node
            .required_permissions
            .iter()
            .any(|required| ctx.holds(required));
        let has_admin_level_permissions = !node.admin_only || ctx.has_admin_level;

        has_any_required_permission && has_admin_level_permissions
    }

    fn is_admin_panel(&self, node: &MenuNode) -> bool {
        node.label == self.admin_panel_label
            || node.required_permissions.iter().any(|p| p == ADMIN_PANEL_VIEW)
    }
}

/// Load a menu description (a JSON array of nodes) from disk
pub fn load_menu(path: impl AsRef<Path>) -> Result<Vec<MenuNode>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).inspect_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "cannot read menu file");
    })?;
    let menu: Vec<MenuNode> = serde_json::from_str(&raw)?;
    tracing::debug!(path = %path.display(), top_level = menu.len(), "menu loaded");
    Ok(menu)
}

/// Check a menu tree for authoring mistakes: empty or overlong labels,
/// malformed permission codes, and labels repeated among siblings.
pub fn validate_menu(nodes: &[MenuNode]) -> Result<()> {
    validate_level(nodes, "<root>")
}

fn validate_level(nodes: &[MenuNode], parent: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for node in nodes {
        node.validate().map_err(|e| {
            AppError::Validation(format!("menu node {:?} under {}: {}", node.label, parent, e))
        })?;
        if !seen.insert(node.label.as_str()) {
            return Err(AppError::MenuConfig(format!(
                "duplicate label {:?} under {}",
                node.label, parent
            )));
        }
        validate_level(&node.children, &node.label)?;
    }
    Ok(())
}
