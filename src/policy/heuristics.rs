//! Admin detection heuristics.
//!
//! Each predicate answers one question about a claims record and tolerates
//! any claim being absent or oddly shaped. Claims are normalized through
//! `ClaimsRecord::values` before testing.

use crate::domain::permission::{self, ADMIN_PANEL_VIEW};
use crate::domain::{ClaimsRecord, ROLE_CLAIM};
use std::collections::HashSet;

/// Role names (lowercase) that mark a session as administrative when they
/// appear anywhere inside a role value.
pub const ADMIN_ROLE_LEXICON: [&str; 6] = [
    "admin",
    "administrator",
    "süper yönetici",
    "yönetici",
    "super admin",
    "super administrator",
];

/// Minimum Create/Edit/Delete entries for broad coverage
pub const MIN_ADMIN_LEVEL_PERMISSIONS: usize = 5;
/// Minimum distinct domains accompanying those entries
pub const MIN_COVERED_DOMAINS: usize = 2;

/// Permission statistics used by the broad-coverage heuristic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionCoverage {
    /// Entries whose action is Create, Edit or Delete
    pub admin_level_count: usize,
    /// Distinct domain prefixes
    pub domain_count: usize,
    /// Users AND Roles AND (Inventory OR Tickets)
    pub has_major_domains: bool,
}

impl PermissionCoverage {
    pub fn from_claims(claims: &ClaimsRecord) -> Self {
        let permissions = claims.permissions();
        let codes = permission::parse_all(&permissions);

        let admin_level_count = codes.iter().filter(|code| code.is_admin_level()).count();
        let domains: HashSet<&str> = codes.iter().map(|code| code.domain).collect();
        let has_major_domains = domains.contains("Users")
            && domains.contains("Roles")
            && (domains.contains("Inventory") || domains.contains("Tickets"));

        Self {
            admin_level_count,
            domain_count: domains.len(),
            has_major_domains,
        }
    }

    pub fn is_broad(&self) -> bool {
        (self.admin_level_count >= MIN_ADMIN_LEVEL_PERMISSIONS
            && self.domain_count >= MIN_COVERED_DOMAINS)
            || self.has_major_domains
    }
}

/// `Permission` contains `AdminPanel:View`
pub fn has_explicit_admin_permission(claims: &ClaimsRecord) -> bool {
    claims.has_permission(ADMIN_PANEL_VIEW)
}

/// `role` holds the elevated role literal (exact, case-sensitive)
pub fn has_explicit_admin_role_literal(claims: &ClaimsRecord, elevated_role: &str) -> bool {
    claims.values(ROLE_CLAIM).iter().any(|role| *role == elevated_role)
}

/// The first non-empty role source has a value containing a lexicon entry
pub fn has_admin_role_name_match(claims: &ClaimsRecord) -> bool {
    claims.roles_by_precedence().iter().any(|role| {
        let role = fold_case(role);
        ADMIN_ROLE_LEXICON.iter().any(|term| role.contains(term))
    })
}

/// Many write-level permissions across domains, or the major admin domains
pub fn has_broad_permission_coverage(claims: &ClaimsRecord) -> bool {
    PermissionCoverage::from_claims(claims).is_broad()
}

// Turkish dotted capital I lowercases to "i" plus a combining dot; fold it to
// a plain "i" so "YÖNETİCİ" still matches.
fn fold_case(value: &str) -> String {
    value.replace('İ', "i").to_lowercase()
}
