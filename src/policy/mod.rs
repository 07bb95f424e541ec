//! Admin status resolution for the navigation layer.

pub mod heuristics;

use crate::config::PolicyConfig;
use crate::domain::ClaimsRecord;
use crate::jwt::DecodedClaims;
use serde::Serialize;

/// Rule that granted admin status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminGrant {
    /// `Permission` contains `AdminPanel:View`
    ExplicitPermission,
    /// `role` equals the elevated role literal
    ElevatedRole,
    /// A role name matches the admin lexicon
    RoleName,
    /// Permission set covers enough write-level access
    BroadCoverage,
}

/// Evaluation order. Explicit, single-purpose checks come before the
/// statistical coverage heuristic.
pub const ADMIN_RULE_PRECEDENCE: [AdminGrant; 4] = [
    AdminGrant::ExplicitPermission,
    AdminGrant::ElevatedRole,
    AdminGrant::RoleName,
    AdminGrant::BroadCoverage,
];

/// Admin verdict for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AuthorizationVerdict {
    pub is_admin: bool,
}

/// Decides whether a session counts as administrator.
#[derive(Debug, Clone)]
pub struct AdminStatusResolver {
    elevated_role: String,
}

impl Default for AdminStatusResolver {
    fn default() -> Self {
        Self::new(&PolicyConfig::default())
    }
}

impl AdminStatusResolver {
    pub fn new(config: &PolicyConfig) -> Self {
        Self {
            elevated_role: config.elevated_role.clone(),
        }
    }

    /// First rule, in precedence order, that grants admin status.
    /// Undecodable sessions never do.
    pub fn explain(&self, claims: &DecodedClaims) -> Option<AdminGrant> {
        let claims = claims.as_ref().ok()?;
        self.explain_claims(claims)
    }

    pub fn explain_claims(&self, claims: &ClaimsRecord) -> Option<AdminGrant> {
        let grant = ADMIN_RULE_PRECEDENCE
            .into_iter()
            .find(|rule| self.rule_matches(*rule, claims));
        tracing::trace!(grant = ?grant, "admin rules evaluated");
        grant
    }

    pub fn resolve(&self, claims: &DecodedClaims) -> bool {
        self.explain(claims).is_some()
    }

    pub fn verdict(&self, claims: &DecodedClaims) -> AuthorizationVerdict {
        AuthorizationVerdict {
            is_admin: self.resolve(claims),
        }
    }

    fn rule_matches(&self, rule: AdminGrant, claims: &ClaimsRecord) -> bool {
        match rule {
            AdminGrant::ExplicitPermission => heuristics::has_explicit_admin_permission(claims),
            AdminGrant::ElevatedRole => {
                heuristics::has_explicit_admin_role_literal(claims, &self.elevated_role)
            }
            AdminGrant::RoleName => heuristics::has_admin_role_name_match(claims),
            AdminGrant::BroadCoverage => heuristics::has_broad_permission_coverage(claims),
        }
    }
}
