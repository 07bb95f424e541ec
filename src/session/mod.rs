//! Session evaluation: token in, admin verdict and visible menu out.
//!
//! The token itself belongs to a session-storage collaborator; this module
//! only reads it through [`TokenSource`] and recomputes everything on each
//! call.

use crate::config::Config;
use crate::domain::{FilteredMenuNode, MenuNode};
use crate::jwt::{self, DecodeError, DecodedClaims};
use crate::navigation::MenuVisibilityFilter;
use crate::policy::{AdminGrant, AdminStatusResolver, AuthorizationVerdict};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Read-only access to the current session token
#[cfg_attr(test, mockall::automock)]
pub trait TokenSource: Send + Sync {
    /// Current token, or `None` when nobody is signed in
    fn current_token(&self) -> Option<String>;
}

/// Reads the token from an environment variable
#[derive(Debug, Clone)]
pub struct EnvTokenSource {
    var: String,
}

impl EnvTokenSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TokenSource for EnvTokenSource {
    fn current_token(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|t| !t.trim().is_empty())
    }
}

/// Fixed token, e.g. one passed on the command line
#[derive(Debug, Clone, Default)]
pub struct StaticTokenSource(Option<String>);

impl StaticTokenSource {
    pub fn new(token: Option<String>) -> Self {
        Self(token)
    }
}

impl TokenSource for StaticTokenSource {
    fn current_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Everything the navigation layer needs for one render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub verdict: AuthorizationVerdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant: Option<AdminGrant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub menu: Vec<FilteredMenuNode>,
}

/// Decodes the session token, resolves admin status and filters the menu.
#[derive(Debug, Clone, Default)]
pub struct SessionAuthorizer {
    resolver: AdminStatusResolver,
    filter: MenuVisibilityFilter,
    reject_expired: bool,
}

impl SessionAuthorizer {
    pub fn new(config: &Config) -> Self {
        Self {
            resolver: AdminStatusResolver::new(&config.policy),
            filter: MenuVisibilityFilter::new(&config.navigation),
            reject_expired: config.session.reject_expired,
        }
    }

    pub fn resolver(&self) -> &AdminStatusResolver {
        &self.resolver
    }

    pub fn menu_filter(&self) -> &MenuVisibilityFilter {
        &self.filter
    }

    /// Decode a token, applying the expiry policy
    pub fn decode_at(&self, token: Option<&str>, now: DateTime<Utc>) -> DecodedClaims {
        let claims = jwt::decode_optional(token)?;
        if self.reject_expired && claims.is_expired_at(now) {
            return Err(DecodeError::Expired);
        }
        Ok(claims)
    }

    pub fn evaluate(&self, source: &dyn TokenSource, menu: &[MenuNode]) -> SessionView {
        let token = source.current_token();
        self.evaluate_token(token.as_deref(), menu)
    }

    pub fn evaluate_token(&self, token: Option<&str>, menu: &[MenuNode]) -> SessionView {
        self.evaluate_token_at(token, menu, Utc::now())
    }

    pub fn evaluate_token_at(
        &self,
        token: Option<&str>,
        menu: &[MenuNode],
        now: DateTime<Utc>,
    ) -> SessionView {
        let claims = self.decode_at(token, now);
        self.evaluate_claims(&claims, menu)
    }

    pub fn evaluate_claims(&self, claims: &DecodedClaims, menu: &[MenuNode]) -> SessionView {
        match claims {
            Err(DecodeError::MissingToken) => {
                tracing::debug!("no session token, evaluating as anonymous");
            }
            Err(e) => {
                tracing::warn!(error = %e, "session token unusable, evaluating as anonymous");
            }
            Ok(_) => {}
        }

        let grant = self.resolver.explain(claims);
        let verdict = AuthorizationVerdict {
            is_admin: grant.is_some(),
        };
        let visible = self.filter.filter(menu, claims, verdict.is_admin);

        let record = claims.as_ref().ok();
        tracing::debug!(
            is_admin = verdict.is_admin,
            grant = ?grant,
            visible_top_level = visible.len(),
            "session evaluated"
        );

        SessionView {
            verdict,
            grant,
            subject: record.and_then(|c| c.subject()).map(String::from),
            display_name: record.and_then(|c| c.display_name()).map(String::from),
            menu: visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::Duration;
    use serde_json::json;

    fn token(payload: serde_json::Value) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#),
            URL_SAFE_NO_PAD.encode(payload.to_string())
        )
    }

    fn menu() -> Vec<MenuNode> {
        vec![
            MenuNode::link("Dashboard", "/"),
            MenuNode::link("Users", "/users").requires(["Users:View"]),
            MenuNode::link("Admin Panel", "/admin"),
        ]
    }

    #[test]
    fn test_evaluate_uses_token_source() {
        let mut source = MockTokenSource::new();
        source
            .expect_current_token()
            .times(1)
            .returning(|| Some(token(json!({ "sub": "7", "role": "SuperAdmin" }))));

        let view = SessionAuthorizer::default().evaluate(&source, &menu());

        assert!(view.verdict.is_admin);
        assert_eq!(view.grant, Some(AdminGrant::ElevatedRole));
        assert_eq!(view.subject.as_deref(), Some("7"));
        let labels: Vec<_> = view.menu.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Dashboard", "Admin Panel"]);
    }

    #[test]
    fn test_evaluate_without_token_is_anonymous() {
        let mut source = MockTokenSource::new();
        source.expect_current_token().returning(|| None);

        let view = SessionAuthorizer::default().evaluate(&source, &menu());

        assert!(!view.verdict.is_admin);
        assert_eq!(view.grant, None);
        assert_eq!(view.subject, None);
        assert_eq!(view.menu.len(), 1);
        assert_eq!(view.menu[0].label, "Dashboard");
    }

    #[test]
    fn test_evaluate_garbage_token_fails_closed() {
        let view = SessionAuthorizer::default().evaluate_token(Some("garbage"), &menu());
        assert!(!view.verdict.is_admin);
        assert_eq!(view.menu.len(), 1);
    }

    #[test]
    fn test_expired_token_accepted_by_default() {
        let now = Utc::now();
        let expired = token(json!({
            "role": "Admin",
            "exp": (now - Duration::hours(1)).timestamp()
        }));

        let view = SessionAuthorizer::default().evaluate_token_at(Some(&expired), &menu(), now);
        assert!(view.verdict.is_admin);
    }

    #[test]
    fn test_expired_token_rejected_when_configured() {
        let mut config = Config::default();
        config.session.reject_expired = true;
        let authorizer = SessionAuthorizer::new(&config);
        let now = Utc::now();

        let expired = token(json!({
            "role": "Admin",
            "exp": (now - Duration::hours(1)).timestamp()
        }));
        assert!(matches!(
            authorizer.decode_at(Some(&expired), now),
            Err(DecodeError::Expired)
        ));
        let view = authorizer.evaluate_token_at(Some(&expired), &menu(), now);
        assert!(!view.verdict.is_admin);

        let fresh = token(json!({
            "role": "Admin",
            "exp": (now + Duration::hours(1)).timestamp()
        }));
        assert!(authorizer.evaluate_token_at(Some(&fresh), &menu(), now).verdict.is_admin);
    }

    #[test]
    fn test_static_token_source() {
        let source = StaticTokenSource::new(Some("abc".to_string()));
        assert_eq!(source.current_token().as_deref(), Some("abc"));
        assert_eq!(StaticTokenSource::default().current_token(), None);
    }

    #[test]
    fn test_env_token_source_missing_var() {
        let source = EnvTokenSource::new("NAVGUARD_TEST_TOKEN_THAT_IS_NEVER_SET");
        assert_eq!(source.current_token(), None);
    }

    #[test]
    fn test_session_view_serialization() {
        let session = token(json!({ "name": "Deniz", "Permission": ["Users:View"] }));
        let view = SessionAuthorizer::default().evaluate_token(Some(&session), &menu());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["verdict"]["is_admin"], false);
        assert_eq!(json["display_name"], "Deniz");
        assert!(json.get("grant").is_none());
        assert_eq!(json["menu"][1]["label"], "Users");
    }
}
