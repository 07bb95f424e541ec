//! Admin status resolution over realistic session tokens

use navguard_core::{decode, AdminGrant, AdminStatusResolver, DecodeError};
use rstest::rstest;
use serde_json::json;

mod common;

fn resolve_token(token: &str) -> bool {
    AdminStatusResolver::default().resolve(&decode(token))
}

#[test]
fn test_admin_panel_permission_always_grants() {
    let token = common::mint_token(json!({
        "role": "Viewer",
        "roles": ["Clerk"],
        "Permission": ["Tickets:View", "AdminPanel:View"]
    }));
    assert!(resolve_token(&token));
}

#[test]
fn test_elevated_role_without_permission_claim() {
    let token = common::mint_token(json!({ "role": "SuperAdmin" }));
    let claims = decode(&token);

    assert!(claims.as_ref().unwrap().get("Permission").is_none());
    assert_eq!(
        AdminStatusResolver::default().explain(&claims),
        Some(AdminGrant::ElevatedRole)
    );
}

#[rstest]
#[case::array(json!({ "role": ["Depo Sorumlusu", "YÖNETİCİ"] }))]
#[case::string(json!({ "role": "Bölge Yöneticisi" }))]
#[case::legacy_claim(json!({
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": ["Yönetici"]
}))]
fn test_turkish_admin_role_names(#[case] claims: serde_json::Value) {
    assert!(resolve_token(&common::mint_token(claims)));
}

#[test]
fn test_broad_coverage_threshold() {
    let full = common::mint_token(json!({
        "Permission": [
            "Users:Create", "Users:Edit", "Roles:Create", "Roles:Edit", "Inventory:Delete"
        ]
    }));
    assert!(resolve_token(&full));

    let reduced = common::mint_token(json!({
        "Permission": ["Users:Create", "Users:Edit", "Roles:Create", "Roles:Edit"]
    }));
    assert!(!resolve_token(&reduced));
}

#[test]
fn test_blank_role_does_not_fall_through_to_roles() {
    let token = common::mint_token(json!({ "role": "   ", "roles": ["Admin"] }));
    assert!(!resolve_token(&token));
}

#[test]
fn test_viewer_is_not_admin() {
    let token = common::mint_token(json!({
        "role": ["Viewer"],
        "Permission": ["Inventory:View", "Tickets:View"]
    }));
    assert!(!resolve_token(&token));
}

#[rstest]
#[case::empty("")]
#[case::one_segment("eyJhbGciOiJIUzI1NiJ9")]
#[case::bad_payload("eyJhbGciOiJIUzI1NiJ9.%%%.sig")]
#[case::bearer_only("Bearer")]
fn test_undecodable_tokens_are_never_admin(#[case] token: &str) {
    assert!(decode(token).is_err());
    assert!(!resolve_token(token));
}

#[test]
fn test_decode_error_resolves_false() {
    let resolver = AdminStatusResolver::default();
    assert!(!resolver.resolve(&Err(DecodeError::MissingToken)));
    assert!(!resolver.verdict(&Err(DecodeError::Expired)).is_admin);
}

#[test]
fn test_resolution_is_deterministic() {
    let token = common::mint_token(json!({ "roles": "Administrator" }));
    let claims = decode(&token);
    let resolver = AdminStatusResolver::default();

    let first = resolver.explain(&claims);
    let second = resolver.explain(&claims);
    assert_eq!(first, second);
    assert_eq!(first, Some(AdminGrant::RoleName));
}
