//! Common test utilities

#![allow(dead_code)]

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use navguard_core::MenuNode;
use serde_json::{json, Value};

const TEST_SECRET: &[u8] = b"test-secret-key-for-testing-purposes-only";

/// Mint an HS256 token carrying `claims` plus standard registered claims.
///
/// The engine never checks the signature, but signed tokens keep the tests
/// close to what the backend actually issues.
pub fn mint_token(claims: Value) -> String {
    let now = Utc::now();
    let mut payload = json!({
        "sub": "550e8400-e29b-41d4-a716-446655440000",
        "iss": "https://backend.test",
        "iat": now.timestamp(),
        "exp": (now + Duration::hours(1)).timestamp(),
    });
    if let (Some(base), Value::Object(extra)) = (payload.as_object_mut(), claims) {
        base.extend(extra);
    }

    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap()
}

/// Menu shaped like the inventory/ticket administration front end
pub fn application_menu() -> Vec<MenuNode> {
    serde_json::from_str(APPLICATION_MENU).unwrap()
}

pub const APPLICATION_MENU: &str = r#"[
    { "label": "Dashboard", "path": "/" },
    {
        "label": "Inventory",
        "children": [
            { "label": "Items", "path": "/inventory", "requiredPermissions": ["Inventory:View"] },
            {
                "label": "New Item",
                "path": "/inventory/new",
                "requiredPermissions": ["Inventory:Create"]
            }
        ]
    },
    {
        "label": "Tickets",
        "path": "/tickets",
        "requiredPermissions": ["Tickets:View"],
        "children": [
            {
                "label": "Assign",
                "path": "/tickets/assign",
                "adminOnly": true,
                "requiredPermissions": ["Tickets:View"]
            }
        ]
    },
    {
        "label": "Management",
        "adminOnly": true,
        "children": [
            { "label": "Users", "path": "/users", "requiredPermissions": ["Users:View"] },
            { "label": "Roles", "path": "/roles", "requiredPermissions": ["Roles:View"] }
        ]
    },
    {
        "label": "Admin Panel",
        "path": "/admin",
        "children": [
            { "label": "Settings", "path": "/admin/settings" }
        ]
    }
]"#;
