//! Caller identity for the trusted-gateway deployment model.
//!
//! The gateway never faces end users directly. It sits behind an identity
//! gateway (reverse proxy, API gateway, ...) that authenticates end users
//! and forwards requests with internal headers:
//!
//! - `x-sibyl-user-id`: the verified user the gateway resolved.
//! - `x-sibyl-gateway-secret`: shared secret proving the request came
//!   from the gateway, not from an end user. Only checked when a secret
//!   is configured.
//!
//! The handler only inspects the [`AuthContext`] produced here; it never
//! constructs one itself. A request with no verified identity yields
//! `None` and is rejected before validation runs.

use axum::http::HeaderMap;

pub const HEADER_USER_ID: &str = "x-sibyl-user-id";
pub const HEADER_GATEWAY_SECRET: &str = "x-sibyl-gateway-secret";

/// Verified caller identity attached by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub uid: String,
}

/// Resolve the caller identity from request headers.
///
/// When `gateway_secret` is configured the secret header must match it
/// (constant-time comparison) before the user id header is trusted.
/// Any missing or invalid element yields `None`.
pub fn authenticate(headers: &HeaderMap, gateway_secret: Option<&str>) -> Option<AuthContext> {
    if let Some(expected) = gateway_secret {
        let provided = header_str(headers, HEADER_GATEWAY_SECRET)?;
        if !constant_time_eq(provided, expected) {
            return None;
        }
    }

    let uid = header_str(headers, HEADER_USER_ID)?;
    if uid.is_empty() {
        return None;
    }

    Some(AuthContext {
        uid: uid.to_string(),
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut acc = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        acc |= x ^ y;
    }
    acc == 0
}
