//! Password-gate login. One shared secret, one persisted boolean flag; this
//! is a door for the UI shell, not per-record access control.

use crate::store::{RecordStore, AUTH_FLAG};
use sha2::{Digest, Sha256};

const DEMO_SECRET: &str = "admin123";
pub const SECRET_DIGEST_ENV: &str = "ROSTERD_SECRET_SHA256";

fn hex_digest(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

fn expected_digest() -> String {
    match std::env::var(SECRET_DIGEST_ENV) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_ascii_lowercase(),
        _ => hex_digest(DEMO_SECRET),
    }
}

/// Compares the supplied secret against the configured digest and persists
/// the auth flag on success. A wrong secret is a `false`, not an error.
pub fn login(store: &dyn RecordStore, secret: &str) -> anyhow::Result<bool> {
    if hex_digest(secret) != expected_digest() {
        return Ok(false);
    }
    store.flag_set(AUTH_FLAG, "true")?;
    Ok(true)
}

/// The gate fails closed: an unreadable flag reads as "not logged in".
pub fn is_authenticated(store: &dyn RecordStore) -> bool {
    matches!(store.flag_get(AUTH_FLAG), Ok(Some(value)) if value == "true")
}

pub fn logout(store: &dyn RecordStore) -> anyhow::Result<()> {
    store.flag_clear(AUTH_FLAG)
}
