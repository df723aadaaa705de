//! Email verification tokens.
//!
//! Tokens are not persisted. A token is a keyed, time-windowed hash over the
//! user's identity and a mutable state fingerprint (password hash + active
//! flag). Activating the account changes the fingerprint, so a consumed link
//! can never verify again.
//!
//! Format: `<timestamp-hex>-<sha256-hex>`.

use chrono::Utc;
use data_encoding::BASE64URL_NOPAD;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Encodes a user id into the opaque uid segment of the verification link.
pub fn encode_uid(user_id: Uuid) -> String {
    BASE64URL_NOPAD.encode(user_id.to_string().as_bytes())
}

/// Decodes the uid segment back into a user id.
pub fn decode_uid(uid: &str) -> Result<Uuid, AppError> {
    let bytes = BASE64URL_NOPAD
        .decode(uid.as_bytes())
        .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid activation link")))?;
    let s = String::from_utf8(bytes)
        .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid activation link")))?;
    Uuid::parse_str(&s).map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid activation link")))
}

pub fn make_verification_token(
    user_id: Uuid,
    password_hash: &str,
    is_active: bool,
    secret: &str,
) -> String {
    make_token_at(
        user_id,
        password_hash,
        is_active,
        secret,
        Utc::now().timestamp(),
    )
}

pub fn check_verification_token(
    token: &str,
    user_id: Uuid,
    password_hash: &str,
    is_active: bool,
    secret: &str,
    ttl_secs: i64,
) -> bool {
    check_token_at(
        token,
        user_id,
        password_hash,
        is_active,
        secret,
        ttl_secs,
        Utc::now().timestamp(),
    )
}

fn make_token_at(
    user_id: Uuid,
    password_hash: &str,
    is_active: bool,
    secret: &str,
    ts: i64,
) -> String {
    format!(
        "{:x}-{}",
        ts,
        state_digest(user_id, password_hash, is_active, secret, ts)
    )
}

fn check_token_at(
    token: &str,
    user_id: Uuid,
    password_hash: &str,
    is_active: bool,
    secret: &str,
    ttl_secs: i64,
    now: i64,
) -> bool {
    let Some((ts_part, digest_part)) = token.split_once('-') else {
        return false;
    };
    let Ok(ts) = i64::from_str_radix(ts_part, 16) else {
        return false;
    };
    if ts > now || now - ts > ttl_secs {
        return false;
    }
    let expected = state_digest(user_id, password_hash, is_active, secret, ts);
    constant_time_eq(digest_part.as_bytes(), expected.as_bytes())
}

fn state_digest(user_id: Uuid, password_hash: &str, is_active: bool, secret: &str, ts: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b":");
    hasher.update(user_id.as_bytes());
    hasher.update(b":");
    hasher.update(password_hash.as_bytes());
    hasher.update(b":");
    hasher.update(if is_active { b"1" } else { b"0" });
    hasher.update(b":");
    hasher.update(ts.to_be_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
