//! One-time codes for the password reset flow.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Generates a uniformly random 6-digit code, zero-padded.
pub fn generate_otp_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", code)
}

/// A code created at `created_at` is valid through exactly `ttl_secs` seconds.
///
/// The boundary is pinned to the accepting side: an age of exactly `ttl_secs`
/// still passes.
pub fn otp_is_expired(created_at: DateTime<Utc>, now: DateTime<Utc>, ttl_secs: i64) -> bool {
    (now - created_at).num_seconds() > ttl_secs
}
