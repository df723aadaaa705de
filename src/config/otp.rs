use std::env;

#[derive(Clone, Debug)]
pub struct OtpConfig {
    /// Seconds an issued code stays valid. An age of exactly `ttl_secs`
    /// is still accepted.
    pub ttl_secs: i64,
}

impl OtpConfig {
    pub fn from_env() -> Self {
        Self {
            ttl_secs: env::var("OTP_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600), // 10 minutes
        }
    }
}
