use std::env;

#[derive(Clone, Debug)]
pub struct VerificationConfig {
    /// Seconds an emailed activation link stays valid.
    pub token_ttl_secs: i64,
}

impl VerificationConfig {
    pub fn from_env() -> Self {
        Self {
            token_ttl_secs: env::var("VERIFICATION_TOKEN_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(259_200), // 3 days
        }
    }
}
