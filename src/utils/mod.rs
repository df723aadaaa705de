//! Shared utilities.
//!
//! - [`email`]: SMTP email sending
//! - [`errors`]: application error type and HTTP conversion
//! - [`jwt`]: access/refresh token creation and verification
//! - [`otp`]: one-time code generation and expiry
//! - [`password`]: password hashing and verification
//! - [`verification`]: derived email verification tokens

pub mod email;
pub mod errors;
pub mod jwt;
pub mod otp;
pub mod password;
pub mod verification;
