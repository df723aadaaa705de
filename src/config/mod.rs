//! Configuration modules, each loaded from environment variables.
//!
//! - [`cors`]: allowed origins for the CORS layer
//! - [`database`]: PostgreSQL connection pool
//! - [`email`]: SMTP settings and sender identity
//! - [`jwt`]: signing secret and token lifetimes
//! - [`otp`]: password reset code validity window
//! - [`verification`]: activation link validity window

pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
pub mod otp;
pub mod verification;
