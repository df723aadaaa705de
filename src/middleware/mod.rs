//! Request middleware and extractors.
//!
//! - [`auth`]: bearer-token authentication ([`auth::AuthUser`])
//! - [`role`]: role gates consulting the central policy table
//!
//! Flow: the client sends `Authorization: Bearer <token>`, `AuthUser`
//! validates the JWT and exposes the claims, and role extractors check the
//! caller's role against [`crate::policy`] before the handler runs.

pub mod auth;
pub mod role;
