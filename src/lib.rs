//! # ReadRally API
//!
//! A REST API built with Rust, Axum, and PostgreSQL for running reading
//! competitions: teachers publish competitions with reading lists, students
//! register, log their daily pages, rate and comment on books, and collect
//! achievements along the way.
//!
//! ## Overview
//!
//! - **Authentication**: JWT-based authentication with access and refresh
//!   tokens; accounts stay inactive until the emailed verification link is
//!   opened
//! - **Password reset**: short-lived single-use OTP codes sent by email
//! - **Role-based access control**: admin, teacher and student roles with a
//!   central authorization table
//! - **Row scoping**: students only ever see their own rows; teachers only
//!   see rows belonging to competitions they created
//!
//! ## Architecture
//!
//! The codebase follows a modular architecture inspired by NestJS:
//!
//! ```text
//! src/
//! ├── cli/              # CLI commands (create-admin)
//! ├── config/           # Configuration modules (JWT, database, SMTP, CORS)
//! ├── middleware/       # Auth middleware and role extractors
//! ├── modules/          # Feature modules
//! │   ├── auth/            # Registration, login, verification, OTP reset
//! │   ├── users/           # User profile
//! │   ├── competitions/    # Competition management and student catalog
//! │   ├── books/           # Reading lists
//! │   ├── registrations/   # Competition registrations and attendance
//! │   ├── comments/        # Student comments and teacher feedback view
//! │   ├── daily_pages/     # Daily reading logs
//! │   ├── ratings/         # Book ratings
//! │   ├── achievements/    # Reader achievements
//! │   └── notifications/   # Notifications and inbox
//! ├── policy.rs         # Central role/action authorization table
//! └── utils/            # Shared utilities (errors, jwt, email, otp, ...)
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers (routes)
//! - `service.rs`: Business logic
//! - `model.rs`: Data models, DTOs, database structs
//! - `router.rs`: Axum router configuration

pub mod cli;
pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod policy;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
