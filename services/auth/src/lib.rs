//! Authentication service for the Cross-Stitch Tracker
//!
//! Username/password registration and login backed by server-side sessions.
//! [`credentials::CredentialVerifier`] hashes and checks passwords,
//! [`session::SessionStore`] issues and resolves opaque session tokens, and
//! [`routes`] exposes both over HTTP with the token carried in a cookie.

pub mod config;
pub mod credentials;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod state;
pub mod validation;
