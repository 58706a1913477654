//! Passports: signed access/refresh token pairs with single-use rotation.
//!
//! Sign-in verifies an Argon2 credential and issues an access token and a
//! refresh token, each signed with its own secret. The refresh token is bound
//! to a persisted [`Oauth`] record, one per user. Refreshing spends that token:
//! the record is swapped to a newly minted refresh token that keeps the
//! original absolute expiry, so rotation never extends a login.
//!
//! ## Tokens
//!
//! - [`Crypto`] — JWT issue, parse, and expiry-preserving reissue
//! - [`Claims`] — JWT payload structure
//! - [`Kind`] — Access or refresh
//!
//! ## Identity
//!
//! - [`Member`] — Registered user profile
//! - [`Oauth`] — Persisted refresh-token record
//! - [`password`] — Argon2 hashing and verification
//!
//! ## Orchestration
//!
//! - [`Passports`] — Sign-up, sign-in, and refresh
//! - [`Members`], [`Sessions`] — Store contracts, with [`Memory`] in-process
mod claims;
mod crypto;
mod dto;
mod error;
mod member;
mod memory;
mod oauth;
pub mod password;
mod service;
mod store;

pub use claims::*;
pub use crypto::*;
pub use dto::*;
pub use error::*;
pub use member::*;
pub use memory::*;
pub use oauth::*;
pub use service::*;
pub use store::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
