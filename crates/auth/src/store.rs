use super::*;
use pp_core::ID;

/// User accounts: credential lookup, profiles, registration.
#[async_trait::async_trait]
pub trait Members: Send + Sync {
    /// Profile and password hash for the account registered under `email`.
    async fn lookup(&self, email: &str) -> Result<Option<(Member, String)>, AuthError>;
    /// Current profile, reflecting any role change since login.
    async fn profile(&self, user: ID<Member>) -> Result<Option<Member>, AuthError>;
    /// Fails with `EmailTaken` or `UsernameTaken` on duplicates.
    async fn create(&self, member: &Member, hashword: &str) -> Result<(), AuthError>;
}

/// Refresh-token records, at most one per user.
///
/// Implementations must make `rotate` atomic with respect to concurrent
/// calls on the same record so that a refresh token is spent at most once.
#[async_trait::async_trait]
pub trait Sessions: Send + Sync {
    /// Binds `user` to `token`, replacing any record the user already had.
    async fn signin(&self, user: ID<Member>, token: &str) -> Result<ID<Oauth>, AuthError>;
    /// Record currently holding `token`, if any.
    async fn find(&self, token: &str) -> Result<Option<Oauth>, AuthError>;
    /// Swaps `current` for `next` on record `id`. False if `current` is no longer held.
    async fn rotate(&self, id: ID<Oauth>, current: &str, next: &str) -> Result<bool, AuthError>;
}
