use super::*;
use pp_core::ID;
use pp_core::Unique;
use pp_database::*;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::error::SqlState;

/// Creates the users and oauth tables if missing.
pub async fn migrate(client: &Client) -> Result<(), PgErr> {
    pp_database::create::<Member>(client).await?;
    pp_database::create::<Oauth>(client).await?;
    Ok(())
}

fn conflict(e: PgErr) -> AuthError {
    match e.as_db_error() {
        Some(db) if db.code() == &SqlState::UNIQUE_VIOLATION => match db.constraint() {
            Some(c) if c.contains("username") => AuthError::UsernameTaken,
            _ => AuthError::EmailTaken,
        },
        _ => AuthError::store(e),
    }
}

#[async_trait::async_trait]
impl Members for Arc<Client> {
    async fn lookup(&self, email: &str) -> Result<Option<(Member, String)>, AuthError> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, email, username, role_id, hashword FROM ",
                USERS,
                " WHERE email = $1"
            ),
            &[&email],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                (
                    Member::new(
                        ID::from(row.get::<_, uuid::Uuid>(0)),
                        row.get::<_, String>(1),
                        row.get::<_, String>(2),
                        row.get::<_, i32>(3),
                    ),
                    row.get::<_, String>(4),
                )
            })
        })
        .map_err(AuthError::store)
    }

    async fn profile(&self, user: ID<Member>) -> Result<Option<Member>, AuthError> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, email, username, role_id FROM ",
                USERS,
                " WHERE id = $1"
            ),
            &[&user.inner()],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                Member::new(
                    ID::from(row.get::<_, uuid::Uuid>(0)),
                    row.get::<_, String>(1),
                    row.get::<_, String>(2),
                    row.get::<_, i32>(3),
                )
            })
        })
        .map_err(AuthError::store)
    }

    async fn create(&self, member: &Member, hashword: &str) -> Result<(), AuthError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (id, email, username, hashword, role_id) VALUES ($1, $2, $3, $4, $5)"
            ),
            &[
                &member.id().inner(),
                &member.email(),
                &member.username(),
                &hashword,
                &member.role(),
            ],
        )
        .await
        .map(|_| ())
        .map_err(conflict)
    }
}

#[async_trait::async_trait]
impl Sessions for Arc<Client> {
    async fn signin(&self, user: ID<Member>, token: &str) -> Result<ID<Oauth>, AuthError> {
        let id = ID::<Oauth>::default();
        self.query_one(
            const_format::concatcp!(
                "INSERT INTO ",
                OAUTH,
                " (id, user_id, token_hash) VALUES ($1, $2, $3)
                 ON CONFLICT (user_id) DO UPDATE
                 SET id = EXCLUDED.id, token_hash = EXCLUDED.token_hash, updated_at = now()
                 RETURNING id"
            ),
            &[&id.inner(), &user.inner(), &Crypto::digest(token)],
        )
        .await
        .map(|row| ID::from(row.get::<_, uuid::Uuid>(0)))
        .map_err(AuthError::store)
    }

    async fn find(&self, token: &str) -> Result<Option<Oauth>, AuthError> {
        let hash = Crypto::digest(token);
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, user_id FROM ",
                OAUTH,
                " WHERE token_hash = $1"
            ),
            &[&hash],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                Oauth::new(
                    ID::from(row.get::<_, uuid::Uuid>(0)),
                    ID::from(row.get::<_, uuid::Uuid>(1)),
                    hash.clone(),
                )
            })
        })
        .map_err(AuthError::store)
    }

    async fn rotate(&self, id: ID<Oauth>, current: &str, next: &str) -> Result<bool, AuthError> {
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                OAUTH,
                " SET token_hash = $3, updated_at = now() WHERE id = $1 AND token_hash = $2"
            ),
            &[&id.inner(), &Crypto::digest(current), &Crypto::digest(next)],
        )
        .await
        .map(|n| n == 1)
        .map_err(AuthError::store)
    }
}
