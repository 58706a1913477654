use super::*;
use pp_core::ID;
use pp_core::Unique;

/// Persisted binding of a user to their one live refresh token.
/// Holds the token's digest, never the token itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oauth {
    id: ID<Self>,
    user: ID<Member>,
    hash: Vec<u8>,
}

impl Unique for Oauth {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl Oauth {
    pub fn new(id: ID<Self>, user: ID<Member>, hash: Vec<u8>) -> Self {
        Self { id, user, hash }
    }
    pub fn user(&self) -> ID<Member> {
        self.user
    }
    /// True if this record holds the token whose digest is `hash`.
    pub fn holds(&self, hash: &[u8]) -> bool {
        self.hash == hash
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use pp_database::*;

    impl Schema for Oauth {
        fn name() -> &'static str {
            OAUTH
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                OAUTH,
                " (
                    id          UUID PRIMARY KEY,
                    user_id     UUID UNIQUE NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    token_hash  BYTEA NOT NULL,
                    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_oauth_token ON ",
                OAUTH,
                " (token_hash);"
            )
        }
    }
}
