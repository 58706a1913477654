use pp_core::ID;
use pp_core::Role;
use pp_core::Unique;

/// Registered user profile. The password hash never lives on this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Member {
    id: ID<Self>,
    email: String,
    username: String,
    #[serde(rename = "role_id")]
    role: Role,
}

impl Member {
    pub fn new(id: ID<Self>, email: String, username: String, role: Role) -> Self {
        Self {
            id,
            email,
            username,
            role,
        }
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn role(&self) -> Role {
        self.role
    }
}

impl Unique for Member {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use pp_database::*;

    /// Schema implementation for Member (users table).
    /// Note: hashword is a database-only field, not part of Member domain type.
    impl Schema for Member {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id          UUID PRIMARY KEY,
                    email       VARCHAR(255) UNIQUE NOT NULL,
                    username    VARCHAR(32) UNIQUE NOT NULL,
                    hashword    TEXT NOT NULL,
                    role_id     INTEGER NOT NULL DEFAULT 1
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_email ON ",
                USERS,
                " (email);"
            )
        }
    }
}
