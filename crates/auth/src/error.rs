/// Failures of the token codec.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("token keys misconfigured: {0}")]
    Config(&'static str),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match e.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed,
        }
    }
}

/// Failures of sign-up, sign-in, and passport refresh.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("session not found")]
    SessionNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("password is invalid")]
    InvalidCredential,
    #[error("email has been used")]
    EmailTaken,
    #[error("username has been used")]
    UsernameTaken,
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("store failure: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AuthError {
    pub fn store<E>(e: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(e))
    }
    /// Local faults (keys, hashing, persistence) as opposed to bad client input.
    pub fn is_internal(&self) -> bool {
        match self {
            Self::Token(TokenError::Signing(_)) => true,
            Self::Token(TokenError::Config(_)) => true,
            Self::Hashing(_) => true,
            Self::Store(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_faults_are_distinct_from_client_faults() {
        assert!(AuthError::from(TokenError::Config("empty secret")).is_internal());
        assert!(AuthError::Hashing(String::from("salt")).is_internal());
        assert!(AuthError::store(std::io::Error::other("down")).is_internal());
        assert!(!AuthError::from(TokenError::Expired).is_internal());
        assert!(!AuthError::from(TokenError::Malformed).is_internal());
        assert!(!AuthError::SessionNotFound.is_internal());
        assert!(!AuthError::InvalidCredential.is_internal());
        assert!(!AuthError::EmailTaken.is_internal());
    }

    #[test]
    fn token_errors_display_through() {
        let e = AuthError::from(TokenError::InvalidSignature);
        assert_eq!(e.to_string(), "token signature is invalid");
    }
}
