use super::*;
use anyhow::Context;
use pp_core::Epoch;
use pp_core::ID;
use pp_core::Role;

/// Signing material and lifetime for one token kind.
#[derive(Clone)]
struct Keys {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
    ttl: std::time::Duration,
}

impl Keys {
    fn new(secret: &[u8], ttl: std::time::Duration) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
            ttl,
        }
    }
}

/// JWT codec for access and refresh tokens.
///
/// Each kind is signed with its own secret, so a token of one kind never
/// verifies as the other.
#[derive(Clone)]
pub struct Crypto {
    access: Keys,
    refresh: Keys,
}

impl Crypto {
    pub fn new(access: &[u8], refresh: &[u8]) -> Result<Self, TokenError> {
        if access.is_empty() || refresh.is_empty() {
            return Err(TokenError::Config("secrets must not be empty"));
        }
        if access == refresh {
            return Err(TokenError::Config("access and refresh secrets must differ"));
        }
        Ok(Self {
            access: Keys::new(access, pp_core::ACCESS_TOKEN_DURATION),
            refresh: Keys::new(refresh, pp_core::REFRESH_TOKEN_DURATION),
        })
    }

    /// Reads `ACCESS_SECRET`, `REFRESH_SECRET`, and the optional
    /// `ACCESS_TTL` / `REFRESH_TTL` durations (e.g. "15m", "7d").
    pub fn from_env() -> anyhow::Result<Self> {
        let access = std::env::var("ACCESS_SECRET").context("ACCESS_SECRET must be set")?;
        let refresh = std::env::var("REFRESH_SECRET").context("REFRESH_SECRET must be set")?;
        let mut crypto = Self::new(access.as_bytes(), refresh.as_bytes())?;
        for (kind, var) in [(Kind::Access, "ACCESS_TTL"), (Kind::Refresh, "REFRESH_TTL")] {
            if let Ok(value) = std::env::var(var) {
                let ttl = pp_core::parse_duration(&value)
                    .with_context(|| format!("{} is not a duration: {}", var, value))?;
                crypto = crypto.with_ttl(kind, ttl)?;
            }
        }
        log::info!(
            "token lifetimes: access {}s, refresh {}s",
            crypto.ttl(Kind::Access).as_secs(),
            crypto.ttl(Kind::Refresh).as_secs()
        );
        Ok(crypto)
    }

    pub fn with_ttl(mut self, kind: Kind, ttl: std::time::Duration) -> Result<Self, TokenError> {
        if ttl.as_secs() == 0 {
            return Err(TokenError::Config("token lifetime must be positive"));
        }
        match kind {
            Kind::Access => self.access.ttl = ttl,
            Kind::Refresh => self.refresh.ttl = ttl,
        }
        Ok(self)
    }

    pub fn ttl(&self, kind: Kind) -> std::time::Duration {
        self.keys(kind).ttl
    }

    /// Signs a fresh token expiring one TTL of its kind from now.
    pub fn issue(&self, kind: Kind, user: ID<Member>, role: Role) -> Result<String, TokenError> {
        self.encode(&Claims::lasting(kind, user, role, self.ttl(kind)))
    }

    /// Signs a refresh token that keeps an earlier absolute expiry.
    /// Rotation goes through here so a session can never outlive its first login.
    pub fn reissue(&self, user: ID<Member>, role: Role, exp: Epoch) -> Result<String, TokenError> {
        self.encode(&Claims::new(Kind::Refresh, user, role, exp))
    }

    /// Verifies a token against the secret of the expected kind.
    pub fn parse(&self, kind: Kind, token: &str) -> Result<Claims, TokenError> {
        let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = false;
        let claims = jsonwebtoken::decode::<Claims>(token, &self.keys(kind).decoding, &validation)
            .map(|data| data.claims)?;
        if claims.kind() != kind {
            return Err(TokenError::Malformed);
        }
        if claims.expired() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    /// Digest under which session stores index refresh tokens.
    pub fn digest(token: &str) -> Vec<u8> {
        use sha2::Digest;
        sha2::Sha256::digest(token.as_bytes()).to_vec()
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
            claims,
            &self.keys(claims.kind()).encoding,
        )
        .map_err(TokenError::Signing)
    }

    fn keys(&self, kind: Kind) -> &Keys {
        match kind {
            Kind::Access => &self.access,
            Kind::Refresh => &self.refresh,
        }
    }
}
