use super::*;
use pp_core::Epoch;
use pp_core::ID;
use pp_core::Role;

/// Which of the two token families a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Access,
    Refresh,
}

/// JWT payload. `jti` keeps two tokens minted in the same second distinct.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub rol: Role,
    pub knd: Kind,
    pub jti: uuid::Uuid,
    pub iat: Epoch,
    pub exp: Epoch,
}

impl Claims {
    pub fn new(kind: Kind, user: ID<Member>, role: Role, exp: Epoch) -> Self {
        Self {
            sub: user.inner(),
            rol: role,
            knd: kind,
            jti: uuid::Uuid::now_v7(),
            iat: pp_core::now(),
            exp,
        }
    }
    /// Claims issued now and valid for `ttl`.
    pub fn lasting(kind: Kind, user: ID<Member>, role: Role, ttl: std::time::Duration) -> Self {
        let mut claims = Self::new(kind, user, role, 0);
        let ttl = Epoch::try_from(ttl.as_secs()).unwrap_or(Epoch::MAX);
        claims.exp = claims.iat.saturating_add(ttl);
        claims
    }
    pub fn expired(&self) -> bool {
        self.exp <= pp_core::now()
    }
    pub fn user(&self) -> ID<Member> {
        ID::from(self.sub)
    }
    pub fn role(&self) -> Role {
        self.rol
    }
    pub fn kind(&self) -> Kind {
        self.knd
    }
    pub fn expires_at(&self) -> Epoch {
        self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_inclusive_of_now() {
        let user = ID::default();
        assert!(Claims::new(Kind::Access, user, 1, pp_core::now() - 1).expired());
        assert!(Claims::new(Kind::Access, user, 1, pp_core::now()).expired());
        assert!(!Claims::new(Kind::Access, user, 1, pp_core::now() + 60).expired());
    }

    #[test]
    fn huge_lifetimes_saturate() {
        let claims = Claims::lasting(
            Kind::Refresh,
            ID::default(),
            1,
            std::time::Duration::from_secs(u64::MAX),
        );
        assert_eq!(claims.exp, Epoch::MAX);
        assert!(!claims.expired());
        let claims = Claims::lasting(
            Kind::Access,
            ID::default(),
            1,
            std::time::Duration::from_secs(60),
        );
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let claims = Claims::new(Kind::Refresh, ID::default(), 2, pp_core::now() + 60);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["knd"], "refresh");
        assert_eq!(json["rol"], 2);
    }
}
