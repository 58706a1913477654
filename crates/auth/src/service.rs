use super::*;
use pp_core::ID;
use pp_core::Unique;

/// Issues passports on sign-in and rotates them on refresh.
///
/// Every operation validates fully before it writes, and writes at most once,
/// so a failed call leaves the store untouched.
pub struct Passports<S> {
    crypto: Crypto,
    store: S,
}

impl<S> Passports<S>
where
    S: Members + Sessions,
{
    pub fn new(crypto: Crypto, store: S) -> Self {
        Self { crypto, store }
    }
    pub fn crypto(&self) -> &Crypto {
        &self.crypto
    }
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a customer account. Does not sign the new user in.
    pub async fn signup(&self, req: &SignUp) -> Result<Member, AuthError> {
        let hashword = password::hash(&req.password)?;
        let member = Member::new(
            ID::default(),
            req.email.clone(),
            req.username.clone(),
            pp_core::ROLE_CUSTOMER,
        );
        self.store.create(&member, &hashword).await?;
        log::info!("registered user {}", member.id());
        Ok(member)
    }

    pub async fn signin(&self, req: &Credential) -> Result<Passport, AuthError> {
        let (member, hashword) = self
            .store
            .lookup(&req.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if !password::verify(&req.password, &hashword) {
            log::debug!("password mismatch for user {}", member.id());
            return Err(AuthError::InvalidCredential);
        }
        let access = self
            .crypto
            .issue(Kind::Access, member.id(), member.role())?;
        let refresh = self
            .crypto
            .issue(Kind::Refresh, member.id(), member.role())?;
        let id = self.store.signin(member.id(), &refresh).await?;
        log::info!("user {} signed in with session {}", member.id(), id);
        Ok(Passport {
            user: member,
            token: Tokens {
                id,
                access_token: access,
                refresh_token: refresh,
            },
        })
    }

    /// Spends `token` for a new pair. The new refresh token inherits the
    /// presented one's expiry, and the access token carries the current role.
    pub async fn refresh(&self, token: &str) -> Result<Passport, AuthError> {
        let claims = self
            .crypto
            .parse(Kind::Refresh, token)
            .inspect_err(|e| log::debug!("rejected refresh token: {}", e))?;
        let oauth = self
            .store
            .find(token)
            .await?
            .ok_or(AuthError::SessionNotFound)
            .inspect_err(|_| log::warn!("refresh token for user {} is not live", claims.user()))?;
        let member = self
            .store
            .profile(oauth.user())
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let access = self
            .crypto
            .issue(Kind::Access, member.id(), member.role())?;
        let refresh = self
            .crypto
            .reissue(member.id(), member.role(), claims.expires_at())?;
        if !self.store.rotate(oauth.id(), token, &refresh).await? {
            log::warn!("session {} rotated concurrently", oauth.id());
            return Err(AuthError::SessionNotFound);
        }
        log::info!("rotated session {} for user {}", oauth.id(), member.id());
        Ok(Passport {
            user: member,
            token: Tokens {
                id: oauth.id(),
                access_token: access,
                refresh_token: refresh,
            },
        })
    }
}
