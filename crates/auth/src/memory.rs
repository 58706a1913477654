use super::*;
use pp_core::ID;
use pp_core::Unique;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process store for users and refresh-token records.
/// Records are keyed by owner, which keeps one session per user.
#[derive(Default)]
pub struct Memory {
    users: RwLock<HashMap<ID<Member>, (Member, String)>>,
    oauth: RwLock<HashMap<ID<Member>, Oauth>>,
}

impl Memory {
    /// Number of live refresh-token records.
    pub async fn sessions(&self) -> usize {
        self.oauth.read().await.len()
    }
}

#[async_trait::async_trait]
impl Members for Memory {
    async fn lookup(&self, email: &str) -> Result<Option<(Member, String)>, AuthError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|(member, _)| member.email() == email)
            .cloned())
    }

    async fn profile(&self, user: ID<Member>) -> Result<Option<Member>, AuthError> {
        Ok(self
            .users
            .read()
            .await
            .get(&user)
            .map(|(member, _)| member.clone()))
    }

    async fn create(&self, member: &Member, hashword: &str) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        if users.values().any(|(m, _)| m.email() == member.email()) {
            return Err(AuthError::EmailTaken);
        }
        if users.values().any(|(m, _)| m.username() == member.username()) {
            return Err(AuthError::UsernameTaken);
        }
        users.insert(member.id(), (member.clone(), hashword.to_string()));
        Ok(())
    }
}

#[async_trait::async_trait]
impl Sessions for Memory {
    async fn signin(&self, user: ID<Member>, token: &str) -> Result<ID<Oauth>, AuthError> {
        let oauth = Oauth::new(ID::default(), user, Crypto::digest(token));
        let id = oauth.id();
        self.oauth.write().await.insert(user, oauth);
        Ok(id)
    }

    async fn find(&self, token: &str) -> Result<Option<Oauth>, AuthError> {
        let ref hash = Crypto::digest(token);
        Ok(self
            .oauth
            .read()
            .await
            .values()
            .find(|oauth| oauth.holds(hash))
            .cloned())
    }

    async fn rotate(&self, id: ID<Oauth>, current: &str, next: &str) -> Result<bool, AuthError> {
        let ref hash = Crypto::digest(current);
        let mut records = self.oauth.write().await;
        match records
            .values_mut()
            .find(|oauth| oauth.id() == id && oauth.holds(hash))
        {
            Some(oauth) => {
                *oauth = Oauth::new(id, oauth.user(), Crypto::digest(next));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
impl Memory {
    pub(crate) async fn remove(&self, user: ID<Member>) {
        self.users.write().await.remove(&user);
    }
    pub(crate) async fn assign(&self, user: ID<Member>, role: pp_core::Role) {
        if let Some((member, _)) = self.users.write().await.get_mut(&user) {
            *member = Member::new(
                member.id(),
                member.email().to_string(),
                member.username().to_string(),
                role,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(email: &str, username: &str) -> Member {
        Member::new(ID::default(), email.to_string(), username.to_string(), 1)
    }

    #[tokio::test]
    async fn rejects_duplicate_accounts() {
        let store = Memory::default();
        store.create(&member("a@x.io", "a"), "h").await.unwrap();
        assert!(matches!(
            store.create(&member("a@x.io", "b"), "h").await,
            Err(AuthError::EmailTaken)
        ));
        assert!(matches!(
            store.create(&member("b@x.io", "a"), "h").await,
            Err(AuthError::UsernameTaken)
        ));
        assert!(store.lookup("a@x.io").await.unwrap().is_some());
        assert!(store.lookup("b@x.io").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn signin_replaces_previous_record() {
        let store = Memory::default();
        let user = ID::default();
        let first = store.signin(user, "one").await.unwrap();
        let second = store.signin(user, "two").await.unwrap();
        assert_ne!(first, second);
        assert_eq!(store.sessions().await, 1);
        assert!(store.find("one").await.unwrap().is_none());
        let oauth = store.find("two").await.unwrap().unwrap();
        assert_eq!(oauth.id(), second);
        assert_eq!(oauth.user(), user);
    }

    #[tokio::test]
    async fn rotate_is_compare_and_set() {
        let store = Memory::default();
        let id = store.signin(ID::default(), "one").await.unwrap();
        assert!(store.rotate(id, "one", "two").await.unwrap());
        assert!(!store.rotate(id, "one", "three").await.unwrap());
        assert!(store.find("one").await.unwrap().is_none());
        assert_eq!(store.find("two").await.unwrap().unwrap().id(), id);
        assert!(!store.rotate(ID::default(), "two", "four").await.unwrap());
    }
}
