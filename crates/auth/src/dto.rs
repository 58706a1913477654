use super::*;
use pp_core::ID;
use pp_core::Role;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignUp {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl SignUp {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !is_email(&self.email) {
            return Err("email pattern is invalid");
        }
        if self.username.trim().is_empty() || self.username.chars().count() > 32 {
            return Err("username must be 1-32 characters");
        }
        if self.password.is_empty() {
            return Err("password must not be empty");
        }
        Ok(())
    }
}

fn is_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() > 1
                && domain.split('.').all(|part| !part.is_empty())
                && !s.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshCredential {
    pub refresh_token: String,
}

/// Token pair handed back on sign-in and refresh.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tokens {
    pub id: ID<Oauth>,
    pub access_token: String,
    pub refresh_token: String,
}

/// Profile plus a fresh token pair.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Passport {
    pub user: Member,
    pub token: Tokens,
}

/// Identity asserted by a verified access token.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Identity {
    pub id: ID<Member>,
    pub role_id: Role,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, username: &str, password: &str) -> SignUp {
        SignUp {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn email_patterns() {
        assert!(is_email("u1@example.com"));
        assert!(is_email("first.last@mail.example.org"));
        assert!(!is_email("example.com"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("u1@localhost"));
        assert!(!is_email("u1@example..com"));
        assert!(!is_email("u1@a@b.com"));
        assert!(!is_email("u 1@example.com"));
    }

    #[test]
    fn signup_validation() {
        assert!(signup("u1@example.com", "u1", "pw").validate().is_ok());
        assert!(signup("nope", "u1", "pw").validate().is_err());
        assert!(signup("u1@example.com", " ", "pw").validate().is_err());
        assert!(signup("u1@example.com", "u1", "").validate().is_err());
        assert!(signup("u1@example.com", &"é".repeat(32), "pw").validate().is_ok());
        assert!(signup("u1@example.com", &"é".repeat(33), "pw").validate().is_err());
    }

    #[test]
    fn passport_wire_shape() {
        let member = Member::new(ID::default(), "u1@example.com".into(), "u1".into(), 1);
        let passport = Passport {
            user: member,
            token: Tokens {
                id: ID::default(),
                access_token: "a".into(),
                refresh_token: "r".into(),
            },
        };
        let json = serde_json::to_value(&passport).unwrap();
        assert_eq!(json["user"]["email"], "u1@example.com");
        assert_eq!(json["user"]["role_id"], 1);
        assert_eq!(json["token"]["access_token"], "a");
        assert_eq!(json["token"]["refresh_token"], "r");
        assert!(json["token"]["id"].is_string());
    }
}
