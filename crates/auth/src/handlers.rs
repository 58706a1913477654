use super::*;
use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::web;

const SIGNUP: &str = "users-001";
const SIGNIN: &str = "users-002";
const REFRESH: &str = "users-003";

fn reject(code: &str, e: AuthError) -> HttpResponse {
    let status = match e {
        ref e if e.is_internal() => StatusCode::INTERNAL_SERVER_ERROR,
        AuthError::EmailTaken | AuthError::UsernameTaken => StatusCode::CONFLICT,
        _ => StatusCode::UNAUTHORIZED,
    };
    let message = if e.is_internal() {
        log::error!("{} failed: {}", code, e);
        String::from("internal error")
    } else {
        e.to_string()
    };
    HttpResponse::build(status).json(ErrorResponse {
        code: code.to_string(),
        message,
    })
}

pub async fn signup<S>(service: web::Data<Passports<S>>, req: web::Json<SignUp>) -> HttpResponse
where
    S: Members + Sessions + 'static,
{
    if let Err(message) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            code: SIGNUP.to_string(),
            message: message.to_string(),
        });
    }
    match service.signup(&req).await {
        Ok(member) => HttpResponse::Created().json(member),
        Err(e) => reject(SIGNUP, e),
    }
}

pub async fn signin<S>(service: web::Data<Passports<S>>, req: web::Json<Credential>) -> HttpResponse
where
    S: Members + Sessions + 'static,
{
    match service.signin(&req).await {
        Ok(passport) => HttpResponse::Ok().json(passport),
        Err(e) => reject(SIGNIN, e),
    }
}

pub async fn refresh<S>(
    service: web::Data<Passports<S>>,
    req: web::Json<RefreshCredential>,
) -> HttpResponse
where
    S: Members + Sessions + 'static,
{
    match service.refresh(&req.refresh_token).await {
        Ok(passport) => HttpResponse::Ok().json(passport),
        Err(e) => reject(REFRESH, e),
    }
}

pub async fn me(auth: Auth) -> HttpResponse {
    HttpResponse::Ok().json(Identity {
        id: auth.user(),
        role_id: auth.claims().role(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::test;
    use pp_core::Unique;

    fn service() -> Passports<Memory> {
        Passports::new(
            Crypto::new(b"access-secret", b"refresh-secret").unwrap(),
            Memory::default(),
        )
    }

    macro_rules! app {
        ($service:expr) => {{
            let service = web::Data::new($service);
            let crypto = web::Data::new(service.crypto().clone());
            test::init_service(
                App::new()
                    .app_data(service)
                    .app_data(crypto)
                    .route("/users/signup", web::post().to(signup::<Memory>))
                    .route("/users/signin", web::post().to(signin::<Memory>))
                    .route("/users/refresh", web::post().to(refresh::<Memory>))
                    .route("/users/me", web::get().to(me)),
            )
            .await
        }};
    }

    fn body(email: &str, username: &str, password: &str) -> SignUp {
        SignUp {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_web::test]
    async fn signup_signin_refresh_me() {
        let app = app!(service());

        let req = test::TestRequest::post()
            .uri("/users/signup")
            .set_json(body("u1@example.com", "u1", "hunter22"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/users/signin")
            .set_json(Credential {
                email: "u1@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .to_request();
        let first: Passport = test::call_and_read_body_json(&app, req).await;
        assert_eq!(first.user.username(), "u1");

        let req = test::TestRequest::post()
            .uri("/users/refresh")
            .set_json(RefreshCredential {
                refresh_token: first.token.refresh_token.clone(),
            })
            .to_request();
        let second: Passport = test::call_and_read_body_json(&app, req).await;
        assert_eq!(second.token.id, first.token.id);

        let req = test::TestRequest::post()
            .uri("/users/refresh")
            .set_json(RefreshCredential {
                refresh_token: first.token.refresh_token.clone(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let error: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(error.code, REFRESH);
        assert_eq!(error.message, "session not found");

        let req = test::TestRequest::get()
            .uri("/users/me")
            .insert_header(("Authorization", format!("Bearer {}", second.token.access_token)))
            .to_request();
        let identity: Identity = test::call_and_read_body_json(&app, req).await;
        assert_eq!(identity.id, second.user.id());
        assert_eq!(identity.role_id, pp_core::ROLE_CUSTOMER);
    }

    #[actix_web::test]
    async fn signup_rejects_bad_email_and_duplicates() {
        let app = app!(service());

        let req = test::TestRequest::post()
            .uri("/users/signup")
            .set_json(body("not-an-email", "u1", "hunter22"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/users/signup")
                .set_json(body("u1@example.com", "u1", "hunter22"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
        }
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorized() {
        let app = app!(service());
        let req = test::TestRequest::post()
            .uri("/users/signup")
            .set_json(body("u1@example.com", "u1", "hunter22"))
            .to_request();
        test::call_service(&app, req).await;
        let req = test::TestRequest::post()
            .uri("/users/signin")
            .set_json(Credential {
                email: "u1@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let error: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(error.code, SIGNIN);
    }

    #[actix_web::test]
    async fn me_requires_access_token() {
        let app = app!(service());
        let req = test::TestRequest::get().uri("/users/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let refresh = Crypto::new(b"access-secret", b"refresh-secret")
            .unwrap()
            .issue(Kind::Refresh, pp_core::ID::default(), 1)
            .unwrap();
        let req = test::TestRequest::get()
            .uri("/users/me")
            .insert_header(("Authorization", format!("Bearer {}", refresh)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
