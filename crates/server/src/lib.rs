//! Passport HTTP Server
//!
//! Mounts the user routes of [`pp_auth`] on an actix-web server backed by
//! PostgreSQL.
//!
//! ## Routes
//!
//! - `GET  /health` — database liveness
//! - `POST /users/signup` — register a customer
//! - `POST /users/signin` — exchange credentials for a passport
//! - `POST /users/refresh` — rotate a refresh token into a new passport
//! - `GET  /users/me` — identity behind a bearer access token

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

type Store = Arc<Client>;

async fn health(client: web::Data<Store>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

#[rustfmt::skip]
pub async fn run() -> anyhow::Result<()> {
    let crypto = pp_auth::Crypto::from_env()?;
    let client = pp_database::db().await?;
    pp_auth::migrate(&client).await?;
    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| String::from("0.0.0.0:8888"));
    let passports = web::Data::new(pp_auth::Passports::new(crypto.clone(), client.clone()));
    let crypto = web::Data::new(crypto);
    let client = web::Data::new(client);
    log::info!("starting passport server on {}", bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(passports.clone())
            .app_data(crypto.clone())
            .app_data(client.clone())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/users")
                    .route("/signup",  web::post().to(pp_auth::signup::<Store>))
                    .route("/signin",  web::post().to(pp_auth::signin::<Store>))
                    .route("/refresh", web::post().to(pp_auth::refresh::<Store>))
                    .route("/me",      web::get().to(pp_auth::me)),
            )
    })
    .workers(6)
    .bind(bind)?
    .run()
    .await?;
    Ok(())
}
