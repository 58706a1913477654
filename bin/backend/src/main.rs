//! Passport Backend Binary
//!
//! Serves sign-up, sign-in, and refresh on BIND_ADDR (e.g. 0.0.0.0:8888).
//! Requires DB_URL, ACCESS_SECRET, and REFRESH_SECRET; ACCESS_TTL and
//! REFRESH_TTL are optional.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pp_core::log()?;
    pp_core::kys();
    pp_server::run().await
}
