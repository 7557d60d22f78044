use actix_web::{App, HttpServer};
use claims_session::{secret_store, SecurityConfig};
use tracing::{info, warn};

mod routes;
mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("SESSION_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("SESSION_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ SESSION_PORT must be a valid port number");
            std::process::exit(1);
        });

    let security_config = match SecurityConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    if security_config.uses_default_key() {
        warn!("Signing tokens with the built-in default key");
    }
    secret_store::init(security_config);

    info!(%host, port, "Starting session demo");

    HttpServer::new(|| App::new().configure(routes::configure))
        .bind((host.as_str(), port))?
        .run()
        .await
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    session_test_support::test_logging::init();
}
