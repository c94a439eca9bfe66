use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing::{info, warn};

use activity_directory::config::AppConfig;
use activity_directory::database::{self, SqliteActivityStore};
use activity_directory::logging;
use activity_directory::web::{build_router, AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();

    logging::init();

    let config = AppConfig::from_env();
    info!("Connecting to database: {}", config.database_url);

    let pool = match database::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("cannot open database {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(
        Arc::new(SqliteActivityStore::new(pool)),
        config.signup_rules(),
    );
    let app = build_router(state, &config.static_dir);

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("invalid HOST/PORT {}:{}: {}", config.host, config.port, e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback = SocketAddr::new(addr.ip(), addr.port().saturating_add(1));
            warn!(
                "Could not bind {}: {}. Trying fallback {}",
                addr, e, fallback
            );
            match tokio::net::TcpListener::bind(fallback).await {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("cannot bind fallback {}: {}", fallback, e);
                    std::process::exit(1);
                }
            }
        }
    };

    if let Ok(bound_addr) = listener.local_addr() {
        info!("🚀 Activity directory listening on http://{}", bound_addr);
    }

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("server error: {}", e);
        std::process::exit(1);
    }
}
