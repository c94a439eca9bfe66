use dotenvy::dotenv;

use activity_directory::config::AppConfig;
use activity_directory::database::{self, SqliteActivityStore};
use activity_directory::logging;
use activity_directory::services::seed_service;

#[tokio::main]
async fn main() {
    dotenv().ok();
    logging::init();

    let config = AppConfig::from_env();
    let pool = match database::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("seed failed: cannot open {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };
    let store = SqliteActivityStore::new(pool);

    match seed_service::reseed(&store).await {
        Ok(report) => {
            println!(
                "seed complete: {} activities inserted ({} removed)",
                report.inserted, report.deleted
            );
            for name in &report.names {
                println!("- {}", name);
            }
        }
        Err(e) => {
            eprintln!("seed failed: {}", e);
            std::process::exit(1);
        }
    }
}
