use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use amora_match::config::Settings;
use amora_match::error::{handle_json_payload_error, handle_path_error, handle_query_payload_error};
use amora_match::models::ScoringWeights;
use amora_match::routes::{self, profiles::AppState};
use amora_match::services::ProfileStore;
use amora_match::Matcher;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        panic!("Configuration error: {}", e);
    });

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting Amora Match profile service...");
    info!("Configuration loaded successfully");

    // Open the profile store (creates the database file and runs migrations)
    let db_max_conn = settings.database.max_connections.unwrap_or(5);

    let store = Arc::new(
        ProfileStore::connect(&settings.database.url, db_max_conn)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to open profile database: {}", e);
                panic!("Database error: {}", e);
            }),
    );

    info!(
        "Profile store ready at {} (max: {} connections)",
        settings.database.url, db_max_conn
    );

    // Initialize matcher with configured weights
    let weights = ScoringWeights {
        interests: settings.scoring.weights.interests,
        age: settings.scoring.weights.age,
        city: settings.scoring.weights.city,
    };

    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    // Build application state
    let app_state = AppState {
        store,
        matcher,
        pagination: settings.pagination.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
