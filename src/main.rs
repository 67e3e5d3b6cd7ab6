use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use eventhub::{
    create_router, db, fixtures, init_pool, run_migrations, AppState, CategoryCatalog, Config,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: DATABASE_URL (default: sqlite://eventhub.db)");
            eprintln!("Optional: LISTEN_ADDR (default: 0.0.0.0:3000)");
            eprintln!("Optional: CATEGORIES_PATH, PAYMENT_DELAY_MS, SEED_FIXTURES");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting EventHub server");
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Database: {}", config.database_url);

    // Connect to database
    let pool = match init_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Database connection error: {}", e);
            std::process::exit(1);
        }
    };

    // Run migrations
    if let Err(e) = run_migrations(&pool).await {
        eprintln!("Migration error: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Database migrations completed");

    if config.seed_fixtures {
        match db::seed_if_empty(&pool, &fixtures::demo_events()).await {
            Ok(0) => tracing::info!("Events table not empty, skipping fixtures"),
            Ok(n) => tracing::info!("Seeded {} demo events", n),
            Err(e) => {
                eprintln!("Seeding error: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Load categories
    let categories = CategoryCatalog::load(config.categories_path.as_deref());
    tracing::info!("Loaded {} categories", categories.len());

    // Create app state
    let state = AppState::new(pool, categories, config.payment_delay);

    // Build router
    let app = create_router(state).layer(CorsLayer::permissive());

    // Start server
    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", config.listen_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server running at http://{}", config.listen_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
