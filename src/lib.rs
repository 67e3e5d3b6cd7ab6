pub mod category;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod models;
pub mod payment;
pub mod routes;
pub mod state;
pub mod user;
pub mod validation;

pub use category::{Category, CategoryCatalog};
pub use config::Config;
pub use db::{init_pool, run_migrations};
pub use error::{AppError, ConfigError, ValidationError};
pub use filter::{filter_and_sort, FilterParams, PriceRange, SortOption};
pub use models::Event;
pub use routes::create_router;
pub use state::AppState;
