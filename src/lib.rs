pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod stores;

pub use config::Config;
pub use routes::create_router;
pub use state::AppState;
