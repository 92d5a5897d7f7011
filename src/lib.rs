pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod ui;

pub use api::ApiClient;
pub use app::router;
pub use config::Config;
pub use controller::{Controller, UiState};
pub use errors::ApiError;
pub use state::AppState;
