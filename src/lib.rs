pub mod app;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod images;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
