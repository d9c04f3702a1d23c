pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::Recommender;
