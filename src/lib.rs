//! Core services for an AI-assisted study companion: task and note
//! collections mirrored to a durable local store, and four feature panels
//! (tasks, notes, previous-year-question analysis, doubt resolution) whose
//! smart features forward formatted prompts to a remote generative-language
//! endpoint.

pub mod ai;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod panels;
pub mod store;

pub use app::App;
pub use config::AppConfig;
pub use error::AppError;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a global tracing subscriber honoring `RUST_LOG`. A no-op when a
/// subscriber is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "studyscribe=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
