pub mod config;
pub mod db;
pub mod error;
pub mod mailer;
pub mod markdown;
pub mod middleware;
pub mod policy;
pub mod routes;
pub mod services;
pub mod validation;

use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::mailer::MailQueue;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub mailer: Arc<dyn MailQueue>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Store, mailer: Arc<dyn MailQueue>, config: Config) -> Self {
        Self {
            store,
            mailer,
            config: Arc::new(config),
        }
    }
}

pub fn init_tracing(config: &Config) {
    let level_filter = match config.log_level.as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    };

    unsafe {
        std::env::set_var("RUST_LOG", level_filter);
    }

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt().json().init();
        }
        _ => {
            tracing_subscriber::fmt().init();
        }
    }
}
