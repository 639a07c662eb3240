use std::sync::Arc;

use axum::{Router, Server, middleware::from_fn};
use roller_backend::config::Config;
use roller_backend::db::Store;
use roller_backend::db::models::user::NewUser;
use roller_backend::db::repositories::users::UserRepo;
use roller_backend::mailer::{ChannelMailQueue, run_worker};
use roller_backend::{AppState, init_tracing, middleware, routes};
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&config);

    let store = Store::new();
    seed_admin(&store, &config);

    let (mail_queue, mail_rx) = ChannelMailQueue::new();
    tokio::spawn(run_worker(mail_rx));

    let server = config.server();
    let state = Arc::new(AppState::new(store, Arc::new(mail_queue), config));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(
            routes::create_router(state.clone()).layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::actor::actor_middleware,
            )),
        )
        .layer(cors)
        .layer(from_fn(middleware::logger::logger));

    let addr: std::net::SocketAddr = match format!("{}:{}", server.host, server.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Invalid server address: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Server running at http://{}", addr);
    if let Err(e) = Server::bind(&addr).serve(app.into_make_service()).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// First-start bootstrap: an empty store gets one admin so the instance can
/// be administered at all.
fn seed_admin(store: &Store, config: &Config) {
    let mut db = store.write();
    if !db.users.is_empty() {
        return;
    }
    match UserRepo::insert(
        &mut db,
        NewUser {
            name: config.seed_admin_name.clone(),
            email: config.seed_admin_email.clone(),
            employee_type: Some(roller_backend::db::enums::EmployeeType::Admin),
        },
    ) {
        Ok(admin) => tracing::info!(user_id = %admin.id, email = %admin.email, "seeded admin"),
        Err(e) => tracing::error!("failed to seed admin: {}", e),
    }
}
