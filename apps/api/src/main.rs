mod ai;
mod auth;
mod cli;
mod companies;
mod config;
mod dashboard;
mod db;
mod errors;
mod interviews;
mod llm_client;
mod models;
mod prep;
mod routes;
mod seed;
mod settings;
mod state;
mod storage;
mod timezone;
mod validation;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::timezone::{cache::RedisTimezoneCache, geoip::HttpTimezoneLocator};

#[tokio::main]
async fn main() -> Result<()> {
    match Cli::parse().command.unwrap_or(Command::Serve) {
        Command::Token { user, email, hours } => {
            // Only the signing secret is needed here.
            let secret = config::jwt_secret_from_env()?;
            let ttl = chrono::Duration::hours(hours);
            println!("{}", auth::issue_token(&user, email.as_deref(), &secret, ttl)?);
            Ok(())
        }
        Command::Seed { user } => {
            let (_config, db) = bootstrap().await?;
            seed::seed_user(&db, &user).await
        }
        Command::Serve => {
            let (config, db) = bootstrap().await?;
            serve(config, db).await
        }
    }
}

/// Loads configuration, starts logging and brings the database schema up to date.
async fn bootstrap() -> Result<(Config, sqlx::PgPool)> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;
    Ok((config, db))
}

async fn serve(config: Config, db: sqlx::PgPool) -> Result<()> {
    info!("Starting Jobtrack API v{}", env!("CARGO_PKG_VERSION"));

    // Redis backs the IP → timezone cache
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_base_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        db,
        s3,
        llm,
        config: config.clone(),
        tz_locator: Arc::new(HttpTimezoneLocator::new()?),
        tz_cache: Arc::new(RedisTimezoneCache::new(redis)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    // Peer addresses feed timezone detection when no X-Forwarded-For is present.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "jobtrack-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}
