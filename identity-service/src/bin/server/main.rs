use std::sync::Arc;

use anyhow::Context;
use identity_service::config::AdminConfig;
use identity_service::config::Config;
use identity_service::config::StorageBackend;
use identity_service::domain::authentication::authorizer::RoleAuthorizer;
use identity_service::domain::authentication::ports::AuthServicePort;
use identity_service::domain::authentication::service::AuthService;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::ports::UserServicePort;
use identity_service::domain::user::service::ensure_account;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::access_policy;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserRepository;
use identity_service::outbound::repositories::PostgresUserRepository;
use identity_service::outbound::tokens::JwtTokenService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    let lifetime = config
        .jwt
        .token_lifetime()
        .context("jwt.expiration is not a valid duration")?;
    let tokens = Arc::new(
        JwtTokenService::new(config.jwt.secret.as_bytes(), lifetime)
            .context("jwt.secret must be set (JWT__SECRET)")?,
    );

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        token_lifetime = %tokens.lifetime(),
        "Configuration loaded"
    );

    let http_application = match config.storage.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_application(
                Arc::new(PostgresUserRepository::new(pg_pool)),
                tokens,
                config.admin.as_ref(),
            )
            .await?
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; accounts are lost on restart");
            build_application(
                Arc::new(InMemoryUserRepository::new()),
                tokens,
                config.admin.as_ref(),
            )
            .await?
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}

async fn build_application<UR>(
    repository: Arc<UR>,
    tokens: Arc<JwtTokenService>,
    admin: Option<&AdminConfig>,
) -> Result<axum::Router, anyhow::Error>
where
    UR: UserRepository,
{
    let auth_service: Arc<dyn AuthServicePort> =
        Arc::new(AuthService::new(Arc::clone(&repository), tokens));
    let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(repository));
    let authorizer = Arc::new(RoleAuthorizer::new(access_policy()));

    match admin {
        Some(admin) => {
            let command = admin.to_command().context("admin section is invalid")?;
            ensure_account(user_service.as_ref(), command)
                .await
                .context("failed to seed the administrator")?;
        }
        None => tracing::warn!("No [admin] configured; admin routes need an existing admin"),
    }

    Ok(create_router(auth_service, user_service, authorizer))
}
