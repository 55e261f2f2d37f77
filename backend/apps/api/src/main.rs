//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors should use `auth::AuthError`.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use auth::{
    Argon2PasswordVerifier, AuthAppState, AuthConfig, AuthType, InMemorySessionStore,
    InMemoryUserDirectory, PasswordVerifier, PgAuthRepository, SessionStore, UserDirectory,
    UserField, auth_router,
};
use auth::models::{email::Email, user::User};
use axum::http::{self, Method, header};
use platform::password::ClearTextPassword;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often the in-process store drops expired sessions
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AuthConfig::from_env()?;
    tracing::info!(
        auth_type = ?config.auth_type,
        session_name = %config.session_cookie_name,
        session_duration_secs = config.session_duration.map(|d| d.as_secs()),
        "Loaded auth configuration"
    );

    let verifier: Arc<dyn PasswordVerifier> =
        Arc::new(Argon2PasswordVerifier::new(config.pepper().map(<[u8]>::to_vec)));

    let Ok(database_url) = env::var("DATABASE_URL") else {
        if config.auth_type == AuthType::SessionDb {
            anyhow::bail!("AUTH_TYPE=session_db_auth requires DATABASE_URL");
        }
        tracing::warn!("DATABASE_URL not set, users and sessions live in memory only");

        let store = Arc::new(InMemorySessionStore::new());
        spawn_session_purge(&config, store.clone());
        return serve(config, Arc::new(InMemoryUserDirectory::new()), store, verifier).await;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let repo = Arc::new(PgAuthRepository::new(pool));

    if config.auth_type == AuthType::SessionDb {
        // Startup cleanup: errors here should not prevent server startup
        if let Some(ttl) = config
            .session_duration
            .and_then(|d| chrono::Duration::from_std(d).ok())
        {
            if let Err(e) = repo.cleanup_expired(ttl).await {
                tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
            }
        }
        serve(config, repo.clone(), repo, verifier).await
    } else {
        let store = Arc::new(InMemorySessionStore::new());
        spawn_session_purge(&config, store.clone());
        serve(config, repo, store, verifier).await
    }
}

/// Build the router over the chosen backends and serve until shutdown
async fn serve<D, S>(
    config: AuthConfig,
    directory: Arc<D>,
    store: Arc<S>,
    verifier: Arc<dyn PasswordVerifier>,
) -> anyhow::Result<()>
where
    D: UserDirectory + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    seed_user_from_env(directory.as_ref(), verifier.as_ref()).await?;

    let state = AuthAppState::new(config, directory, store, verifier);
    tracing::info!(strategy = state.authenticator.name(), "Authentication enabled");

    let app = auth_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer());

    let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = match env::var("API_PORT") {
        Ok(port) => port.parse()?,
        Err(_) => 5000,
    };

    let listener = TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Register `SEED_USER_EMAIL` / `SEED_USER_PASSWORD` unless already present
async fn seed_user_from_env<D>(directory: &D, verifier: &dyn PasswordVerifier) -> anyhow::Result<()>
where
    D: UserDirectory + Sync,
{
    let (Ok(email), Ok(password)) = (env::var("SEED_USER_EMAIL"), env::var("SEED_USER_PASSWORD"))
    else {
        return Ok(());
    };

    let email = Email::new(email)?;
    if !directory
        .find_by_field(UserField::Email, email.as_str())
        .await?
        .is_empty()
    {
        tracing::info!(email = %email, "Seed user already present");
        return Ok(());
    }

    let hash = verifier.hash(&ClearTextPassword::new(password)?)?;
    let user = User::new(email, hash);
    directory.insert(&user).await?;
    tracing::info!(user_id = %user.id, "Seed user created");

    Ok(())
}

/// Periodically drop expired sessions from the in-process store
fn spawn_session_purge(config: &AuthConfig, store: Arc<InMemorySessionStore>) {
    let Some(ttl) = config
        .session_duration
        .and_then(|d| chrono::Duration::from_std(d).ok())
    else {
        return;
    };

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = store.purge_expired(ttl).await;
            if purged > 0 {
                tracing::debug!(sessions_deleted = purged, "Purged expired sessions");
            }
        }
    });
}

fn cors_layer() -> CorsLayer {
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
