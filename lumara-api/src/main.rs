use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lumara_core::repository::UserRepository;
use lumara_core::user::{Role, User};
use lumara_store::app_config::{Config, SeedAdminConfig};
use lumara_store::{
    ChatPlanner, DbClient, PgBookingRepository, PgCatalogRepository, PgTripPlanRepository,
    PgUserRepository, StripeGateway,
};

use lumara_api::state::{AppState, AuthConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumara_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("loading configuration")?;

    let db = DbClient::new(&config.database.url)
        .await
        .context("connecting to database")?;
    db.migrate().await.context("running migrations")?;

    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(db.pool.clone()));

    if let Some(seed) = &config.seed_admin {
        seed_admin(users.as_ref(), seed).await?;
    }

    let state = AppState {
        users,
        catalog: Arc::new(PgCatalogRepository::new(db.pool.clone())),
        bookings: Arc::new(PgBookingRepository::new(db.pool.clone())),
        trip_plans: Arc::new(PgTripPlanRepository::new(db.pool.clone())),
        payments: Arc::new(StripeGateway::new(&config.stripe)),
        planner: Arc::new(ChatPlanner::new(&config.planner)),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        currency: config.stripe.currency.clone(),
    };

    let app = lumara_api::app(state);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = TcpListener::bind(&addr).await.context("binding listener")?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}

/// Startup admin provisioning. Idempotent: an existing account with the
/// configured email is promoted rather than recreated, so the password in
/// config only matters on first boot.
async fn seed_admin(users: &dyn UserRepository, seed: &SeedAdminConfig) -> anyhow::Result<()> {
    match users
        .find_by_email(&seed.email)
        .await
        .map_err(|e| anyhow::anyhow!("looking up seed admin: {}", e))?
    {
        Some(existing) if existing.role == Role::Admin => {
            tracing::debug!("Seed admin {} already provisioned", seed.email);
        }
        Some(existing) => {
            users
                .set_role(existing.id, Role::Admin)
                .await
                .map_err(|e| anyhow::anyhow!("promoting seed admin: {}", e))?;
            tracing::info!("Promoted {} to admin", seed.email);
        }
        None => {
            let password_hash = lumara_api::auth::hash_password(&seed.password)
                .map_err(|e| anyhow::anyhow!("hashing seed admin password: {:?}", e))?;
            let admin = User::new(
                seed.email.clone(),
                password_hash,
                seed.full_name.clone(),
                None,
                Role::Admin,
            );
            users
                .create(&admin)
                .await
                .map_err(|e| anyhow::anyhow!("creating seed admin: {}", e))?;
            tracing::info!("Seeded admin account {}", seed.email);
        }
    }
    Ok(())
}
