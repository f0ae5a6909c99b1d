use keepactive::{
    config::{validate_production_config, AuthConfig, ServerConfig},
    db,
    repositories::{SqliteReminderRepository, SqliteUserRepository},
    routes::app_router,
    services::CompanyCatalog,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "keepactive=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    validate_production_config();
    let server_config = ServerConfig::from_env()?;
    let auth_config = AuthConfig::from_env();

    // Database connection
    let pool = db::create_pool().await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Company catalog is loaded once here and shared read-only
    let catalog = Arc::new(CompanyCatalog::from_path(&server_config.companies_csv)?);
    if catalog.is_empty().await {
        tracing::warn!(
            "Company catalog {} is empty; every reminder will be rejected",
            server_config.companies_csv.display()
        );
    }

    #[cfg(unix)]
    spawn_catalog_reloader(catalog.clone())?;

    let app_state = AppState::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteReminderRepository::new(pool.clone())),
        catalog,
        &auth_config.jwt_secret,
    );

    let app = app_router(app_state);

    let addr = server_config.addr();
    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Re-read the catalog file on SIGHUP. A failed reload keeps serving the
/// previous catalog.
#[cfg(unix)]
fn spawn_catalog_reloader(catalog: Arc<CompanyCatalog>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            if let Err(e) = catalog.reload().await {
                tracing::error!("Company catalog reload failed: {}", e);
            }
        }
    });
    Ok(())
}
