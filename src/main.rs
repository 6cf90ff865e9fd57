use userapp::{app, config::AppConfig, db, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "userapp=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "loaded config");
    let addr = config.listen_addr()?;

    let app_state = AppState::init(config).await?;
    db::auto_migrate(&app_state.db, db::MODELS).await?;

    let pool = app_state.db.clone();
    app::serve(app::build_app(app_state), addr).await?;

    pool.close().await;
    Ok(())
}
