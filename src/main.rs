use std::sync::Arc;

use long_bio::config::AppConfig;
use long_bio::verify::{AuthRouteState, HttpVerifyApi, VerifyMode, VerifySession, auth_routes};
use long_bio::wizard::{TracingNavigator, wizard_routes};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("Long-Bio onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Verification API: {}", config.api_base);
    eprintln!("   Wizard API: http://0.0.0.0:{}/info/birthday", config.port);
    eprintln!("   Success delay: {:?}\n", config.success_delay);

    let api = Arc::new(HttpVerifyApi::new(&config.api_base, config.request_timeout)?);
    let navigator = Arc::new(TracingNavigator);

    let state = AuthRouteState {
        signup: Arc::new(VerifySession::new(
            api.clone(),
            navigator.clone(),
            VerifyMode::Signup,
            config.success_delay,
        )),
        signin: Arc::new(VerifySession::new(
            api,
            navigator,
            VerifyMode::Signin,
            config.success_delay,
        )),
    };

    let app = wizard_routes()
        .merge(auth_routes(state))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Wizard server started");
    axum::serve(listener, app).await?;

    Ok(())
}
