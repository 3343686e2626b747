use webserve::{ServeConfig, ServeError};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

async fn serve() -> Result<(), ServeError> {
    let config = ServeConfig::from_env()?;
    let listener = webserve::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, dir = %config.dir.display(), "listening");
    webserve::run(listener, config.dir).await
}

#[tokio::main]
async fn main() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(e) = serve().await {
        tracing::error!(error = %e, "static file server stopped");
        std::process::exit(1);
    }
}
