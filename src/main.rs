use clap::Parser;
use mnemo::{
    AppState, ChatService, SharedClients,
    db::DatabaseProvider,
    index::IndexProvider,
    utils::Config,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "mnemo-server", about = "Memory-augmented conversation server")]
struct Args {
    /// Bind address (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database file (overrides DATABASE_PATH)
    #[arg(long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let database = match args.database {
        Some(path) => DatabaseProvider::SQLite { path },
        None => DatabaseProvider::from_env(),
    };
    tracing::info!(provider = ?database, "opening exchange log");
    let store = Arc::from(database.create_log().await?);

    let index_provider = IndexProvider::from_env();
    tracing::info!(provider = ?index_provider, "semantic index configured");

    let clients = Arc::new(SharedClients::new(
        config.generation.clone(),
        index_provider,
    ));
    let chat = Arc::new(ChatService::new(store, clients, &config.context));

    let state = AppState {
        config: Arc::new(config),
        chat,
    };

    let app = mnemo::api::routes::create_router()
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "mnemo-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
