use clap::Parser;
use pakauu::{
    api::{handlers::AppState, routes},
    cli::{commands, Cli, Commands},
    config::{aliases::load_alias_table, Settings},
    Error, Result,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pakauu=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let settings = Settings::from_env()?;
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Normalize { text } => {
            let aliases = load_alias_table(settings.aliases.config_path.as_deref())?;
            commands::normalize(&aliases, &text);
        }
        Commands::Search {
            ingredients,
            dietary,
            people,
            limit,
        } => {
            commands::search(&settings, &ingredients, dietary, people, limit).await?;
        }
        Commands::Validate { source } => {
            commands::validate(&settings, source).await?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Pakauu server");
    info!("Corpus: {}", settings.corpus.source);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    let state = AppState::load(settings.clone()).await?;
    if state.catalog.is_empty() {
        warn!("Corpus contains no usable recipes; every search will return nothing");
    }
    if state.skipped_records > 0 {
        warn!(
            "{} corpus records were skipped - run `pakauu validate` for details",
            state.skipped_records
        );
    }

    let recipe_count = state.catalog.len();
    let app = routes::create_router(state, &settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Pakauu Recipe Finder");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!("Recipes: {recipe_count}");
    println!("\nAPI Endpoints (under {}):", settings.server.public_url());
    println!("  GET  /api/search?ingredients=&people=&dietary=");
    println!("  GET  /api/normalize?q=");
    println!("  GET  /api/recipes/:id");
    println!("  POST /api/recipes/:id/feedback");
    println!("  GET  /api/stats");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
