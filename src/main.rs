use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::Config;
use server::make_app;
use server::schema::build_schema;
use store::Database;

#[cfg(test)]
mod client;
mod config;
mod datamodel;
mod error;
mod server;
mod store;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().nth(1).as_deref() == Some("print-schema") {
        // Regenerates schemas/assignments.graphql for the typed test client.
        println!("{}", build_schema(Database::memory()).sdl());
        return Ok(());
    }

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assignment_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db = match &config.database {
        Some(database) => Database::connect(database)
            .await
            .context("failed to connect to the database")?,
        None => {
            tracing::warn!("DB_CONNECTION_URL is not set, falling back to the in-memory store");
            Database::memory()
        }
    };
    db.init().await.context("failed to create tables")?;

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!("server ready at http://{}", listener.local_addr()?);

    axum::serve(listener, make_app(db.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
