use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use serviceportal::handlers::AppState;
use serviceportal::router::router;
use serviceportal::store::{seed_requests, MemoryStore, RequestStore};
use serviceportal::webhook::WebhookForwarder;

#[derive(Parser, Debug)]
#[command(name = "serviceportal", about = "ServicePortal service-request intake API")]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Workflow-automation webhook that receives each submission
    #[arg(
        long,
        env = "WEBHOOK_URL",
        default_value = "http://localhost:5678/webhook/service-requests"
    )]
    webhook_url: String,

    /// Seed the request store with demo data
    #[arg(long, default_value_t = false)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("serviceportal=info".parse()?))
        .init();

    let cli = Cli::parse();

    let store: Arc<dyn RequestStore> = if cli.seed {
        let store = MemoryStore::with_requests(seed_requests());
        info!("Seeded {} demo requests.", store.count());
        Arc::new(store)
    } else {
        Arc::new(MemoryStore::new())
    };

    let webhook = WebhookForwarder::new(cli.webhook_url);
    info!("Forwarding submissions to {}", webhook.url());

    let app = router(Arc::new(AppState { store, webhook }));

    let addr = format!("0.0.0.0:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("ServicePortal API listening on http://localhost:{}", cli.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C signal handler");
            info!("Shutting down ServicePortal API...");
        })
        .await?;

    Ok(())
}
