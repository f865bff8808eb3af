use std::env;
use std::sync::Arc;

use academy_feed::{cache, cli, router, AppState};
use academy_calendar::MockRepository;
use log::info;
use tokio::{net::TcpListener, signal};

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "academy_feed=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {err}");
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::parse(env::args().skip(1).collect());
    setup_logging();

    let state = AppState {
        repository: Arc::new(MockRepository::default()),
        cache: cache::Cache::new(cache::Config {
            enabled: args.enable_cache,
            ttl: args.cache_ttl,
        }),
    };

    if args.enable_cache {
        info!("Caching rendered feeds for {}s", args.cache_ttl.as_secs());
    }

    let listener = TcpListener::bind(args.address).await?;
    info!("Listening at http://{}", args.address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
