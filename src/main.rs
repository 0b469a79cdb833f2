use std::error::Error;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use feed_archiver::app::App;
use feed_archiver::config::Config;
use feed_archiver::sink::PostgresSink;
use feed_archiver::source::KafkaSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    // Store and broker connections are the only fatal failures; once the
    // pipeline runs, per-item and per-batch errors are contained.
    let sink = Arc::new(PostgresSink::connect(&config.db).await?);
    let source = KafkaSource::new(config.kafka.clone());
    let app = App::new(source, sink, config.batcher.clone());

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown signal received");
        shutdown.cancel();
    });

    app.run(&cancel).await?;

    info!("drained, exiting");
    Ok(())
}
